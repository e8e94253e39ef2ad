//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};

/// filedata - Inspect and edit typed data files
#[derive(Parser, Debug)]
#[command(name = "filedata")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log filter used when not verbose
    #[arg(long, global = true, env = "FILEDATA_LOG", default_value = "warn")]
    pub log: String,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List the supported file formats
    Formats,

    /// Print any supported file as text
    Show {
        /// File to show; the format follows from its extension
        file: String,
    },

    /// Print the value at a key path of a TOML file
    ///
    /// Examples:
    ///   filedata get config.toml server.port
    ///   filedata get config.toml servers[0] --json
    Get {
        file: String,

        /// Dotted key path, e.g. `server.ports[0]`
        key: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set the value at a key path of a TOML file
    ///
    /// The value is parsed as JSON; anything that is not valid JSON is
    /// stored as a plain string. A missing file is created.
    Set {
        file: String,
        key: String,
        value: String,
    },

    /// Delete the value at a key path of a TOML file
    Delete { file: String, key: String },

    /// Append a value to the array at a key path of a TOML file
    Append {
        file: String,
        key: String,
        value: String,
    },

    /// List every leaf of a TOML file with its key path
    Entries { file: String },

    /// Merge two TOML files that share no key paths
    Merge {
        left: String,
        right: String,

        /// Output file
        #[arg(short, long)]
        output: String,

        /// Replace the output file if it exists
        #[arg(long)]
        overwrite: bool,
    },

    /// Print the lines of a text file with line numbers
    Lines { file: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_get() {
        let cli = Cli::parse_from(["filedata", "get", "a.toml", "x.y", "--json"]);
        assert_eq!(
            cli.command,
            Some(Commands::Get {
                file: "a.toml".into(),
                key: "x.y".into(),
                json: true,
            })
        );
    }

    #[test]
    fn test_parse_merge() {
        let cli = Cli::parse_from(["filedata", "-v", "merge", "a.toml", "b.toml", "-o", "c.toml"]);
        assert!(cli.verbose);
        assert_eq!(
            cli.command,
            Some(Commands::Merge {
                left: "a.toml".into(),
                right: "b.toml".into(),
                output: "c.toml".into(),
                overwrite: false,
            })
        );
    }
}
