//! filedata CLI
//!
//! Inspect and edit typed data files from the shell.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, &cli.log)?;

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} Typed data files", "filedata".green().bold());
            println!();
            println!("Run {} for available commands.", "filedata --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Formats => commands::run_formats(),
        Commands::Show { file } => commands::run_show(&file),
        Commands::Get { file, key, json } => commands::run_get(&file, &key, json),
        Commands::Set { file, key, value } => commands::run_set(&file, &key, &value),
        Commands::Delete { file, key } => commands::run_delete(&file, &key),
        Commands::Append { file, key, value } => commands::run_append(&file, &key, &value),
        Commands::Entries { file } => commands::run_entries(&file),
        Commands::Merge {
            left,
            right,
            output,
            overwrite,
        } => commands::run_merge(&left, &right, &output, overwrite),
        Commands::Lines { file } => commands::run_lines(&file),
    }
}
