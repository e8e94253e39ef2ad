//! Tracing subscriber setup

use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::error::{CliError, Result};

/// Install the global subscriber.
///
/// Verbose mode logs everything at DEBUG and above. Otherwise `filter`
/// is parsed as an env-filter directive, e.g. `warn` or `filedata=debug`.
pub fn init(verbose: bool, filter: &str) -> Result<()> {
    let result = if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let filter = EnvFilter::try_new(filter).map_err(|e| CliError::Logging(e.to_string()))?;
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    };
    result.map_err(|e| CliError::Logging(e.to_string()))?;

    tracing::debug!(verbose, "Logging initialized");
    Ok(())
}
