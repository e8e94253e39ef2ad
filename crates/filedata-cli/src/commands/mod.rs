//! Command implementations for filedata-cli

pub mod edit;
pub mod inspect;

pub use edit::{run_append, run_delete, run_merge, run_set};
pub use inspect::{run_entries, run_formats, run_get, run_lines, run_show};

use filedata::Value;

use crate::error::{CliError, Result};

/// Parse a command-line value as JSON, falling back to a plain string.
pub(crate) fn parse_value(raw: &str) -> Result<Value> {
    let value = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => filedata::normalize(&json),
        Err(_) => Ok(Value::from(raw)),
    };
    value.map_err(|e| CliError::user(format!("Cannot store '{raw}': {e}")))
}
