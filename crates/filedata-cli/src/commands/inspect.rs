//! Read-only commands

use colored::Colorize;
use filedata::{FormatRegistry, TomlData, TxtData};

use crate::error::Result;

/// List registered formats
pub fn run_formats() -> Result<()> {
    let registry = FormatRegistry::with_builtins();

    println!("{}", "Supported Formats".bold());
    println!();
    for descriptor in registry.descriptors() {
        println!("  {:<8} {}", descriptor.name.green(), descriptor.ext);
    }
    Ok(())
}

/// Print a file of any registered format as text
pub fn run_show(file: &str) -> Result<()> {
    let registry = FormatRegistry::with_builtins();
    let data = registry.from_file(file)?;
    tracing::debug!(format = data.format_name(), "Rendering file");
    print!("{}", data.to_text()?);
    Ok(())
}

/// Print the value at `key`
pub fn run_get(file: &str, key: &str, json: bool) -> Result<()> {
    let value = TomlData::load(file)?.get(key)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{value}");
    }
    Ok(())
}

/// Print every leaf as `path = value`
pub fn run_entries(file: &str) -> Result<()> {
    for (path, value) in TomlData::load(file)?.entries() {
        println!("{} = {}", path.to_string().cyan(), value);
    }
    Ok(())
}

/// Print numbered lines
pub fn run_lines(file: &str) -> Result<()> {
    let data = TxtData::load(file)?;
    println!("{} {}", data.len(), if data.len() == 1 { "line" } else { "lines" });
    for (number, line) in data.iter().enumerate() {
        println!("{:>5}  {}", (number + 1).to_string().dimmed(), line);
    }
    Ok(())
}
