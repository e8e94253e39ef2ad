//! Commands that modify TOML files

use colored::Colorize;
use filedata::{SaveOptions, TomlData};
use filedata_fs::NormalizedPath;

use super::parse_value;
use crate::error::Result;

fn load_or_default(file: &NormalizedPath) -> Result<TomlData> {
    if file.exists() {
        Ok(TomlData::load(file)?)
    } else {
        tracing::debug!(path = %file, "File missing, starting from an empty tree");
        Ok(TomlData::default())
    }
}

fn replace(data: &TomlData, file: &NormalizedPath) -> Result<()> {
    data.save_with(file, &SaveOptions::default().overwrite(true))?;
    Ok(())
}

/// Set `key` to a JSON value, creating the file if needed
pub fn run_set(file: &str, key: &str, raw: &str) -> Result<()> {
    let path = NormalizedPath::new(file);
    let mut data = load_or_default(&path)?;
    let value = parse_value(raw)?;
    data.set(key, &value)?;
    replace(&data, &path)?;

    println!("{} Set {} = {}", "OK".green().bold(), key.cyan(), value);
    Ok(())
}

/// Delete `key`
pub fn run_delete(file: &str, key: &str) -> Result<()> {
    let path = NormalizedPath::new(file);
    let mut data = TomlData::load(&path)?;
    let old = data.delete(key)?;
    replace(&data, &path)?;

    println!("{} Deleted {} (was {})", "OK".green().bold(), key.cyan(), old);
    Ok(())
}

/// Append a JSON value to the array at `key`
pub fn run_append(file: &str, key: &str, raw: &str) -> Result<()> {
    let path = NormalizedPath::new(file);
    let mut data = TomlData::load(&path)?;
    let value = parse_value(raw)?;
    data.append(key, &value)?;
    replace(&data, &path)?;

    println!("{} Appended {} to {}", "OK".green().bold(), value, key.cyan());
    Ok(())
}

/// Merge two files into `output`
pub fn run_merge(left: &str, right: &str, output: &str, overwrite: bool) -> Result<()> {
    let merged = TomlData::load(left)?.merge(&TomlData::load(right)?)?;
    merged.save_with(output, &SaveOptions::default().overwrite(overwrite))?;

    println!(
        "{} Merged {} entries into {}",
        "OK".green().bold(),
        merged.entries().count(),
        output.cyan()
    );
    Ok(())
}
