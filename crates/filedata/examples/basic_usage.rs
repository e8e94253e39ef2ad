//! Basic usage example for filedata

use filedata::{FormatRegistry, TomlData, TxtData};

fn main() -> filedata::Result<()> {
    // Build a config tree from TOML text
    let source = r#"[package]
name = "my-app"
version = "1.0.0"

[dependencies]
serde = "1.0"
"#;

    let mut config = TomlData::from_text(source)?;
    println!("Package: {}", config.get("package.name")?);

    config.set("package.edition", "2024")?;
    config.set("features", &["std", "serde"])?;
    config.append("features", "tracing")?;

    println!("\nEntries:");
    for (path, value) in config.entries() {
        println!("  {path} = {value}");
    }

    // Merging refuses to overwrite
    let extra = TomlData::from_text("[package]\nname = \"other\"\n")?;
    if let Err(e) = config.merge(&extra) {
        println!("\nMerge refused: {e}");
    }

    println!("\nRendered:\n{}", config.to_text()?);

    // Line text
    let notes = TxtData::parse("first\nsecond\n");
    let doubled = &notes * 2;
    println!("Lines: {:?}", doubled.data());

    // Dispatch by extension
    let registry = FormatRegistry::with_builtins();
    for descriptor in registry.descriptors() {
        println!("{} -> {}", descriptor.ext, descriptor.name);
    }

    Ok(())
}
