//! Typed file data
//!
//! Each format is bound to one file extension and normalizes what it
//! loads, holds, and saves:
//!
//! - [`TxtData`]: lines of text (`.txt`)
//! - [`TomlData`]: a config tree addressed by key paths (`.toml`)
//! - [`TsvData`]: a tab-separated table with a header (`.tsv`)
//!
//! ```no_run
//! use filedata::{SaveOptions, TomlData};
//!
//! let mut config = TomlData::load("settings.toml")?;
//! config.set("server.port", &8080)?;
//! config.save_with("settings.toml", &SaveOptions::default().overwrite(true))?;
//! # Ok::<(), filedata::Error>(())
//! ```

pub mod data;
pub mod error;
pub mod format;
pub mod formats;
pub mod handle;
pub mod key_path;
pub mod registry;
pub mod value;

pub use data::FileData;
pub use error::{Error, ErrorKind, Result};
pub use format::{FileFormat, LoadOptions, SaveOptions, TextRoundTrip};
pub use formats::{Entries, Toml, TomlData, Tsv, TsvData, TsvOptions, TsvTable, Txt, TxtData};
pub use handle::FileHandle;
pub use key_path::{Key, KeyPath};
pub use registry::{AnyFileData, FormatDescriptor, FormatRegistry};
pub use value::{Shape, Structured, Table, Value, normalize, normalize_table};
