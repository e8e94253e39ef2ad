//! Built-in file formats

mod toml;
mod tsv;
mod txt;

pub use self::toml::{Entries, Toml, TomlData};
pub use tsv::{Tsv, TsvData, TsvOptions, TsvTable};
pub use txt::{Txt, TxtData};
