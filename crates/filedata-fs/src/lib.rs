//! Filesystem primitives for typed file data
//!
//! Provides normalized paths with suffix handling, atomic writes, and
//! self-cleaning scratch directories.

pub mod error;
pub mod io;
pub mod path;
pub mod scratch;

pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use scratch::ScratchDir;
