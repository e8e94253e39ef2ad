//! The format contract shared by every typed file

use std::fmt::Debug;

use filedata_fs::NormalizedPath;

use crate::error::{Error, Result};

/// Behavior of one file format, bound to exactly one extension.
///
/// Implementors are zero-sized markers; all state lives in the
/// [`FileData`](crate::FileData) that wraps `Self::Data`.
pub trait FileFormat: Debug + Clone + Copy + PartialEq + Default + Send + Sync + 'static {
    /// Human-readable format name, unique within a registry.
    const NAME: &'static str;

    /// File suffix including the leading dot, e.g. `".toml"`.
    const EXT: &'static str;

    /// The normalized in-memory representation.
    type Data: Clone + PartialEq + Debug;

    /// Format-specific options passed to load and save.
    type Options: Clone + Debug + Default;

    /// The empty value for this format. Must already be normalized.
    fn default_data() -> Self::Data;

    /// Read `path` into a raw (not yet normalized) value.
    fn load_raw(path: &NormalizedPath, options: &Self::Options) -> Result<Self::Data>;

    /// Write `data` to `path`.
    fn save_raw(data: &Self::Data, path: &NormalizedPath, options: &Self::Options) -> Result<()>;

    /// Canonicalize `data`. Must be idempotent.
    fn normalize(data: Self::Data) -> Result<Self::Data>;

    /// Called when data is saved to the empty path.
    fn discard(data: &Self::Data) -> Result<()> {
        let _ = data;
        tracing::warn!(format = Self::NAME, "Save to empty path, data discarded");
        Ok(())
    }

    /// Fail unless `path` carries this format's suffix.
    fn check_ext(path: &NormalizedPath) -> Result<()> {
        if path.suffix() == Some(Self::EXT) {
            Ok(())
        } else {
            Err(Error::ExtensionMismatch {
                path: path.clone(),
                expected: Self::EXT,
            })
        }
    }
}

/// Formats whose files survive a trip through line text.
///
/// Enables [`FileData::from_text`](crate::FileData::from_text) and
/// [`FileData::to_text`](crate::FileData::to_text). Binary formats must
/// not implement this.
pub trait TextRoundTrip: FileFormat {}

/// Options for loading a typed file.
#[derive(Debug, Clone)]
pub struct LoadOptions<O> {
    /// Reject paths whose suffix does not match the format
    pub check_ext: bool,
    /// Format-specific options
    pub format: O,
}

impl<O: Default> Default for LoadOptions<O> {
    fn default() -> Self {
        Self {
            check_ext: true,
            format: O::default(),
        }
    }
}

impl<O> LoadOptions<O> {
    pub fn check_ext(mut self, check_ext: bool) -> Self {
        self.check_ext = check_ext;
        self
    }

    pub fn format(mut self, format: O) -> Self {
        self.format = format;
        self
    }
}

/// Options for saving a typed file.
#[derive(Debug, Clone)]
pub struct SaveOptions<O> {
    /// Replace an existing file instead of failing
    pub overwrite: bool,
    /// Reject paths whose suffix does not match the format
    pub check_ext: bool,
    /// Format-specific options
    pub format: O,
}

impl<O: Default> Default for SaveOptions<O> {
    fn default() -> Self {
        Self {
            overwrite: false,
            check_ext: true,
            format: O::default(),
        }
    }
}

impl<O> SaveOptions<O> {
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn check_ext(mut self, check_ext: bool) -> Self {
        self.check_ext = check_ext;
        self
    }

    pub fn format(mut self, format: O) -> Self {
        self.format = format;
        self
    }
}
