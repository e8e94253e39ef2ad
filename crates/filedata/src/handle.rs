//! Typed file handles

use std::fmt;
use std::marker::PhantomData;

use filedata_fs::NormalizedPath;

use crate::data::FileData;
use crate::error::{Error, Result};
use crate::format::{FileFormat, LoadOptions, SaveOptions};

/// A path bound to format `F`.
///
/// A handle built with [`FileHandle::new`] always carries a path with the
/// format's suffix. An example handle carries no path at all and is only
/// useful for asking about the format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle<F: FileFormat> {
    path: Option<NormalizedPath>,
    format: PhantomData<F>,
}

impl<F: FileFormat> FileHandle<F> {
    /// Bind `path` to `F`, rejecting a path with the wrong suffix.
    pub fn new(path: impl Into<NormalizedPath>) -> Result<Self> {
        let path = path.into();
        F::check_ext(&path)?;
        Ok(Self {
            path: Some(path),
            format: PhantomData,
        })
    }

    /// A handle with no path.
    pub fn example() -> Self {
        Self {
            path: None,
            format: PhantomData,
        }
    }

    pub fn is_example(&self) -> bool {
        self.path.is_none()
    }

    pub fn path(&self) -> Result<&NormalizedPath> {
        self.path
            .as_ref()
            .ok_or(Error::ExampleHandle { format: F::NAME })
    }

    pub fn to_path_string(&self) -> Result<String> {
        self.path().map(|path| path.as_str().to_string())
    }

    pub fn extension(&self) -> &'static str {
        F::EXT
    }

    pub fn format_name(&self) -> &'static str {
        F::NAME
    }

    pub fn load(&self) -> Result<FileData<F>> {
        self.load_with(&LoadOptions::default())
    }

    pub fn load_with(&self, options: &LoadOptions<F::Options>) -> Result<FileData<F>> {
        FileData::load_with(self.path()?, options)
    }

    pub fn save(&self, data: &FileData<F>, options: &SaveOptions<F::Options>) -> Result<()> {
        data.save_with(self.path()?, options)
    }
}

impl<F: FileFormat> fmt::Display for FileHandle<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{} file {}", F::NAME, path),
            None => write!(f, "{} file (example)", F::NAME),
        }
    }
}
