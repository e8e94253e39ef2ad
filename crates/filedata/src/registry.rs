//! Extension-indexed format dispatch

use std::fmt;

use filedata_fs::NormalizedPath;

use crate::data::FileData;
use crate::error::{Error, Result};
use crate::format::FileFormat;
use crate::formats::{Toml, TomlData, Tsv, TsvData, Txt, TxtData};

/// File data of any built-in format.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyFileData {
    Txt(TxtData),
    Toml(TomlData),
    Tsv(TsvData),
}

impl AnyFileData {
    pub fn format_name(&self) -> &'static str {
        match self {
            Self::Txt(_) => Txt::NAME,
            Self::Toml(_) => Toml::NAME,
            Self::Tsv(_) => Tsv::NAME,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Txt(_) => Txt::EXT,
            Self::Toml(_) => Toml::EXT,
            Self::Tsv(_) => Tsv::EXT,
        }
    }

    pub fn to_text(&self) -> Result<String> {
        match self {
            Self::Txt(data) => data.to_text(),
            Self::Toml(data) => data.to_text(),
            Self::Tsv(data) => data.to_text(),
        }
    }

    pub fn as_txt(&self) -> Option<&TxtData> {
        match self {
            Self::Txt(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_toml(&self) -> Option<&TomlData> {
        match self {
            Self::Toml(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_tsv(&self) -> Option<&TsvData> {
        match self {
            Self::Tsv(data) => Some(data),
            _ => None,
        }
    }
}

impl From<TxtData> for AnyFileData {
    fn from(data: TxtData) -> Self {
        Self::Txt(data)
    }
}

impl From<TomlData> for AnyFileData {
    fn from(data: TomlData) -> Self {
        Self::Toml(data)
    }
}

impl From<TsvData> for AnyFileData {
    fn from(data: TsvData) -> Self {
        Self::Tsv(data)
    }
}

type LoadFn = fn(&NormalizedPath) -> Result<AnyFileData>;

/// Name, extension, and loader of one registered format.
#[derive(Clone, Copy)]
pub struct FormatDescriptor {
    pub name: &'static str,
    pub ext: &'static str,
    load: LoadFn,
}

impl FormatDescriptor {
    /// Describe format `F`.
    pub fn of<F>() -> Self
    where
        F: FileFormat,
        FileData<F>: Into<AnyFileData>,
    {
        Self {
            name: F::NAME,
            ext: F::EXT,
            load: |path| FileData::<F>::load(path).map(Into::into),
        }
    }

    pub fn load(&self, path: &NormalizedPath) -> Result<AnyFileData> {
        (self.load)(path)
    }
}

impl fmt::Debug for FormatDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatDescriptor")
            .field("name", &self.name)
            .field("ext", &self.ext)
            .finish_non_exhaustive()
    }
}

/// Registered formats, at most one per extension.
#[derive(Debug, Clone, Default)]
pub struct FormatRegistry {
    formats: Vec<FormatDescriptor>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding txt, toml, and tsv.
    pub fn with_builtins() -> Self {
        Self {
            formats: vec![
                FormatDescriptor::of::<Txt>(),
                FormatDescriptor::of::<Toml>(),
                FormatDescriptor::of::<Tsv>(),
            ],
        }
    }

    pub fn register(&mut self, descriptor: FormatDescriptor) -> Result<()> {
        if self.lookup(descriptor.ext).is_some() {
            return Err(Error::DuplicateExtension {
                ext: descriptor.ext,
            });
        }
        tracing::debug!(name = descriptor.name, ext = descriptor.ext, "Registered format");
        self.formats.push(descriptor);
        Ok(())
    }

    /// The format registered for `ext` (with leading dot).
    pub fn lookup(&self, ext: &str) -> Option<&FormatDescriptor> {
        self.formats.iter().find(|d| d.ext == ext)
    }

    pub fn by_name(&self, name: &str) -> Option<&FormatDescriptor> {
        self.formats.iter().find(|d| d.name == name)
    }

    pub fn descriptors(&self) -> &[FormatDescriptor] {
        &self.formats
    }

    /// Load `path` with the format registered for its suffix.
    pub fn from_file(&self, path: impl Into<NormalizedPath>) -> Result<AnyFileData> {
        let path = path.into();
        let descriptor = path
            .suffix()
            .and_then(|ext| self.lookup(ext))
            .ok_or_else(|| Error::NoMatchingFormat { path: path.clone() })?;
        tracing::debug!(%path, format = descriptor.name, "Dispatching load");
        descriptor.load(&path)
    }

    /// Load `path` with the first of `names` whose extension fits.
    ///
    /// Every name must be registered, whether or not it would match.
    pub fn from_file_among(
        &self,
        path: impl Into<NormalizedPath>,
        names: &[&str],
    ) -> Result<AnyFileData> {
        let path = path.into();
        let candidates = names
            .iter()
            .map(|name| {
                self.by_name(name).ok_or_else(|| Error::UnknownFormat {
                    name: name.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let suffix = path.suffix();
        let descriptor = candidates
            .into_iter()
            .find(|d| suffix == Some(d.ext))
            .ok_or_else(|| Error::NoMatchingFormat { path: path.clone() })?;
        tracing::debug!(%path, format = descriptor.name, "Dispatching load");
        descriptor.load(&path)
    }
}
