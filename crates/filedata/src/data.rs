//! Typed file data: one normalized value bound to its format

use filedata_fs::{NormalizedPath, ScratchDir, io};

use crate::error::{Error, Result};
use crate::format::{FileFormat, LoadOptions, SaveOptions, TextRoundTrip};
use crate::formats::{Txt, TxtData};
use crate::handle::FileHandle;

/// File stem used inside scratch directories.
const SCRATCH_STEM: &str = "data";

/// A normalized value of format `F`.
///
/// The held value is always the output of `F::normalize`. Reads return
/// owned snapshots; the internal value is never handed out by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct FileData<F: FileFormat> {
    data: F::Data,
}

impl<F: FileFormat> FileData<F> {
    /// Wrap `data`, normalizing it first.
    pub fn new(data: F::Data) -> Result<Self> {
        Ok(Self {
            data: F::normalize(data)?,
        })
    }

    /// Wrap data the caller has already normalized.
    pub(crate) fn from_normalized(data: F::Data) -> Self {
        Self { data }
    }

    /// An owned snapshot of the held value.
    pub fn data(&self) -> F::Data {
        self.data.clone()
    }

    /// Replace the held value, normalizing it first.
    ///
    /// On error the previous value is kept.
    pub fn set_data(&mut self, data: F::Data) -> Result<()> {
        self.data = F::normalize(data)?;
        Ok(())
    }

    pub fn into_data(self) -> F::Data {
        self.data
    }

    pub(crate) fn data_ref(&self) -> &F::Data {
        &self.data
    }

    /// Mutable access for format code that re-establishes the invariant.
    pub(crate) fn data_mut(&mut self) -> &mut F::Data {
        &mut self.data
    }

    pub fn extension() -> &'static str {
        F::EXT
    }

    pub fn format_name() -> &'static str {
        F::NAME
    }

    /// A handle binding this format to `path`.
    pub fn handle(path: impl Into<NormalizedPath>) -> Result<FileHandle<F>> {
        FileHandle::new(path)
    }

    /// Load `path` with default options. The empty path yields the default value.
    pub fn load(path: impl Into<NormalizedPath>) -> Result<Self> {
        Self::load_with(path, &LoadOptions::default())
    }

    /// Load `path`.
    ///
    /// Failures inside the format loader are reported as [`Error::Load`]
    /// with the loader's error as source. Extension mismatches are
    /// reported directly.
    pub fn load_with(
        path: impl Into<NormalizedPath>,
        options: &LoadOptions<F::Options>,
    ) -> Result<Self> {
        let path = path.into();
        if path.is_empty() {
            return Ok(Self::default());
        }
        if options.check_ext {
            F::check_ext(&path)?;
        }

        tracing::debug!(format = F::NAME, %path, "Loading file");
        let data = F::load_raw(&path, &options.format)
            .and_then(F::normalize)
            .map_err(|source| Error::Load {
                path: path.clone(),
                source: Box::new(source),
            })?;
        Ok(Self { data })
    }

    /// Save to `path` with default options (no overwrite).
    pub fn save(&self, path: impl Into<NormalizedPath>) -> Result<()> {
        self.save_with(path, &SaveOptions::default())
    }

    /// Save to `path`. The empty path discards the data.
    pub fn save_with(
        &self,
        path: impl Into<NormalizedPath>,
        options: &SaveOptions<F::Options>,
    ) -> Result<()> {
        let path = path.into();
        if path.is_empty() {
            return F::discard(&self.data);
        }
        if path.exists() && !options.overwrite {
            return Err(Error::AlreadyExists { path });
        }
        if options.check_ext {
            F::check_ext(&path)?;
        }

        tracing::debug!(format = F::NAME, %path, overwrite = options.overwrite, "Saving file");
        F::save_raw(&self.data, &path, &options.format)
    }
}

impl<F: FileFormat> Default for FileData<F> {
    fn default() -> Self {
        Self {
            data: F::default_data(),
        }
    }
}

impl<F: TextRoundTrip> FileData<F> {
    /// Build from text by staging it as a line-text file and loading that
    /// file as `F`.
    pub fn from_text(text: &str) -> Result<Self> {
        let lines = TxtData::parse(text);
        let scratch = ScratchDir::new()?;
        let staged = scratch.file(&format!("{SCRATCH_STEM}{}", Txt::EXT));
        lines.save(&staged)?;

        let target = staged.with_suffix(F::EXT);
        if target != staged {
            io::rename(&staged, &target)?;
        }
        tracing::trace!(format = F::NAME, "Loading staged text");
        Self::load(&target)
    }

    /// Render as text by saving as `F` and reading the file back as lines.
    pub fn to_text(&self) -> Result<String> {
        let scratch = ScratchDir::new()?;
        let staged = scratch.file(&format!("{SCRATCH_STEM}{}", F::EXT));
        self.save(&staged)?;

        let target = staged.with_suffix(Txt::EXT);
        if target != staged {
            io::rename(&staged, &target)?;
        }
        Ok(TxtData::load(&target)?.render())
    }
}
