//! Private scratch directories for temporary file round-trips

use tempfile::TempDir;

use crate::{Error, NormalizedPath, Result};

/// A private temporary directory, removed when dropped.
///
/// Each value exclusively owns its directory. Cleanup happens on every
/// exit path, including early returns through `?` and unwinding.
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Create a fresh directory under the system temp location.
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("filedata-")
            .tempdir()
            .map_err(|source| Error::Scratch { source })?;
        tracing::trace!(path = ?dir.path(), "Created scratch directory");
        Ok(Self { dir })
    }

    /// Root of the scratch directory.
    pub fn root(&self) -> NormalizedPath {
        NormalizedPath::new(self.dir.path())
    }

    /// Path of a file named `name` inside the scratch directory.
    ///
    /// The file itself is not created.
    pub fn file(&self, name: &str) -> NormalizedPath {
        self.root().join(name)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        tracing::trace!(path = ?self.dir.path(), "Removing scratch directory");
    }
}
