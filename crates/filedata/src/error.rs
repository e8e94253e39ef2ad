//! Error types for filedata

use filedata_fs::NormalizedPath;

use crate::key_path::KeyPath;

/// Result type for filedata operations
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`].
///
/// Callers match on the kind when they care about the triggering
/// condition rather than the exact variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong value or key shape
    Type,
    /// Wrong extension, unknown or unmatched format, malformed argument
    Value,
    /// The underlying format loader failed
    Load,
    /// File content does not fit the format
    Format,
    /// Missing or conflicting key path
    Key,
    /// Save target exists and overwriting was not requested
    AlreadyExists,
    /// Filesystem failure outside of a load
    Io,
}

/// Errors that can occur in filedata operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported value of type {found}")]
    UnsupportedValue { found: String },

    #[error("Mapping key must be a string, found {found}")]
    NonStringKey { found: String },

    #[error("Expected a table, found {found}")]
    NotATable { found: String },

    #[error("Cannot descend into {found} at '{path}'")]
    NotAContainer { path: KeyPath, found: String },

    #[error("Value at '{path}' is {found}, not an array")]
    NotAList { path: KeyPath, found: String },

    #[error("Key '{key}' cannot address {container} at '{path}'")]
    KeyType {
        path: KeyPath,
        key: String,
        container: &'static str,
    },

    #[error("File {path} does not have extension {expected}")]
    ExtensionMismatch {
        path: NormalizedPath,
        expected: &'static str,
    },

    #[error("None of the candidate formats fit {path}")]
    NoMatchingFormat { path: NormalizedPath },

    #[error("Unknown format: {name}")]
    UnknownFormat { name: String },

    #[error("A format is already registered for extension {ext}")]
    DuplicateExtension { ext: &'static str },

    #[error("Example handle for {format} has no path")]
    ExampleHandle { format: &'static str },

    #[error("Key path is empty")]
    EmptyKeyPath,

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("Cell {cell:?} contains a tab or newline")]
    InvalidCell { cell: String },

    #[error("Failed to load {path}: {source}")]
    Load {
        path: NormalizedPath,
        #[source]
        source: Box<Error>,
    },

    #[error("Malformed {format} file {path}: {message}")]
    Format {
        path: NormalizedPath,
        format: &'static str,
        message: String,
    },

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Key not found: '{path}'")]
    KeyNotFound { path: KeyPath },

    #[error("Key path '{path}' is present in both trees")]
    KeyConflict { path: KeyPath },

    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("File already exists: {path}")]
    AlreadyExists { path: NormalizedPath },

    #[error("Filesystem error: {0}")]
    Fs(#[from] filedata_fs::Error),
}

impl Error {
    pub fn unsupported(found: impl Into<String>) -> Self {
        Self::UnsupportedValue {
            found: found.into(),
        }
    }

    pub fn format(path: &NormalizedPath, format: &'static str, message: impl Into<String>) -> Self {
        Self::Format {
            path: path.clone(),
            format,
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedValue { .. }
            | Self::NonStringKey { .. }
            | Self::NotATable { .. }
            | Self::NotAContainer { .. }
            | Self::NotAList { .. }
            | Self::KeyType { .. } => ErrorKind::Type,
            Self::ExtensionMismatch { .. }
            | Self::NoMatchingFormat { .. }
            | Self::UnknownFormat { .. }
            | Self::DuplicateExtension { .. }
            | Self::ExampleHandle { .. }
            | Self::EmptyKeyPath
            | Self::RaggedRow { .. }
            | Self::InvalidCell { .. } => ErrorKind::Value,
            Self::Load { .. } => ErrorKind::Load,
            Self::Format { .. } | Self::TomlParse(_) | Self::TomlSerialize(_) => ErrorKind::Format,
            Self::KeyNotFound { .. } | Self::KeyConflict { .. } | Self::IndexOutOfRange { .. } => {
                ErrorKind::Key
            }
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::Fs(_) => ErrorKind::Io,
        }
    }
}
