use std::path::PathBuf;

use thiserror::Error;

/// Upload transport status, using the conventional numeric upload codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Ok,
    /// File exceeds the server-wide upload limit
    IniSize,
    /// File exceeds the form's declared limit
    FormSize,
    /// File was only partially uploaded
    Partial,
    /// No file was uploaded
    NoFile,
    /// Missing temporary folder
    NoTmpDir,
    /// Failed to write file to disk
    CantWrite,
    /// An extension stopped the upload
    Extension,
    Unknown(u32),
}

impl UploadStatus {
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => Self::Ok,
            1 => Self::IniSize,
            2 => Self::FormSize,
            3 => Self::Partial,
            4 => Self::NoFile,
            6 => Self::NoTmpDir,
            7 => Self::CantWrite,
            8 => Self::Extension,
            other => Self::Unknown(other),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl std::fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "upload succeeded"),
            Self::IniSize => write!(f, "file exceeds the server upload limit"),
            Self::FormSize => write!(f, "file exceeds the form upload limit"),
            Self::Partial => write!(f, "file was only partially uploaded"),
            Self::NoFile => write!(f, "no file was uploaded"),
            Self::NoTmpDir => write!(f, "missing temporary folder"),
            Self::CantWrite => write!(f, "failed to write file to disk"),
            Self::Extension => write!(f, "upload stopped by an extension"),
            Self::Unknown(code) => write!(f, "unknown upload error (code {code})"),
        }
    }
}

/// File-level failures. Any of these aborts the whole batch before a single
/// page is created.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Upload failed: {0}")]
    UploadTransport(UploadStatus),

    #[error("File is too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("File is empty")]
    EmptyFile,

    #[error("Cannot read {}: {source}", path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid file type: {0} (expected a CSV file)")]
    InvalidMimeType(String),

    #[error("Invalid file extension for '{0}' (expected .csv)")]
    InvalidExtension(String),

    #[error("Too many rows: {rows} (limit {limit})")]
    TooManyRows { rows: usize, limit: usize },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
}

impl ImportError {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::UnreadableFile {
            path: path.into(),
            source,
        }
    }
}

/// Why a single row or line was skipped. Never aborts the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("expected {expected} columns, found {found}")]
    MalformedRow { expected: usize, found: usize },

    #[error("empty title")]
    EmptyTitle,

    #[error("{0}")]
    PersistFailure(String),

    #[error("featured image: {0}")]
    ImageAttachFailure(String),
}
