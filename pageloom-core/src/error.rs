use thiserror::Error;

/// Errors reported by a [`PageSink`](crate::PageSink) implementation.
///
/// The importers treat every variant as a per-record failure: the record is
/// skipped and the batch continues.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The content store rejected or failed to write the page
    #[error("Failed to persist page: {0}")]
    Persist(String),

    /// Downloading the remote image failed
    #[error("Failed to fetch image: {0}")]
    Fetch(String),

    /// The referenced page does not exist in the store
    #[error("Page {0} not found")]
    PageNotFound(u64),

    /// Generic sink error with message
    #[error("{0}")]
    Other(String),
}

impl SinkError {
    pub fn persist(msg: impl Into<String>) -> Self {
        Self::Persist(msg.into())
    }

    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
