use thiserror::Error;

/// Errors surfaced by the blob store.
#[derive(Debug, Error)]
pub enum BlobError {
    /// The underlying filesystem operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored name contains path components and cannot be used
    /// inside the storage root.
    #[error("invalid stored name: {0}")]
    InvalidName(String),
}
