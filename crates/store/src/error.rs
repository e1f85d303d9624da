use thiserror::Error;

/// Errors surfaced by the thumbnail metadata store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Opening the database or building the pool failed.
    #[error("connection error: {0}")]
    Connection(String),

    /// The filename is already recorded (unique constraint).
    #[error("duplicate filename: {0}")]
    Duplicate(String),

    /// Any other database-level failure.
    #[error("backend error: {0}")]
    Backend(String),
}
