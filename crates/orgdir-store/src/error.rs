//! Error types for directory storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
///
/// An empty result or a missing row is not an error; queries report those as
/// an empty `Vec` or `None`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A row violates an invariant the schema is expected to uphold.
    #[error("data integrity error: {0}")]
    Integrity(String),

    /// The backend is unavailable (used by the in-memory store's failure mode).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<orgdir_core::CoreError> for StoreError {
    fn from(err: orgdir_core::CoreError) -> Self {
        Self::Integrity(err.to_string())
    }
}
