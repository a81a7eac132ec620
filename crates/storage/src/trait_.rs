//! Repository trait abstractions.

use async_trait::async_trait;
use bassline_core::UserProgress;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Durable home of the single [`UserProgress`] record.
///
/// Saves replace the whole record. Implementations must apply saves in call
/// order so the last save wins.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Load the persisted record, or `None` if nothing was ever saved.
    async fn load_progress(&self) -> Result<Option<UserProgress>>;

    /// Persist the record, replacing any previous one.
    async fn save_progress(&mut self, progress: &UserProgress) -> Result<()>;
}

/// Named boolean flags owned by surfaces outside the progress record,
/// such as "has completed onboarding".
#[async_trait]
pub trait FlagRepository: Send + Sync {
    /// Read a flag. Flags never written read as `false`.
    async fn load_flag(&self, name: &str) -> Result<bool>;

    /// Write a flag.
    async fn save_flag(&mut self, name: &str, value: bool) -> Result<()>;
}
