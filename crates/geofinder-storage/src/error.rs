use thiserror::Error;

/// Storage-specific error types
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No usable storage directory on this platform")]
    NoStorageDirectory,
}

/// Specialized Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;
