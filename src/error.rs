//! Error types for appconfig-sync.

/// Result type alias for appconfig-sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;

/// Errors that can occur while synchronizing configuration.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// IO error occurred while reading the configuration document.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse the configuration document.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// The feature-management subtree contains an invalid entry.
    #[error("Invalid feature flag '{key}': {reason}")]
    FeatureError {
        /// The offending feature key
        key: String,
        /// The reason why it's invalid
        reason: String,
    },

    /// The connection string is missing or malformed.
    #[error("Invalid connection string: {0}")]
    ConnectionStringError(String),

    /// A remote-store request failed.
    #[error("Store request failed: {0}")]
    StoreError(String),

    /// Failed to serialize a setting payload.
    #[error("Failed to serialize setting payload: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::ParseError(err.to_string())
    }
}
