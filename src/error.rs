use thiserror::Error;

/// Failures at the boundary between the mission store and durable storage.
///
/// None of these ever reach the user as a blocking failure: the store logs
/// them and carries on with its in-memory state.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no value stored under key {key}")]
    Missing { key: String },

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("value of {size} bytes exceeds storage quota of {max} bytes")]
    QuotaExceeded { size: usize, max: usize },

    #[error("value stored under key {key} is malformed: {source}")]
    Deserialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize missions: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse classification of a [`StorageError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The slot is absent, inaccessible, or rejected a write.
    StorageUnavailable,
    /// The slot holds a value that is not a well-formed mission list.
    DeserializationError,
}

impl StorageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Deserialization { .. } => ErrorKind::DeserializationError,
            Self::Missing { .. }
            | Self::Unavailable(_)
            | Self::QuotaExceeded { .. }
            | Self::Serialization(_) => ErrorKind::StorageUnavailable,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Unavailable(e.to_string())
    }
}
