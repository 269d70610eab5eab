use thiserror::Error;

/// Errors from repository operations (used by trait definitions in recall-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}

/// Errors surfaced by the memory log service.
#[derive(Debug, Error)]
pub enum MemoryLogError {
    /// The request was well-formed JSON but carried an unusable value.
    #[error("invalid memory log: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<RepositoryError> for MemoryLogError {
    fn from(e: RepositoryError) -> Self {
        MemoryLogError::Storage(e.to_string())
    }
}

/// Errors raised while loading an explicitly requested config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {reason}")]
    Read { path: String, reason: String },

    #[error("failed to parse config '{path}': {reason}")]
    Parse { path: String, reason: String },
}
