use thiserror::Error;

/// Custom error types for vidsqueeze
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Required external command not found: {0}")]
    DependencyNotFound(String),

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, String),

    #[error("{tool} exited with status {status}: {stderr}")]
    CommandFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Media probe error: {0}")]
    Probe(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid path: {0}")]
    PathError(String),
}

/// Result type for vidsqueeze operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
