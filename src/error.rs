use thiserror::Error;

/// Infrastructure failures. A wrong password is not one of these; see
/// [`crate::controller::Submission`].
#[derive(Debug, Error)]
pub enum EscapeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Logger could not be installed. Preserves the underlying source.
    #[error("Logging error: {0}")]
    Logging(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, EscapeError>;
