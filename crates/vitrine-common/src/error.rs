//! Errors raised before any network traffic happens.

/// Error type shared by the model and validation layers.
#[derive(Debug, thiserror::Error)]
pub enum VitrineError {
    #[error("{message}")]
    Validation { message: String },

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl VitrineError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }
}

/// Convenience type alias for Results using VitrineError.
pub type VitrineResult<T> = Result<T, VitrineError>;
