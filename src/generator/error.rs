use thiserror::Error;

/// Errors raised by an image generator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("network error: {0}")]
    Network(String),

    #[error("authentication rejected: {0}")]
    Auth(String),

    #[error("quota exceeded: {0}")]
    Quota(String),

    #[error("generator API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("the model returned no image")]
    EmptyResult,

    #[error("invalid generator response: {0}")]
    InvalidResponse(String),

    #[error("generator misconfigured: {0}")]
    Config(String),
}

impl GenerationError {
    /// Map a non-success HTTP status to an error kind.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Auth(message),
            429 => Self::Quota(message),
            _ => Self::Api { status, message },
        }
    }
}
