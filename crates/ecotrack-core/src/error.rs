use thiserror::Error;

/// Errors raised by domain validation. All of them are user-correctable.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
