//! Error types

use thiserror::Error;

use crate::repository::RepositoryError;

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pagination
///
/// Large error variants are boxed to reduce stack size
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// The page request or ordering is malformed; raised before the store is touched
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A cursor token could not be decoded or does not fit the active ordering
    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    /// Failure reported by the repository, passed through unchanged
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl Error {
    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an invalid cursor error
    pub fn invalid_cursor(message: impl Into<String>) -> Self {
        Self::InvalidCursor(message.into())
    }

    /// Whether this is an [`Error::InvalidCursor`]
    #[must_use]
    pub const fn is_invalid_cursor(&self) -> bool {
        matches!(self, Self::InvalidCursor(_))
    }

    /// Whether this is an [`Error::InvalidRequest`]
    #[must_use]
    pub const fn is_invalid_request(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}
