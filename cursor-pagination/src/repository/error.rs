//! Repository error types
//!
//! Store failures are reported with the operation that was running and a
//! coarse category. The paginator never inspects or retries these errors; it
//! hands them back to the caller as-is.
//!
//! # Example
//!
//! ```rust
//! use cursor_pagination::repository::{RepositoryError, RepositoryErrorKind};
//!
//! let error = RepositoryError::connection_failed("connection refused");
//! assert!(matches!(error.kind, RepositoryErrorKind::ConnectionFailed));
//! assert!(error.is_retriable());
//! ```

use std::fmt;

/// Operation being performed when the repository error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Executing a filtered, ordered query
    FindAll,
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FindAll => write!(f, "find_all"),
        }
    }
}

/// Category of repository error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryErrorKind {
    /// Failed to connect to the store
    ConnectionFailed,
    /// Operation timed out
    Timeout,
    /// The store rejected or failed to execute the query
    QueryFailed,
    /// A stored value could not be converted
    SerializationError,
    /// Other unclassified error
    Other,
}

impl fmt::Display for RepositoryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::Timeout => write!(f, "timeout"),
            Self::QueryFailed => write!(f, "query_failed"),
            Self::SerializationError => write!(f, "serialization_error"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Structured repository error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    /// The operation being performed when the error occurred
    pub operation: RepositoryOperation,
    /// The category of error
    pub kind: RepositoryErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Additional context (collection name, query fragment)
    pub context: Option<String>,
}

impl RepositoryError {
    /// Create a new repository error
    pub fn new(
        operation: RepositoryOperation,
        kind: RepositoryErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            context: None,
        }
    }

    /// Create a connection failed error
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::new(
            RepositoryOperation::FindAll,
            RepositoryErrorKind::ConnectionFailed,
            message,
        )
    }

    /// Create a timeout error
    pub fn timeout(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::Timeout, message)
    }

    /// Create a query failure
    ///
    /// # Example
    ///
    /// ```rust
    /// use cursor_pagination::repository::{RepositoryError, RepositoryOperation};
    ///
    /// let error = RepositoryError::query_failed(RepositoryOperation::FindAll, "unknown operator");
    /// assert!(!error.is_retriable());
    /// ```
    pub fn query_failed(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::QueryFailed, message)
    }

    /// Create a serialization error
    pub fn serialization_error(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::SerializationError, message)
    }

    /// Attach context to an existing error
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Check if this error is retriable (transient errors that may succeed on retry)
    pub fn is_retriable(&self) -> bool {
        matches!(
            self.kind,
            RepositoryErrorKind::ConnectionFailed | RepositoryErrorKind::Timeout
        )
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Repository {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let Some(ref context) = self.context {
            write!(f, " [{}]", context)?;
        }
        Ok(())
    }
}

impl std::error::Error for RepositoryError {}
