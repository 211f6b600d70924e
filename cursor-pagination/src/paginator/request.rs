//! Page request arguments
//!
//! A request asks for `first` N records (optionally after / before a cursor)
//! or `last` N records (optionally after / before a cursor), in the manner of
//! GraphQL connection arguments.
//!
//! # Example
//!
//! ```rust
//! use cursor_pagination::paginator::PageRequest;
//!
//! let next = PageRequest::first(20).after("MQ==");
//! assert_eq!(next.first, Some(20));
//! assert!(next.validate(100).is_ok());
//!
//! let previous = PageRequest::last(20).before("Mw==");
//! assert!(previous.validate(10).is_err());
//! ```

use serde::{Deserialize, Serialize};

use super::boundary::Traversal;
use crate::cursor::Cursor;
use crate::error::{Error, Result};

/// Arguments of a single page fetch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageRequest {
    /// Page size when reading forwards
    pub first: Option<usize>,
    /// Page size when reading backwards
    pub last: Option<usize>,
    /// Only records after this cursor
    pub after: Option<Cursor>,
    /// Only records before this cursor
    pub before: Option<Cursor>,
}

impl PageRequest {
    /// Request the first `size` records
    #[must_use]
    pub fn first(size: usize) -> Self {
        Self {
            first: Some(size),
            ..Self::default()
        }
    }

    /// Request the last `size` records
    #[must_use]
    pub fn last(size: usize) -> Self {
        Self {
            last: Some(size),
            ..Self::default()
        }
    }

    /// Only return records after `cursor`
    #[must_use]
    pub fn after(mut self, cursor: impl Into<Cursor>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    /// Only return records before `cursor`
    #[must_use]
    pub fn before(mut self, cursor: impl Into<Cursor>) -> Self {
        self.before = Some(cursor.into());
        self
    }

    /// Check the request shape without touching cursors or the store
    ///
    /// Exactly one of `first` / `last` must be set, and it may not exceed
    /// `max_page_size`.
    pub fn validate(&self, max_page_size: usize) -> Result<()> {
        self.window(max_page_size).map(|_| ())
    }

    /// Reading direction and page size of a valid request
    pub(crate) fn window(&self, max_page_size: usize) -> Result<(Traversal, usize)> {
        let (traversal, size, argument) = match (self.first, self.last) {
            (Some(_), Some(_)) => {
                return Err(Error::invalid_request(
                    "cannot combine `first` and `last` in one request",
                ))
            }
            (None, None) => {
                return Err(Error::invalid_request(
                    "one of `first` or `last` is required",
                ))
            }
            (Some(first), None) => (Traversal::Forward, first, "first"),
            (None, Some(last)) => (Traversal::Backward, last, "last"),
        };

        if size > max_page_size {
            return Err(Error::invalid_request(format!(
                "`{}` is {} but at most {} records may be requested",
                argument, size, max_page_size
            )));
        }

        Ok((traversal, size))
    }
}
