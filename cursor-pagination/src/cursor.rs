//! Cursor codec
//!
//! A [`Cursor`] is an opaque token holding one [`Position`]: the values of a
//! record's sort fields, in sort order. The token is the position's values
//! joined by a delimiter, nulls replaced by a sentinel string, then base64
//! encoded. Nothing is stored server-side and tokens never expire; a token is
//! valid if it decodes and fits the ordering it is used with.
//!
//! # Example
//!
//! ```rust
//! use cursor_pagination::cursor::{CursorCodec, Position, PositionValue};
//!
//! let codec = CursorCodec::default();
//! let position = Position::new([PositionValue::from("A"), PositionValue::Null]);
//!
//! let cursor = codec.encode(&position);
//! assert_eq!(cursor.as_str(), "QXw6Ok5vbmU=");
//! assert_eq!(codec.decode(&cursor).unwrap(), position);
//! ```

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::config::{PaginatorConfig, DEFAULT_DELIMITER, DEFAULT_NULL_SENTINEL};
use crate::error::{Error, Result};
use crate::repository::FilterValue;

/// Opaque pagination token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Wrap a token received from a caller
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The token text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the cursor, returning the token text
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Cursor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Cursor {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for Cursor {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// One slot of a [`Position`]
///
/// Null is a distinct variant so it can never be mistaken for an empty or
/// otherwise falsy concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PositionValue {
    /// Stringified concrete value
    Value(String),
    /// The field was null
    Null,
}

impl PositionValue {
    /// Whether this slot is null
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The concrete value, if any
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Value(value) => Some(value),
            Self::Null => None,
        }
    }
}

impl From<&str> for PositionValue {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<String> for PositionValue {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl From<FilterValue> for PositionValue {
    fn from(value: FilterValue) -> Self {
        match value {
            FilterValue::Null => Self::Null,
            concrete => Self::Value(concrete.to_string()),
        }
    }
}

impl From<Option<FilterValue>> for PositionValue {
    fn from(value: Option<FilterValue>) -> Self {
        value.map_or(Self::Null, Self::from)
    }
}

/// Values of a record's sort fields, one per ordering entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Position(Vec<PositionValue>);

impl Position {
    /// Build a position from its slots
    pub fn new(values: impl IntoIterator<Item = PositionValue>) -> Self {
        Self(values.into_iter().collect())
    }

    /// Slots in order
    #[must_use]
    pub fn values(&self) -> &[PositionValue] {
        &self.0
    }

    /// Number of slots
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no slots
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the slots
    pub fn iter(&self) -> std::slice::Iter<'_, PositionValue> {
        self.0.iter()
    }
}

impl FromIterator<PositionValue> for Position {
    fn from_iter<T: IntoIterator<Item = PositionValue>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a Position {
    type Item = &'a PositionValue;
    type IntoIter = std::slice::Iter<'a, PositionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Encodes positions into cursors and back
///
/// Values containing the delimiter, or equal to the null sentinel, do not
/// survive a round trip. The default `|` / `::None` pair is safe for numbers,
/// timestamps, booleans and most identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorCodec {
    delimiter: String,
    null_sentinel: String,
}

impl Default for CursorCodec {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER, DEFAULT_NULL_SENTINEL)
    }
}

impl CursorCodec {
    /// Create a codec with explicit constants
    pub fn new(delimiter: impl Into<String>, null_sentinel: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
            null_sentinel: null_sentinel.into(),
        }
    }

    /// Create a codec from configuration
    #[must_use]
    pub fn from_config(config: &PaginatorConfig) -> Self {
        Self::new(config.delimiter.clone(), config.null_sentinel.clone())
    }

    /// Separator between values
    #[must_use]
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Marker for null values
    #[must_use]
    pub fn null_sentinel(&self) -> &str {
        &self.null_sentinel
    }

    /// Encode a position as an opaque token
    #[must_use]
    pub fn encode(&self, position: &Position) -> Cursor {
        let joined = position
            .iter()
            .map(|value| match value {
                PositionValue::Value(value) => value.as_str(),
                PositionValue::Null => self.null_sentinel.as_str(),
            })
            .collect::<Vec<_>>()
            .join(&self.delimiter);

        Cursor(STANDARD.encode(joined.as_bytes()))
    }

    /// Decode a token back into a position
    ///
    /// Fails with [`Error::InvalidCursor`] when the token is not base64 or
    /// does not decode to UTF-8. The slot count is not checked here; the
    /// paginator compares it against its ordering.
    pub fn decode(&self, cursor: &Cursor) -> Result<Position> {
        let bytes = STANDARD
            .decode(cursor.as_str())
            .map_err(|e| Error::invalid_cursor(format!("malformed token: {}", e)))?;
        let joined = String::from_utf8(bytes)
            .map_err(|_| Error::invalid_cursor("token is not valid UTF-8"))?;

        Ok(joined
            .split(self.delimiter.as_str())
            .map(|value| {
                if value == self.null_sentinel {
                    PositionValue::Null
                } else {
                    PositionValue::Value(value.to_string())
                }
            })
            .collect())
    }
}
