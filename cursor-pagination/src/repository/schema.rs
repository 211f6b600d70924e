//! Field metadata exposed by a repository
//!
//! Cursor positions carry every value as a string. The field's [`FieldKind`]
//! turns that string back into a typed [`FilterValue`] so the comparison runs
//! with the store's native collation for the type rather than as text.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::filter::FilterValue;

/// Storage type of a sortable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// UTF-8 text
    String,
    /// Signed 64-bit integer
    Integer,
    /// 64-bit float
    Float,
    /// Boolean
    Boolean,
    /// UTC timestamp, RFC 3339 in cursors
    Timestamp,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::Boolean => write!(f, "boolean"),
            Self::Timestamp => write!(f, "timestamp"),
        }
    }
}

/// A cursor value that does not parse as its field's kind
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("value {value:?} is not a valid {kind}")]
pub struct FieldParseError {
    /// Expected kind
    pub kind: FieldKind,
    /// Offending raw value
    pub value: String,
}

impl FieldKind {
    /// Parse the cursor form of a value (see `FilterValue`'s `Display`)
    ///
    /// # Example
    ///
    /// ```rust
    /// use cursor_pagination::repository::{FieldKind, FilterValue};
    ///
    /// assert_eq!(FieldKind::Integer.parse("42"), Ok(FilterValue::Integer(42)));
    /// assert!(FieldKind::Integer.parse("forty-two").is_err());
    /// ```
    pub fn parse(self, raw: &str) -> Result<FilterValue, FieldParseError> {
        let invalid = || FieldParseError {
            kind: self,
            value: raw.to_string(),
        };

        match self {
            Self::String => Ok(FilterValue::String(raw.to_string())),
            Self::Integer => raw
                .parse::<i64>()
                .map(FilterValue::Integer)
                .map_err(|_| invalid()),
            Self::Float => raw
                .parse::<f64>()
                .map(FilterValue::Float)
                .map_err(|_| invalid()),
            Self::Boolean => raw
                .parse::<bool>()
                .map(FilterValue::Boolean)
                .map_err(|_| invalid()),
            Self::Timestamp => DateTime::parse_from_rfc3339(raw)
                .map(|ts| FilterValue::Timestamp(ts.with_timezone(&Utc)))
                .map_err(|_| invalid()),
        }
    }
}

/// Type and nullability of a field, as declared by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Storage type
    pub kind: FieldKind,
    /// Whether the field may hold null
    #[serde(default)]
    pub nullable: bool,
}

impl FieldSchema {
    /// A field that never holds null
    #[must_use]
    pub const fn required(kind: FieldKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    /// A field that may hold null
    #[must_use]
    pub const fn nullable(kind: FieldKind) -> Self {
        Self {
            kind,
            nullable: true,
        }
    }
}
