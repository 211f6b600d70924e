//! Ordering and query types for repository reads
//!
//! # Example
//!
//! ```rust
//! use cursor_pagination::repository::{OrderDirection, SortSpec};
//!
//! let ordering = SortSpec::parse(["-created", "uuid"]);
//! assert_eq!(ordering.fields()[0].direction, OrderDirection::Descending);
//! assert_eq!(ordering.reversed().to_string(), "created, -uuid");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::filter::Predicate;

/// Prefix marking a descending field in the string form of an ordering
pub const DESCENDING_PREFIX: char = '-';

/// Direction for ordering results
///
/// Nulls sort as the lowest value: first when ascending, last when descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderDirection {
    /// Sort in ascending order (A-Z, 0-9)
    #[default]
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    /// Sort in descending order (Z-A, 9-0)
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl OrderDirection {
    /// The opposite direction
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Whether this is [`OrderDirection::Descending`]
    #[must_use]
    pub const fn is_descending(self) -> bool {
        matches!(self, Self::Descending)
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

/// One `(field, direction)` entry of a [`SortSpec`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortField {
    /// Field name or `__`-separated path
    pub field: String,
    /// Sort direction
    #[serde(default)]
    pub direction: OrderDirection,
}

impl SortField {
    /// Ascending sort on `field`
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: OrderDirection::Ascending,
        }
    }

    /// Descending sort on `field`
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: OrderDirection::Descending,
        }
    }

    /// Same field, opposite direction
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            field: self.field.clone(),
            direction: self.direction.reversed(),
        }
    }
}

impl FromStr for SortField {
    type Err = std::convert::Infallible;

    /// `"-created"` is descending on `created`; anything else is ascending.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.strip_prefix(DESCENDING_PREFIX) {
            Some(field) => Self::desc(field),
            None => Self::asc(s),
        })
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.direction.is_descending() {
            write!(f, "{}", DESCENDING_PREFIX)?;
        }
        f.write_str(&self.field)
    }
}

/// Ordered sequence of sort fields defining a total order over records
///
/// The paginator requires the ordering to be a total order; append a unique
/// field (an id) as the last entry when the leading fields can tie.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortSpec(Vec<SortField>);

impl SortSpec {
    /// Build an ordering from explicit entries
    pub fn new(fields: impl IntoIterator<Item = SortField>) -> Self {
        Self(fields.into_iter().collect())
    }

    /// Build an ordering from `"-field"` / `"field"` strings
    pub fn parse<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            fields
                .into_iter()
                .map(|field| match field.as_ref().parse::<SortField>() {
                    Ok(parsed) => parsed,
                    Err(never) => match never {},
                })
                .collect(),
        )
    }

    /// Entries in order
    #[must_use]
    pub fn fields(&self) -> &[SortField] {
        &self.0
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the entries
    pub fn iter(&self) -> std::slice::Iter<'_, SortField> {
        self.0.iter()
    }

    /// The field-wise inverse ordering
    ///
    /// Used to read "the last N records" as "the first N records" of the
    /// inverted order.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self(self.0.iter().map(SortField::reversed).collect())
    }
}

impl<'a> IntoIterator for &'a SortSpec {
    type Item = &'a SortField;
    type IntoIter = std::slice::Iter<'a, SortField>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<SortField> for SortSpec {
    fn from_iter<T: IntoIterator<Item = SortField>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", field)?;
        }
        Ok(())
    }
}

/// A filtered, ordered, optionally limited read
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    /// Records must satisfy this predicate
    pub filter: Predicate,
    /// Result order
    pub order_by: SortSpec,
    /// Maximum number of records to return
    pub limit: Option<usize>,
}

impl Query {
    /// Create a query over every record in the given order
    #[must_use]
    pub fn new(order_by: SortSpec) -> Self {
        Self {
            filter: Predicate::everything(),
            order_by,
            limit: None,
        }
    }

    /// Set the filter predicate
    #[must_use]
    pub fn with_filter(mut self, filter: Predicate) -> Self {
        self.filter = filter;
        self
    }

    /// Set the result limit
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
