//! Predicate algebra handed to the repository
//!
//! A [`Predicate`] is a boolean combination of per-field [`FilterCondition`]s.
//! The operator set is deliberately small (`=`, `!=`, `<`, `>`, `IS NULL`,
//! `IS NOT NULL`, AND, OR) so that any store with a basic query language can
//! evaluate it natively.
//!
//! # Example
//!
//! ```rust
//! use cursor_pagination::repository::{FilterCondition, Predicate};
//!
//! let predicate = Predicate::any(vec![
//!     FilterCondition::gt("category", "A").into(),
//!     Predicate::all(vec![
//!         FilterCondition::eq("category", "A").into(),
//!         FilterCondition::gt("id", 3_i64).into(),
//!     ]),
//! ]);
//!
//! assert_eq!(
//!     predicate.to_string(),
//!     "(category > 'A' OR (category = 'A' AND id > 3))"
//! );
//! ```

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

/// Comparison operators for filter conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equal to (=)
    Equal,
    /// Not equal to (!=)
    NotEqual,
    /// Greater than (>)
    GreaterThan,
    /// Less than (<)
    LessThan,
    /// Value is null (IS NULL)
    IsNull,
    /// Value is not null (IS NOT NULL)
    IsNotNull,
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "="),
            Self::NotEqual => write!(f, "!="),
            Self::GreaterThan => write!(f, ">"),
            Self::LessThan => write!(f, "<"),
            Self::IsNull => write!(f, "IS NULL"),
            Self::IsNotNull => write!(f, "IS NOT NULL"),
        }
    }
}

/// A typed field value
///
/// Used both as the operand of a [`FilterCondition`] and as the value a
/// [`Record`](super::Record) reports for one of its fields. The `Display`
/// form is the string stored in cursor positions; every [`FieldKind`]
/// parses it back losslessly.
///
/// [`FieldKind`]: super::FieldKind
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// String value
    String(String),
    /// 64-bit integer value
    Integer(i64),
    /// 64-bit floating point value
    Float(f64),
    /// Boolean value
    Boolean(bool),
    /// UTC timestamp
    Timestamp(DateTime<Utc>),
    /// Null value (for IS NULL / IS NOT NULL)
    Null,
}

impl FilterValue {
    /// Whether this is the null value
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{}", n),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Timestamp(ts) => f.write_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for FilterValue {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(ts: DateTime<Utc>) -> Self {
        Self::Timestamp(ts)
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A single per-field comparison
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCondition {
    /// The field name (or `__`-separated path) to filter on
    pub field: String,
    /// The comparison operator
    pub operator: FilterOperator,
    /// The value to compare against
    pub value: FilterValue,
}

impl FilterCondition {
    /// Create a new filter condition
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }

    /// Create an equality filter (field = value)
    ///
    /// Comparing against [`FilterValue::Null`] is normalised to `IS NULL`.
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        let value = value.into();
        if value.is_null() {
            return Self::is_null(field);
        }
        Self::new(field, FilterOperator::Equal, value)
    }

    /// Create a not-equal filter (field != value)
    pub fn ne(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::NotEqual, value.into())
    }

    /// Create a greater-than filter (field > value)
    pub fn gt(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::GreaterThan, value.into())
    }

    /// Create a less-than filter (field < value)
    pub fn lt(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::LessThan, value.into())
    }

    /// Create an IS NULL filter
    pub fn is_null(field: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::IsNull, FilterValue::Null)
    }

    /// Create an IS NOT NULL filter
    pub fn is_not_null(field: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::IsNotNull, FilterValue::Null)
    }
}

impl fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.operator, &self.value) {
            (FilterOperator::IsNull | FilterOperator::IsNotNull, _) => {
                write!(f, "{} {}", self.field, self.operator)
            }
            (op, FilterValue::String(s)) => write!(f, "{} {} '{}'", self.field, op, s),
            (op, FilterValue::Timestamp(_)) => {
                write!(f, "{} {} '{}'", self.field, op, self.value)
            }
            (op, value) => write!(f, "{} {} {}", self.field, op, value),
        }
    }
}

/// Boolean combination of filter conditions
///
/// `All(vec![])` matches every record; `Any(vec![])` matches none.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// A single field comparison
    Condition(FilterCondition),
    /// Conjunction of all children
    All(Vec<Predicate>),
    /// Disjunction of all children
    Any(Vec<Predicate>),
}

impl Predicate {
    /// Predicate that matches every record
    #[must_use]
    pub const fn everything() -> Self {
        Self::All(Vec::new())
    }

    /// Predicate that matches no record
    #[must_use]
    pub const fn nothing() -> Self {
        Self::Any(Vec::new())
    }

    /// Conjunction of the given predicates
    ///
    /// A single child is returned unwrapped.
    #[must_use]
    pub fn all(mut predicates: Vec<Predicate>) -> Self {
        if predicates.len() == 1 {
            return predicates.remove(0);
        }
        Self::All(predicates)
    }

    /// Disjunction of the given predicates
    ///
    /// A single child is returned unwrapped.
    #[must_use]
    pub fn any(mut predicates: Vec<Predicate>) -> Self {
        if predicates.len() == 1 {
            return predicates.remove(0);
        }
        Self::Any(predicates)
    }

    /// AND this predicate with another, flattening nested conjunctions
    #[must_use]
    pub fn and(self, other: Predicate) -> Self {
        let mut children = match self {
            Self::All(children) => children,
            single => vec![single],
        };
        match other {
            Self::All(more) => children.extend(more),
            single => children.push(single),
        }
        Self::all(children)
    }

    /// OR this predicate with another, flattening nested disjunctions
    #[must_use]
    pub fn or(self, other: Predicate) -> Self {
        let mut children = match self {
            Self::Any(children) => children,
            single => vec![single],
        };
        match other {
            Self::Any(more) => children.extend(more),
            single => children.push(single),
        }
        Self::any(children)
    }

    /// Whether this predicate trivially matches every record
    #[must_use]
    pub fn is_everything(&self) -> bool {
        matches!(self, Self::All(children) if children.is_empty())
    }

    /// Number of leaf conditions in the tree
    #[must_use]
    pub fn condition_count(&self) -> usize {
        match self {
            Self::Condition(_) => 1,
            Self::All(children) | Self::Any(children) => {
                children.iter().map(Predicate::condition_count).sum()
            }
        }
    }
}

impl Default for Predicate {
    fn default() -> Self {
        Self::everything()
    }
}

impl From<FilterCondition> for Predicate {
    fn from(condition: FilterCondition) -> Self {
        Self::Condition(condition)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(
            f: &mut fmt::Formatter<'_>,
            children: &[Predicate],
            separator: &str,
        ) -> fmt::Result {
            f.write_str("(")?;
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    f.write_str(separator)?;
                }
                write!(f, "{}", child)?;
            }
            f.write_str(")")
        }

        match self {
            Self::Condition(condition) => write!(f, "{}", condition),
            Self::All(children) if children.is_empty() => f.write_str("TRUE"),
            Self::Any(children) if children.is_empty() => f.write_str("FALSE"),
            Self::All(children) => join(f, children, " AND "),
            Self::Any(children) => join(f, children, " OR "),
        }
    }
}
