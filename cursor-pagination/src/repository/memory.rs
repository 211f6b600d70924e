//! In-memory repository
//!
//! Evaluates [`Query`] values in-process with the same semantics a real store
//! is expected to provide: nulls are the lowest value of every field, `<` and
//! `>` never match null, and integers compare numerically against floats.
//! Strings in a field declared as a timestamp are compared as timestamps.
//! Useful as a reference implementation and as a test double.
//!
//! # Example
//!
//! ```rust
//! use cursor_pagination::repository::{
//!     Document, FieldKind, FieldSchema, InMemoryRepository, Query, Repository, SortSpec,
//! };
//! use serde_json::json;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let repo = InMemoryRepository::new()
//!     .with_field("id", FieldSchema::required(FieldKind::Integer))
//!     .with_records([Document::from(json!({"id": 2})), Document::from(json!({"id": 1}))]);
//!
//! let rows = repo.find_all(&Query::new(SortSpec::parse(["id"]))).await.unwrap();
//! assert_eq!(rows[0].value()["id"], 1);
//! # });
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;

use super::filter::{FilterCondition, FilterOperator, FilterValue, Predicate};
use super::query::{Query, SortSpec};
use super::schema::{FieldKind, FieldSchema};
use super::traits::{Record, Repository, RepositoryResult};

/// Separator between segments of a nested field path (`author__name`)
pub const FIELD_PATH_SEPARATOR: &str = "__";

/// Repository holding its records in a `Vec`
#[derive(Debug)]
pub struct InMemoryRepository<R> {
    schema: HashMap<String, FieldSchema>,
    records: RwLock<Vec<R>>,
}

impl<R> Default for InMemoryRepository<R> {
    fn default() -> Self {
        Self {
            schema: HashMap::new(),
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<R> InMemoryRepository<R>
where
    R: Record + Clone + Send + Sync,
{
    /// Create an empty repository with no declared fields
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, schema: FieldSchema) -> Self {
        self.schema.insert(field.into(), schema);
        self
    }

    /// Seed the repository with records
    #[must_use]
    pub fn with_records(self, records: impl IntoIterator<Item = R>) -> Self {
        let mut existing = self.records.into_inner();
        existing.extend(records);
        Self {
            schema: self.schema,
            records: RwLock::new(existing),
        }
    }

    /// Add a record
    pub async fn insert(&self, record: R) {
        self.records.write().await.push(record);
    }

    /// Remove every record matching `predicate`, returning how many were removed
    pub async fn delete_where(&self, predicate: &Predicate) -> usize {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|record| !matches_predicate(record, predicate, &self.schema));
        before - records.len()
    }

    /// Whether `record` satisfies `predicate` under this repository's field kinds
    pub fn matches(&self, record: &R, predicate: &Predicate) -> bool {
        matches_predicate(record, predicate, &self.schema)
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the repository holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl<R> Repository for InMemoryRepository<R>
where
    R: Record + Clone + Send + Sync,
{
    type Entity = R;

    fn field_schema(&self, field: &str) -> Option<FieldSchema> {
        self.schema.get(field).copied()
    }

    async fn find_all(&self, query: &Query) -> RepositoryResult<Vec<R>> {
        let records = self.records.read().await;

        let mut rows: Vec<R> = records
            .iter()
            .filter(|record| matches_predicate(*record, &query.filter, &self.schema))
            .cloned()
            .collect();
        drop(records);

        rows.sort_by(|a, b| compare_records(a, b, &query.order_by, &self.schema));
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        tracing::trace!(
            filter = %query.filter,
            order_by = %query.order_by,
            limit = ?query.limit,
            returned = rows.len(),
            "in-memory query executed"
        );

        Ok(rows)
    }
}

type Schema = HashMap<String, FieldSchema>;

/// Read `field` as the kind the schema declares for it
///
/// JSON has no timestamp type, so RFC 3339 strings in a field declared
/// [`FieldKind::Timestamp`] are read as timestamps.
fn value_of<R: Record>(record: &R, field: &str, schema: &Schema) -> FilterValue {
    declared(
        record.field_value(field).unwrap_or(FilterValue::Null),
        field,
        schema,
    )
}

fn declared(value: FilterValue, field: &str, schema: &Schema) -> FilterValue {
    match (schema.get(field).map(|declared| declared.kind), value) {
        (Some(FieldKind::Timestamp), FilterValue::String(raw)) => FieldKind::Timestamp
            .parse(&raw)
            .unwrap_or(FilterValue::String(raw)),
        (_, value) => value,
    }
}

/// Compare two concrete values of compatible types
fn compare_values(a: &FilterValue, b: &FilterValue) -> Option<Ordering> {
    match (a, b) {
        (FilterValue::String(a), FilterValue::String(b)) => Some(a.cmp(b)),
        (FilterValue::Integer(a), FilterValue::Integer(b)) => Some(a.cmp(b)),
        (FilterValue::Float(a), FilterValue::Float(b)) => a.partial_cmp(b),
        #[allow(clippy::cast_precision_loss)]
        (FilterValue::Integer(a), FilterValue::Float(b)) => (*a as f64).partial_cmp(b),
        #[allow(clippy::cast_precision_loss)]
        (FilterValue::Float(a), FilterValue::Integer(b)) => a.partial_cmp(&(*b as f64)),
        (FilterValue::Boolean(a), FilterValue::Boolean(b)) => Some(a.cmp(b)),
        (FilterValue::Timestamp(a), FilterValue::Timestamp(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Rank used to order values of incompatible types; null ranks lowest
const fn type_rank(value: &FilterValue) -> u8 {
    match value {
        FilterValue::Null => 0,
        FilterValue::Integer(_) | FilterValue::Float(_) => 1,
        FilterValue::String(_) => 2,
        FilterValue::Boolean(_) => 3,
        FilterValue::Timestamp(_) => 4,
    }
}

fn compare_nulls_first(a: &FilterValue, b: &FilterValue) -> Ordering {
    compare_values(a, b).unwrap_or_else(|| type_rank(a).cmp(&type_rank(b)))
}

fn compare_records<R: Record>(a: &R, b: &R, order_by: &SortSpec, schema: &Schema) -> Ordering {
    for sort in order_by {
        let ordering = compare_nulls_first(
            &value_of(a, &sort.field, schema),
            &value_of(b, &sort.field, schema),
        );
        let ordering = if sort.direction.is_descending() {
            ordering.reverse()
        } else {
            ordering
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn matches_condition<R: Record>(record: &R, condition: &FilterCondition, schema: &Schema) -> bool {
    let actual = value_of(record, &condition.field, schema);
    let expected = &declared(condition.value.clone(), &condition.field, schema);

    match condition.operator {
        FilterOperator::IsNull => actual.is_null(),
        FilterOperator::IsNotNull => !actual.is_null(),
        FilterOperator::Equal if expected.is_null() => actual.is_null(),
        FilterOperator::NotEqual if expected.is_null() => !actual.is_null(),
        FilterOperator::Equal => compare_values(&actual, expected) == Some(Ordering::Equal),
        // Null differs from every concrete value
        FilterOperator::NotEqual => compare_values(&actual, expected) != Some(Ordering::Equal),
        FilterOperator::GreaterThan => compare_values(&actual, expected) == Some(Ordering::Greater),
        FilterOperator::LessThan => compare_values(&actual, expected) == Some(Ordering::Less),
    }
}

fn matches_predicate<R: Record>(record: &R, predicate: &Predicate, schema: &Schema) -> bool {
    match predicate {
        Predicate::Condition(condition) => matches_condition(record, condition, schema),
        Predicate::All(children) => children
            .iter()
            .all(|child| matches_predicate(record, child, schema)),
        Predicate::Any(children) => children
            .iter()
            .any(|child| matches_predicate(record, child, schema)),
    }
}

/// A schemaless JSON record
///
/// Nested objects are reachable with `__`-separated paths. Arrays and objects
/// are not comparable and read as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Value);

impl Document {
    /// The underlying JSON value
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Consume the document, returning the JSON value
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    fn lookup(&self, path: &str) -> Option<&Value> {
        path.split(FIELD_PATH_SEPARATOR)
            .try_fold(&self.0, |value, segment| value.get(segment))
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl Record for Document {
    fn field_value(&self, field: &str) -> Option<FilterValue> {
        match self.lookup(field)? {
            Value::Null => Some(FilterValue::Null),
            Value::Bool(b) => Some(FilterValue::Boolean(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(FilterValue::Integer)
                .or_else(|| n.as_f64().map(FilterValue::Float)),
            Value::String(s) => Some(FilterValue::String(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}
