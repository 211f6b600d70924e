//! Repository trait definitions
//!
//! The paginator never talks to a database directly. It builds a [`Query`]
//! and hands it to a [`Repository`], which executes it with whatever engine
//! backs it. Methods use RPITIT (Return Position Impl Trait In Traits) for
//! async without `async_trait`.
//!
//! # Example
//!
//! ```rust,ignore
//! use cursor_pagination::repository::{
//!     FieldKind, FieldSchema, Query, Repository, RepositoryResult,
//! };
//!
//! struct PostRepository {
//!     pool: PgPool,
//! }
//!
//! impl Repository for PostRepository {
//!     type Entity = Post;
//!
//!     fn field_schema(&self, field: &str) -> Option<FieldSchema> {
//!         match field {
//!             "id" => Some(FieldSchema::required(FieldKind::Integer)),
//!             "published_at" => Some(FieldSchema::nullable(FieldKind::Timestamp)),
//!             _ => None,
//!         }
//!     }
//!
//!     async fn find_all(&self, query: &Query) -> RepositoryResult<Vec<Post>> {
//!         // Translate query.filter / query.order_by / query.limit to SQL
//!         todo!()
//!     }
//! }
//! ```

use std::future::Future;

use super::error::RepositoryError;
use super::filter::FilterValue;
use super::query::Query;
use super::schema::FieldSchema;

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// A store that can evaluate a [`Query`]
///
/// Implementations must:
///
/// - order by every entry of `query.order_by`, treating null as the lowest
///   value of a field (first when ascending, last when descending);
/// - evaluate `query.filter` with the store's native comparison for each
///   field's type, where `<` / `>` never match a null field;
/// - return at most `query.limit` records when a limit is set.
pub trait Repository: Send + Sync {
    /// Record type returned by queries
    type Entity: Record + Send;

    /// Declared type and nullability of a field, `None` if unknown
    fn field_schema(&self, field: &str) -> Option<FieldSchema>;

    /// Execute a filtered, ordered, limited read
    fn find_all(
        &self,
        query: &Query,
    ) -> impl Future<Output = RepositoryResult<Vec<Self::Entity>>> + Send;
}

/// Read access to the fields of a record
///
/// Field names may be `__`-separated paths into nested values
/// (`author__name`); resolving them is up to the implementation.
pub trait Record {
    /// Current value of `field`
    ///
    /// `None` and `Some(FilterValue::Null)` both mean null.
    fn field_value(&self, field: &str) -> Option<FilterValue>;
}

impl<T: Record + ?Sized> Record for &T {
    fn field_value(&self, field: &str) -> Option<FilterValue> {
        (**self).field_value(field)
    }
}
