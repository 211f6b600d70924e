//! Store abstraction consumed by the paginator
//!
//! The paginator only needs a narrow capability from storage: evaluate a
//! boolean combination of per-field comparisons, order by several fields,
//! limit the result count, and say whether a field is nullable. This module
//! defines that capability and the value types that flow through it.
//!
//! # Features
//!
//! - **Query capability**: [`Repository`] trait executing a [`Query`]
//! - **Record access**: [`Record`] trait reading sort fields off an entity
//! - **Predicates**: [`Predicate`] / [`FilterCondition`] boolean algebra
//! - **Ordering**: [`SortSpec`] of `(field, direction)` pairs
//! - **Field metadata**: [`FieldSchema`] type and nullability
//! - **Reference store**: [`InMemoryRepository`] (feature `memory`)

mod error;
mod filter;
#[cfg(feature = "memory")]
mod memory;
mod query;
mod schema;
mod traits;

// Re-export all public types
pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use filter::{FilterCondition, FilterOperator, FilterValue, Predicate};
#[cfg(feature = "memory")]
pub use memory::{Document, InMemoryRepository, FIELD_PATH_SEPARATOR};
pub use query::{OrderDirection, Query, SortField, SortSpec, DESCENDING_PREFIX};
pub use schema::{FieldKind, FieldParseError, FieldSchema};
pub use traits::{Record, Repository, RepositoryResult};
