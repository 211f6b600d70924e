//! # cursor-pagination
//!
//! Keyset (cursor) pagination over any ordered, filterable record store.
//!
//! Pages are addressed by opaque cursors that encode the sort-field values of
//! a record, never by offsets, so paging stays stable while records are
//! inserted and deleted concurrently.
//!
//! ## Features
//!
//! - **Multi-field orderings**: any mix of ascending and descending fields
//! - **Nullable fields**: nulls sort as the lowest value of their field
//! - **Both directions**: `first`/`after` and `last`/`before` connection arguments
//! - **Store agnostic**: queries go through the [`Repository`](repository::Repository) trait
//! - **Reference store**: in-memory repository over JSON documents (feature `memory`)
//! - **Configuration**: figment-based, from `paginator.toml` and `PAGINATOR_*` variables
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use cursor_pagination::prelude::*;
//! use serde_json::json;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let config = PaginatorConfig::load()?;
//! init_tracing(&config)?;
//!
//! let repo = InMemoryRepository::new()
//!     .with_field("id", FieldSchema::required(FieldKind::Integer))
//!     .with_field("rating", FieldSchema::nullable(FieldKind::Integer))
//!     .with_records([
//!         Document::from(json!({"id": 1, "rating": 4})),
//!         Document::from(json!({"id": 2, "rating": null})),
//!     ]);
//!
//! let paginator = CursorPaginator::new(Arc::new(repo), SortSpec::parse(["-rating", "id"]))?
//!     .with_config(config)?;
//!
//! let page = paginator.page(&PageRequest::first(10)).await?;
//! assert_eq!(page.len(), 2);
//! # Ok::<(), cursor_pagination::Error>(())
//! # }).unwrap();
//! ```

pub mod config;
pub mod cursor;
pub mod error;
pub mod observability;
pub mod paginator;
pub mod repository;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::PaginatorConfig;
    pub use crate::cursor::{Cursor, CursorCodec, Position, PositionValue};
    pub use crate::error::{Error, Result};
    pub use crate::observability::init_tracing;
    pub use crate::paginator::{CursorPaginator, Page, PageRequest};
    pub use crate::repository::{
        FieldKind, FieldSchema, FilterCondition, FilterValue, OrderDirection, Predicate, Query,
        Record, Repository, RepositoryError, RepositoryResult, SortField, SortSpec,
    };

    #[cfg(feature = "memory")]
    pub use crate::repository::{Document, InMemoryRepository};
}
