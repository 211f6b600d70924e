//! Keyset paginator
//!
//! [`CursorPaginator`] pages through a [`Repository`] in a fixed [`SortSpec`]
//! without offsets. Each page carries cursors for its first and last record;
//! passing one back as `after` / `before` resumes exactly beside that record,
//! however many records were inserted or deleted in the meantime.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use cursor_pagination::paginator::{CursorPaginator, PageRequest};
//! use cursor_pagination::repository::{
//!     Document, FieldKind, FieldSchema, InMemoryRepository, SortSpec,
//! };
//! use serde_json::json;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let repo = InMemoryRepository::new()
//!     .with_field("id", FieldSchema::required(FieldKind::Integer))
//!     .with_records((1..=5).map(|id| Document::from(json!({"id": id}))));
//!
//! let paginator = CursorPaginator::new(Arc::new(repo), SortSpec::parse(["id"])).unwrap();
//!
//! let first = paginator.page(&PageRequest::first(2)).await.unwrap();
//! assert!(first.has_next);
//!
//! let after = first.end_cursor.clone().unwrap();
//! let second = paginator.page(&PageRequest::first(2).after(after)).await.unwrap();
//! assert_eq!(second[0].value()["id"], 3);
//! assert!(second.has_previous);
//! # });
//! ```

mod boundary;
mod page;
mod request;

pub use boundary::{boundary_predicate, Traversal};
pub use page::Page;
pub use request::PageRequest;

use std::sync::Arc;

use crate::config::PaginatorConfig;
use crate::cursor::{Cursor, CursorCodec, Position, PositionValue};
use crate::error::{Error, Result};
use crate::repository::{Predicate, Query, Record, Repository, SortSpec};

/// Pages through a repository in a fixed total order
///
/// The last ordering field should be unique; with ties on every field,
/// records sharing a position can be skipped at page boundaries.
#[derive(Debug)]
pub struct CursorPaginator<R> {
    repository: Arc<R>,
    ordering: SortSpec,
    filter: Predicate,
    codec: CursorCodec,
    config: PaginatorConfig,
}

impl<R: Repository> CursorPaginator<R> {
    /// Create a paginator over `repository` in `ordering`
    ///
    /// Fails with [`Error::InvalidRequest`] when the ordering is empty or
    /// names a field the repository does not declare.
    pub fn new(repository: Arc<R>, ordering: SortSpec) -> Result<Self> {
        if ordering.is_empty() {
            return Err(Error::invalid_request("ordering must name at least one field"));
        }
        if let Some(unknown) = ordering
            .iter()
            .find(|sort| repository.field_schema(&sort.field).is_none())
        {
            return Err(Error::invalid_request(format!(
                "unknown sort field {:?}",
                unknown.field
            )));
        }

        let config = PaginatorConfig::default();
        Ok(Self {
            repository,
            ordering,
            filter: Predicate::everything(),
            codec: CursorCodec::from_config(&config),
            config,
        })
    }

    /// Replace the configuration
    ///
    /// Cursors issued under a different delimiter or null sentinel will no
    /// longer decode.
    pub fn with_config(mut self, config: PaginatorConfig) -> Result<Self> {
        config.validate()?;
        self.codec = CursorCodec::from_config(&config);
        self.config = config;
        Ok(self)
    }

    /// Restrict every page to records matching `filter`
    #[must_use]
    pub fn with_filter(mut self, filter: Predicate) -> Self {
        self.filter = filter;
        self
    }

    /// The ordering pages follow
    #[must_use]
    pub fn ordering(&self) -> &SortSpec {
        &self.ordering
    }

    /// The base filter applied to every page
    #[must_use]
    pub fn filter(&self) -> &Predicate {
        &self.filter
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &PaginatorConfig {
        &self.config
    }

    /// The underlying repository
    #[must_use]
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Fetch one page
    ///
    /// The request is validated and its cursors decoded before the
    /// repository is queried; repository failures are returned unchanged.
    pub async fn page(&self, request: &PageRequest) -> Result<Page<R::Entity>> {
        let (traversal, size) = request.window(self.config.max_page_size)?;

        let mut filter = self.filter.clone();
        if let Some(after) = &request.after {
            filter = filter.and(self.boundary(after, Traversal::Forward)?);
        }
        if let Some(before) = &request.before {
            filter = filter.and(self.boundary(before, Traversal::Backward)?);
        }

        let order_by = match traversal {
            Traversal::Forward => self.ordering.clone(),
            Traversal::Backward => self.ordering.reversed(),
        };
        let query = Query::new(order_by)
            .with_filter(filter)
            .with_limit(size.saturating_add(1));

        let mut items = self.repository.find_all(&query).await?;
        let has_more = items.len() > size;
        items.truncate(size);
        if traversal.is_backward() {
            items.reverse();
        }

        let (has_next, has_previous) = match traversal {
            Traversal::Forward => (has_more, request.after.is_some()),
            Traversal::Backward => (request.before.is_some(), has_more),
        };
        let start = items.first().map(|record| self.cursor(record));
        let end = items.last().map(|record| self.cursor(record));

        tracing::debug!(
            ?traversal,
            size,
            returned = items.len(),
            has_next,
            has_previous,
            "page fetched"
        );

        Ok(Page::new(items, has_next, has_previous).with_cursors(start, end))
    }

    /// Sort-field values of `record`, in ordering order
    pub fn position<T: Record + ?Sized>(&self, record: &T) -> Position {
        self.ordering
            .iter()
            .map(|sort| PositionValue::from(record.field_value(&sort.field)))
            .collect()
    }

    /// Cursor pointing at `record`
    pub fn cursor<T: Record + ?Sized>(&self, record: &T) -> Cursor {
        self.codec.encode(&self.position(record))
    }

    /// Decode a cursor issued for this ordering
    ///
    /// Fails with [`Error::InvalidCursor`] when the token is malformed or
    /// holds a different number of values than the ordering has fields.
    pub fn decode(&self, cursor: &Cursor) -> Result<Position> {
        let position = self.codec.decode(cursor)?;
        if position.len() != self.ordering.len() {
            return Err(Error::invalid_cursor(format!(
                "cursor holds {} values but the ordering has {} fields",
                position.len(),
                self.ordering.len()
            )));
        }
        Ok(position)
    }

    fn boundary(&self, cursor: &Cursor, traversal: Traversal) -> Result<Predicate> {
        self.decode(cursor)
            .and_then(|position| {
                boundary_predicate(&self.ordering, &position, traversal, |field| {
                    self.repository.field_schema(field)
                })
            })
            .inspect_err(|e| {
                tracing::debug!(cursor = %cursor, ?traversal, error = %e, "cursor rejected");
            })
    }
}

#[cfg(all(test, feature = "memory"))]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde_json::{json, Value};

    use super::*;
    use crate::repository::{
        Document, FieldKind, FieldSchema, FilterCondition, InMemoryRepository, RepositoryError,
        RepositoryResult,
    };

    fn documents(rows: Vec<Value>) -> Vec<Document> {
        rows.into_iter().map(Document::from).collect()
    }

    fn ids(page: &Page<Document>) -> Vec<i64> {
        page.iter()
            .map(|doc| doc.value()["id"].as_i64().unwrap())
            .collect()
    }

    fn numbered(count: i64) -> Arc<InMemoryRepository<Document>> {
        Arc::new(
            InMemoryRepository::new()
                .with_field("id", FieldSchema::required(FieldKind::Integer))
                .with_records(documents((1..=count).map(|id| json!({"id": id})).collect())),
        )
    }

    fn scored() -> Arc<InMemoryRepository<Document>> {
        Arc::new(
            InMemoryRepository::new()
                .with_field("id", FieldSchema::required(FieldKind::Integer))
                .with_field("score", FieldSchema::nullable(FieldKind::Integer))
                .with_records(documents(vec![
                    json!({"id": 3, "score": 5}),
                    json!({"id": 1, "score": null}),
                    json!({"id": 4, "score": 10}),
                    json!({"id": 2}),
                ])),
        )
    }

    /// Repository that counts queries and always fails them
    #[derive(Default)]
    struct CountingRepository {
        calls: AtomicUsize,
    }

    impl Repository for CountingRepository {
        type Entity = Document;

        fn field_schema(&self, field: &str) -> Option<FieldSchema> {
            (field == "id").then_some(FieldSchema::required(FieldKind::Integer))
        }

        async fn find_all(&self, _query: &Query) -> RepositoryResult<Vec<Document>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(RepositoryError::connection_failed("store offline"))
        }
    }

    #[tokio::test]
    async fn test_forward_windows() {
        let paginator = CursorPaginator::new(numbered(5), SortSpec::parse(["id"])).unwrap();

        let first = paginator.page(&PageRequest::first(2)).await.unwrap();
        assert_eq!(ids(&first), vec![1, 2]);
        assert!(first.has_next);
        assert!(!first.has_previous);

        let second = paginator
            .page(&PageRequest::first(2).after(paginator.cursor(&first[1])))
            .await
            .unwrap();
        assert_eq!(ids(&second), vec![3, 4]);
        assert!(second.has_next);
        assert!(second.has_previous);

        let third = paginator
            .page(&PageRequest::first(2).after(paginator.cursor(&second[1])))
            .await
            .unwrap();
        assert_eq!(ids(&third), vec![5]);
        assert!(!third.has_next);
        assert!(third.has_previous);
    }

    #[tokio::test]
    async fn test_backward_window_matches_forward_window() {
        let repo = numbered(5);
        let paginator = CursorPaginator::new(Arc::clone(&repo), SortSpec::parse(["id"])).unwrap();
        let all = paginator.page(&PageRequest::first(5)).await.unwrap();

        let forward = paginator
            .page(&PageRequest::first(2).after(paginator.cursor(&all[1])))
            .await
            .unwrap();
        let backward = paginator
            .page(&PageRequest::last(2).before(paginator.cursor(&all[4])))
            .await
            .unwrap();

        assert_eq!(ids(&backward), vec![3, 4]);
        assert_eq!(forward.items, backward.items);
        assert!(backward.has_previous);
        assert!(backward.has_next);
    }

    #[tokio::test]
    async fn test_last_without_cursor() {
        let paginator = CursorPaginator::new(numbered(5), SortSpec::parse(["id"])).unwrap();
        let page = paginator.page(&PageRequest::last(2)).await.unwrap();
        assert_eq!(ids(&page), vec![4, 5]);
        assert!(page.has_previous);
        assert!(!page.has_next);

        let page = paginator.page(&PageRequest::last(10)).await.unwrap();
        assert_eq!(ids(&page), vec![1, 2, 3, 4, 5]);
        assert!(!page.has_previous);
    }

    #[tokio::test]
    async fn test_edge_cursors_resume_paging() {
        let paginator = CursorPaginator::new(numbered(5), SortSpec::parse(["-id"])).unwrap();
        let first = paginator.page(&PageRequest::first(2)).await.unwrap();
        assert_eq!(ids(&first), vec![5, 4]);
        assert_eq!(first.start_cursor, Some(paginator.cursor(&first[0])));

        let next = first.end_cursor.clone().unwrap();
        let second = paginator.page(&PageRequest::first(2).after(next)).await.unwrap();
        assert_eq!(ids(&second), vec![3, 2]);

        let back = second.start_cursor.clone().unwrap();
        let previous = paginator.page(&PageRequest::last(2).before(back)).await.unwrap();
        assert_eq!(previous.items, first.items);
        assert!(!previous.has_previous);
    }

    #[tokio::test]
    async fn test_empty_page_has_no_cursors() {
        let paginator = CursorPaginator::new(numbered(2), SortSpec::parse(["id"])).unwrap();
        let all = paginator.page(&PageRequest::first(2)).await.unwrap();
        let page = paginator
            .page(&PageRequest::first(2).after(paginator.cursor(&all[1])))
            .await
            .unwrap();
        assert!(page.is_empty());
        assert!(!page.has_next);
        assert_eq!(page.start_cursor, None);
        assert_eq!(page.end_cursor, None);
    }

    #[tokio::test]
    async fn test_nullable_ascending() {
        let paginator = CursorPaginator::new(scored(), SortSpec::parse(["score", "id"])).unwrap();

        let first = paginator.page(&PageRequest::first(2)).await.unwrap();
        assert_eq!(ids(&first), vec![1, 2]);

        let after_nulls = paginator
            .page(&PageRequest::first(10).after(paginator.cursor(&first[1])))
            .await
            .unwrap();
        assert_eq!(ids(&after_nulls), vec![3, 4]);

        let after_five = paginator
            .page(&PageRequest::first(10).after(paginator.cursor(&after_nulls[0])))
            .await
            .unwrap();
        assert_eq!(ids(&after_five), vec![4]);

        // Only the second null precedes 5 when walking back from it
        let before_five = paginator
            .page(&PageRequest::last(1).before(paginator.cursor(&after_nulls[0])))
            .await
            .unwrap();
        assert_eq!(ids(&before_five), vec![2]);
        assert!(before_five.has_previous);
    }

    #[tokio::test]
    async fn test_nullable_descending_puts_nulls_last() {
        let paginator = CursorPaginator::new(scored(), SortSpec::parse(["-score", "id"])).unwrap();

        let all = paginator.page(&PageRequest::first(10)).await.unwrap();
        assert_eq!(ids(&all), vec![4, 3, 1, 2]);

        // Forward across the value-to-null transition
        let after_five = paginator
            .page(&PageRequest::first(10).after(paginator.cursor(&all[1])))
            .await
            .unwrap();
        assert_eq!(ids(&after_five), vec![1, 2]);

        let after_null = paginator
            .page(&PageRequest::first(10).after(paginator.cursor(&all[2])))
            .await
            .unwrap();
        assert_eq!(ids(&after_null), vec![2]);

        // Backward from the nulls
        let before_first_null = paginator
            .page(&PageRequest::last(2).before(paginator.cursor(&all[2])))
            .await
            .unwrap();
        assert_eq!(ids(&before_first_null), vec![4, 3]);
        assert!(!before_first_null.has_previous);
        assert!(before_first_null.has_next);

        let before_last_null = paginator
            .page(&PageRequest::last(1).before(paginator.cursor(&all[3])))
            .await
            .unwrap();
        assert_eq!(ids(&before_last_null), vec![1]);
        assert!(before_last_null.has_previous);

        let tail = paginator.page(&PageRequest::last(3)).await.unwrap();
        assert_eq!(ids(&tail), vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_multi_field_ordering() {
        let repo = Arc::new(
            InMemoryRepository::new()
                .with_field("id", FieldSchema::required(FieldKind::Integer))
                .with_field("category", FieldSchema::required(FieldKind::String))
                .with_records(documents(vec![
                    json!({"id": 1, "category": "games"}),
                    json!({"id": 2, "category": "books"}),
                    json!({"id": 3, "category": "books"}),
                    json!({"id": 4, "category": "games"}),
                    json!({"id": 5, "category": "games"}),
                    json!({"id": 6, "category": "music"}),
                ])),
        );
        let paginator =
            CursorPaginator::new(repo, SortSpec::parse(["category", "id"])).unwrap();

        let all = paginator.page(&PageRequest::first(10)).await.unwrap();
        assert_eq!(ids(&all), vec![2, 3, 1, 4, 5, 6]);

        // (games, 4)
        let cursor = paginator.cursor(&all[3]);
        assert_eq!(cursor.as_str(), STANDARD.encode("games|4"));

        let after = paginator
            .page(&PageRequest::first(10).after(cursor.clone()))
            .await
            .unwrap();
        assert_eq!(ids(&after), vec![5, 6]);

        let before = paginator
            .page(&PageRequest::last(10).before(cursor))
            .await
            .unwrap();
        assert_eq!(ids(&before), vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn test_between_cursors() {
        let paginator = CursorPaginator::new(numbered(6), SortSpec::parse(["id"])).unwrap();
        let all = paginator.page(&PageRequest::first(6)).await.unwrap();

        let request = PageRequest::first(10)
            .after(paginator.cursor(&all[0]))
            .before(paginator.cursor(&all[4]));
        let page = paginator.page(&request).await.unwrap();
        assert_eq!(ids(&page), vec![2, 3, 4]);
        assert!(!page.has_next);
        assert!(page.has_previous);
    }

    #[tokio::test]
    async fn test_nested_field_path() {
        let repo = Arc::new(
            InMemoryRepository::new()
                .with_field("id", FieldSchema::required(FieldKind::Integer))
                .with_field("author__name", FieldSchema::required(FieldKind::String))
                .with_records(documents(vec![
                    json!({"id": 1, "author": {"name": "turing"}}),
                    json!({"id": 2, "author": {"name": "hopper"}}),
                    json!({"id": 3, "author": {"name": "lovelace"}}),
                ])),
        );
        let paginator =
            CursorPaginator::new(repo, SortSpec::parse(["author__name", "id"])).unwrap();

        let first = paginator.page(&PageRequest::first(1)).await.unwrap();
        assert_eq!(ids(&first), vec![2]);

        let rest = paginator
            .page(&PageRequest::first(5).after(first.end_cursor.clone().unwrap()))
            .await
            .unwrap();
        assert_eq!(ids(&rest), vec![3, 1]);
    }

    #[tokio::test]
    async fn test_stable_under_concurrent_writes() {
        let repo = Arc::new(
            InMemoryRepository::new()
                .with_field("id", FieldSchema::required(FieldKind::Integer))
                .with_records(documents(vec![
                    json!({"id": 2}),
                    json!({"id": 4}),
                    json!({"id": 6}),
                    json!({"id": 8}),
                ])),
        );
        let paginator = CursorPaginator::new(Arc::clone(&repo), SortSpec::parse(["id"])).unwrap();

        let first = paginator.page(&PageRequest::first(2)).await.unwrap();
        assert_eq!(ids(&first), vec![2, 4]);

        repo.insert(Document::from(json!({"id": 1}))).await;
        repo.insert(Document::from(json!({"id": 5}))).await;
        repo.delete_where(&Predicate::from(FilterCondition::eq("id", 2_i64)))
            .await;

        let second = paginator
            .page(&PageRequest::first(2).after(first.end_cursor.clone().unwrap()))
            .await
            .unwrap();
        assert_eq!(ids(&second), vec![5, 6]);
        assert!(second.has_next);
    }

    #[tokio::test]
    async fn test_base_filter() {
        let repo = Arc::new(
            InMemoryRepository::new()
                .with_field("id", FieldSchema::required(FieldKind::Integer))
                .with_field("published", FieldSchema::required(FieldKind::Boolean))
                .with_records(documents(
                    (1..=6)
                        .map(|id| json!({"id": id, "published": id % 2 == 0}))
                        .collect(),
                )),
        );
        let paginator = CursorPaginator::new(repo, SortSpec::parse(["id"]))
            .unwrap()
            .with_filter(FilterCondition::eq("published", true).into());

        let first = paginator.page(&PageRequest::first(2)).await.unwrap();
        assert_eq!(ids(&first), vec![2, 4]);
        assert!(first.has_next);

        let second = paginator
            .page(&PageRequest::first(2).after(first.end_cursor.clone().unwrap()))
            .await
            .unwrap();
        assert_eq!(ids(&second), vec![6]);
        assert!(!second.has_next);
    }

    #[tokio::test]
    async fn test_invalid_cursors() {
        let paginator = CursorPaginator::new(numbered(3), SortSpec::parse(["id"])).unwrap();

        let malformed = paginator
            .page(&PageRequest::first(2).after("%%% not a cursor %%%"))
            .await
            .unwrap_err();
        assert!(malformed.is_invalid_cursor());

        let two_fields = Cursor::new(STANDARD.encode("1|2"));
        let err = paginator
            .page(&PageRequest::first(2).after(two_fields))
            .await
            .unwrap_err();
        assert!(err.is_invalid_cursor());

        let null_id = Cursor::new(STANDARD.encode("::None"));
        let err = paginator
            .page(&PageRequest::last(2).before(null_id))
            .await
            .unwrap_err();
        assert!(err.is_invalid_cursor());

        let not_a_number = Cursor::new(STANDARD.encode("abc"));
        assert_eq!(paginator.decode(&not_a_number).unwrap().len(), 1);
        assert!(paginator
            .page(&PageRequest::first(2).after(not_a_number))
            .await
            .unwrap_err()
            .is_invalid_cursor());
    }

    #[tokio::test]
    async fn test_request_errors_skip_the_store() {
        let repo = Arc::new(CountingRepository::default());
        let paginator = CursorPaginator::new(Arc::clone(&repo), SortSpec::parse(["id"])).unwrap();

        let both = PageRequest {
            first: Some(1),
            last: Some(1),
            ..PageRequest::default()
        };
        assert!(paginator.page(&both).await.unwrap_err().is_invalid_request());
        assert!(paginator
            .page(&PageRequest::default())
            .await
            .unwrap_err()
            .is_invalid_request());
        assert!(paginator
            .page(&PageRequest::first(1).after("!!"))
            .await
            .unwrap_err()
            .is_invalid_cursor());
        assert_eq!(repo.calls.load(Ordering::SeqCst), 0);

        let err = paginator.page(&PageRequest::first(1)).await.unwrap_err();
        assert!(matches!(err, Error::Repository(_)));
        assert_eq!(repo.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_max_page_size() {
        let paginator = CursorPaginator::new(numbered(3), SortSpec::parse(["id"]))
            .unwrap()
            .with_config(PaginatorConfig::default().with_max_page_size(2))
            .unwrap();

        assert!(paginator.page(&PageRequest::first(2)).await.is_ok());
        assert!(paginator
            .page(&PageRequest::first(3))
            .await
            .unwrap_err()
            .is_invalid_request());
    }

    #[test]
    fn test_new_rejects_bad_orderings() {
        let err = CursorPaginator::new(numbered(1), SortSpec::default()).unwrap_err();
        assert!(err.is_invalid_request());

        let err = CursorPaginator::new(numbered(1), SortSpec::parse(["id", "-missing"])).unwrap_err();
        assert!(err.is_invalid_request());
        assert!(err.to_string().contains("missing"));
    }

    #[tokio::test]
    async fn test_timestamp_field_pages_both_ways() {
        let repo = Arc::new(
            InMemoryRepository::new()
                .with_field("id", FieldSchema::required(FieldKind::Integer))
                .with_field("created", FieldSchema::required(FieldKind::Timestamp))
                .with_records(documents(vec![
                    json!({"id": 1, "created": "2024-01-03T00:00:00Z"}),
                    json!({"id": 2, "created": "2024-01-01T00:00:00Z"}),
                    json!({"id": 3, "created": "2024-01-04T00:00:00Z"}),
                    json!({"id": 4, "created": "2024-01-02T00:00:00Z"}),
                ])),
        );
        let paginator =
            CursorPaginator::new(Arc::clone(&repo), SortSpec::parse(["created", "id"])).unwrap();

        let first = paginator.page(&PageRequest::first(2)).await.unwrap();
        assert_eq!(ids(&first), vec![2, 4]);
        assert!(first.has_next);

        let second = paginator
            .page(&PageRequest::first(2).after(first.end_cursor.clone().unwrap()))
            .await
            .unwrap();
        assert_eq!(ids(&second), vec![1, 3]);
        assert!(!second.has_next);

        let back = paginator
            .page(&PageRequest::last(2).before(second.start_cursor.clone().unwrap()))
            .await
            .unwrap();
        assert_eq!(back.items, first.items);
        assert!(!back.has_previous);

        let newest_first =
            CursorPaginator::new(repo, SortSpec::parse(["-created", "id"])).unwrap();
        let page = newest_first.page(&PageRequest::first(2)).await.unwrap();
        assert_eq!(ids(&page), vec![3, 1]);
        let page = newest_first
            .page(&PageRequest::first(2).after(page.end_cursor.clone().unwrap()))
            .await
            .unwrap();
        assert_eq!(ids(&page), vec![4, 2]);
    }

    #[tokio::test]
    async fn test_float_field_pages_both_ways() {
        let repo = Arc::new(
            InMemoryRepository::new()
                .with_field("id", FieldSchema::required(FieldKind::Integer))
                .with_field("score", FieldSchema::nullable(FieldKind::Float))
                .with_records(documents(vec![
                    json!({"id": 1, "score": 1.5}),
                    json!({"id": 2, "score": 2.25}),
                    json!({"id": 3, "score": 2}),
                    json!({"id": 4, "score": -0.5}),
                    json!({"id": 5, "score": null}),
                ])),
        );
        let paginator = CursorPaginator::new(repo, SortSpec::parse(["score", "id"])).unwrap();

        let first = paginator.page(&PageRequest::first(2)).await.unwrap();
        assert_eq!(ids(&first), vec![5, 4]);

        let second = paginator
            .page(&PageRequest::first(2).after(first.end_cursor.clone().unwrap()))
            .await
            .unwrap();
        assert_eq!(ids(&second), vec![1, 3]);

        // Integer-valued score 2 compares equal to the parsed 2.0
        let third = paginator
            .page(&PageRequest::first(2).after(second.end_cursor.clone().unwrap()))
            .await
            .unwrap();
        assert_eq!(ids(&third), vec![2]);
        assert!(!third.has_next);

        let back = paginator
            .page(&PageRequest::last(2).before(third.start_cursor.clone().unwrap()))
            .await
            .unwrap();
        assert_eq!(ids(&back), vec![1, 3]);
        assert!(back.has_previous);
    }

    #[test]
    fn test_custom_codec_constants() {
        let paginator = CursorPaginator::new(scored(), SortSpec::parse(["score", "id"]))
            .unwrap()
            .with_config(
                PaginatorConfig::default()
                    .with_delimiter(",")
                    .with_null_sentinel("<null>"),
            )
            .unwrap();

        let record = Document::from(json!({"id": 7, "score": null}));
        let cursor = paginator.cursor(&record);
        assert_eq!(cursor.as_str(), STANDARD.encode("<null>,7"));
        assert_eq!(
            paginator.decode(&cursor).unwrap(),
            Position::new([PositionValue::Null, PositionValue::from("7")])
        );

        let err = CursorPaginator::new(scored(), SortSpec::parse(["id"]))
            .unwrap()
            .with_config(PaginatorConfig::default().with_delimiter(""))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
