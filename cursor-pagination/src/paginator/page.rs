//! Page of results

use std::fmt;
use std::ops::Deref;

use serde::Serialize;

use crate::cursor::Cursor;

/// Number of items `Display` prints before truncating
const DISPLAY_LIMIT: usize = 21;

/// One page of records in natural sort order
///
/// Derefs to `[T]`, so `len`, `iter`, indexing and slicing work directly.
///
/// # Example
///
/// ```rust
/// use cursor_pagination::paginator::Page;
///
/// let page = Page::new(vec![3, 4], true, true);
/// assert_eq!(page.len(), 2);
/// assert_eq!(page[0], 3);
/// assert_eq!(page.to_string(), "<Page: [3, 4]>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Records on this page
    pub items: Vec<T>,
    /// More records follow this page
    pub has_next: bool,
    /// More records precede this page
    pub has_previous: bool,
    /// Cursor of the first item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<Cursor>,
    /// Cursor of the last item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_cursor: Option<Cursor>,
}

impl<T> Page<T> {
    /// Create a page without edge cursors
    #[must_use]
    pub fn new(items: Vec<T>, has_next: bool, has_previous: bool) -> Self {
        Self {
            items,
            has_next,
            has_previous,
            start_cursor: None,
            end_cursor: None,
        }
    }

    /// Attach edge cursors
    #[must_use]
    pub fn with_cursors(mut self, start: Option<Cursor>, end: Option<Cursor>) -> Self {
        self.start_cursor = start;
        self.end_cursor = end;
        self
    }

    /// Records on this page
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page, returning its records
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Transform the records, keeping flags and cursors
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            has_next: self.has_next,
            has_previous: self.has_previous,
            start_cursor: self.start_cursor,
            end_cursor: self.end_cursor,
        }
    }
}

impl<T> Deref for Page<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Display> fmt::Display for Page<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<Page: [")?;
        for (i, item) in self.items.iter().take(DISPLAY_LIMIT).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item)?;
        }
        if self.items.len() > DISPLAY_LIMIT {
            f.write_str(" (remaining truncated)")?;
        }
        f.write_str("]>")
    }
}
