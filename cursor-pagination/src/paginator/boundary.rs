//! Boundary predicate construction
//!
//! Keyset pagination needs "records strictly after position `p` in ordering
//! `S`". For a three-field ordering that is the lexicographic comparison
//!
//! ```text
//! (a.0 > p.0)
//!   OR (a.0 = p.0 AND a.1 > p.1)
//!   OR (a.0 = p.0 AND a.1 = p.1 AND a.2 > p.2)
//! ```
//!
//! expressed without relying on tuple comparison or short-circuiting in the
//! store. Each field flips `>` to `<` when it is descending or when walking
//! backwards, and nullable fields add explicit `IS NULL` / `IS NOT NULL`
//! branches because null sorts as the lowest value of every field.

use crate::cursor::{Position, PositionValue};
use crate::error::{Error, Result};
use crate::repository::{FieldSchema, FilterCondition, Predicate, SortSpec};

/// Which side of a position to select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Traversal {
    /// Records after the position in sort order (`after`)
    #[default]
    Forward,
    /// Records before the position in sort order (`before`)
    Backward,
}

impl Traversal {
    /// Whether this walks against the sort order
    #[must_use]
    pub const fn is_backward(self) -> bool {
        matches!(self, Self::Backward)
    }
}

/// Build the predicate selecting records strictly beyond `position`
///
/// `schema` resolves each sort field to its declared kind and nullability.
/// The result is an OR of one branch per field; a branch compares its field
/// and requires equality on every field before it. An OR with no branches
/// (for example a null position on a single descending field walked forward)
/// matches nothing.
///
/// # Errors
///
/// - [`Error::InvalidRequest`] when the ordering is empty or names a field
///   `schema` does not know.
/// - [`Error::InvalidCursor`] when the position has the wrong number of
///   values, holds null for a non-nullable field, or holds a value that does
///   not parse as its field's kind.
pub fn boundary_predicate<F>(
    ordering: &SortSpec,
    position: &Position,
    traversal: Traversal,
    schema: F,
) -> Result<Predicate>
where
    F: Fn(&str) -> Option<FieldSchema>,
{
    if ordering.is_empty() {
        return Err(Error::invalid_request("ordering must name at least one field"));
    }
    if position.len() != ordering.len() {
        return Err(Error::invalid_cursor(format!(
            "cursor holds {} values but the ordering has {} fields",
            position.len(),
            ordering.len()
        )));
    }

    let reverse = traversal.is_backward();
    let mut equalities: Vec<Predicate> = Vec::with_capacity(ordering.len());
    let mut branches: Vec<Predicate> = Vec::with_capacity(ordering.len());

    for (sort, slot) in ordering.iter().zip(position) {
        let field = sort.field.as_str();
        let declared = schema(field)
            .ok_or_else(|| Error::invalid_request(format!("unknown sort field {:?}", field)))?;
        let is_reversed = sort.direction.is_descending();

        match slot {
            PositionValue::Null => {
                if !declared.nullable {
                    return Err(Error::invalid_cursor(format!(
                        "null value for non-nullable field {:?}",
                        field
                    )));
                }

                // Nulls come first in this traversal, so every non-null value is beyond
                if reverse == is_reversed {
                    branches.push(with_prefix(
                        FilterCondition::is_not_null(field).into(),
                        &equalities,
                    ));
                }
                equalities.push(FilterCondition::is_null(field).into());
            }
            PositionValue::Value(raw) => {
                let value = declared.kind.parse(raw).map_err(|e| {
                    Error::invalid_cursor(format!("field {:?}: {}", field, e))
                })?;

                let towards_nulls = reverse != is_reversed;
                let mut comparison: Predicate = if towards_nulls {
                    FilterCondition::lt(field, value.clone()).into()
                } else {
                    FilterCondition::gt(field, value.clone()).into()
                };
                if declared.nullable && towards_nulls {
                    comparison = comparison.or(FilterCondition::is_null(field).into());
                }

                branches.push(with_prefix(comparison, &equalities));
                equalities.push(FilterCondition::eq(field, value).into());
            }
        }

        tracing::trace!(
            field,
            direction = %sort.direction,
            branches = branches.len(),
            "boundary field folded"
        );
    }

    let predicate = Predicate::any(branches);
    tracing::debug!(
        ordering = %ordering,
        ?traversal,
        predicate = %predicate,
        conditions = predicate.condition_count(),
        "boundary predicate built"
    );
    Ok(predicate)
}

fn with_prefix(comparison: Predicate, equalities: &[Predicate]) -> Predicate {
    let mut conjunction = Vec::with_capacity(equalities.len() + 1);
    conjunction.push(comparison);
    conjunction.extend_from_slice(equalities);
    Predicate::all(conjunction)
}
