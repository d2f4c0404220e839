//! Port traits for paginated collections.
//!
//! A [`Sequence`] is whatever the host hands to the planner: a query
//! against a database table, an in-memory vector, a remote listing. It is
//! owned by one request and dropped once the field is resolved.

use async_trait::async_trait;

use crate::error::{PaginationResult, StorageResult};

use super::pagination::{SliceBounds, SortKey};

/// An ordered, sliceable, countable collection.
///
/// `materialize` and `count` may both hit the backing store. The planner
/// calls them strictly one after the other and calls `count` at most once
/// per window.
#[async_trait]
pub trait Sequence: Send + Sync {
    /// Element type. Each element carries its own identifying field.
    type Item: Send;

    /// Fetch the elements inside `bounds`, in sequence order.
    async fn materialize(&self, bounds: SliceBounds) -> StorageResult<Vec<Self::Item>>;

    /// Count every element of the sequence.
    ///
    /// Potentially expensive (a full scan on most stores).
    async fn count(&self) -> StorageResult<u64>;

    /// Reorder by a normalized sort key.
    ///
    /// Fails with [`crate::error::PaginationError::UnknownOrderingField`]
    /// when the field does not exist on the element type.
    fn order_by(self, key: &SortKey) -> PaginationResult<Self>
    where
        Self: Sized;
}

/// Custom ordering capability for an element type.
///
/// Registered next to a connection when the generic field ordering of the
/// sequence cannot express the wanted order, e.g. ordering by a computed
/// or related value. When present it replaces [`Sequence::order_by`].
pub trait OrderableBy<S>: Send + Sync {
    fn order(&self, sequence: S, key: &SortKey) -> PaginationResult<S>;
}

impl<S, F> OrderableBy<S> for F
where
    F: Fn(S, &SortKey) -> PaginationResult<S> + Send + Sync,
{
    fn order(&self, sequence: S, key: &SortKey) -> PaginationResult<S> {
        self(sequence, key)
    }
}
