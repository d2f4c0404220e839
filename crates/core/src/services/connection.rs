//! Connection assembly.
//!
//! Wraps a planned window into the externally visible connection shape:
//! results, page info and a deferred total count.

use std::sync::Arc;

use crate::error::{PaginationResult, StorageResult};
use crate::ports::{OrderableBy, PageInfo, Sequence, WindowRequest};

use super::ordering::normalize;
use super::total_count::{TotalCountResolver, TotalCountSlot};
use super::window::{CountStrategy, PaginationConfig, Window, WindowPlanner};

/// One resolved page of a sequence.
pub struct Connection<S: Sequence> {
    /// Exactly the materialized window, in sequence order.
    pub results: Vec<S::Item>,
    pub page_info: PageInfo,
    pub strategy: CountStrategy,
    total: TotalCountResolver<S>,
}

impl<S: Sequence> Connection<S> {
    pub fn new(window: Window<S::Item>, sequence: Arc<S>, slot: Arc<TotalCountSlot>) -> Self {
        Self {
            results: window.items,
            page_info: window.page_info,
            strategy: window.strategy,
            total: TotalCountResolver::new(sequence, slot),
        }
    }

    /// Total number of elements, from the cache or a fresh count.
    pub async fn total_count(&self) -> StorageResult<u64> {
        self.total.resolve().await
    }

    /// Split into results, page info and the deferred total.
    pub fn into_parts(self) -> (Vec<S::Item>, PageInfo, TotalCountResolver<S>) {
        (self.results, self.page_info, self.total)
    }
}

/// Order, plan and assemble one connection.
///
/// Ordering is normalized first so a malformed directive fails before
/// any data is fetched. The resolved total, if any, lands in `slot`.
pub async fn paginate<S: Sequence>(
    sequence: S,
    request: &WindowRequest,
    config: &PaginationConfig,
    custom_ordering: Option<&dyn OrderableBy<S>>,
    slot: Arc<TotalCountSlot>,
) -> PaginationResult<Connection<S>> {
    let sequence = normalize(sequence, request.ordering.as_deref(), custom_ordering)?;

    let window = WindowPlanner::new(config.clone())
        .plan(&sequence, request.limit, request.offset, &slot)
        .await?;

    Ok(Connection::new(window, Arc::new(sequence), slot))
}
