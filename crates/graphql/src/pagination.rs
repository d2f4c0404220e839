//! Offset/limit pagination for GraphQL fields.
//!
//! Every paginated field takes the same three arguments:
//!
//! ```graphql
//! items(limit: Int, offset: Int, ordering: String): ItemNodeConnection
//! ```
//!
//! and resolves through [`resolve_connection`], which keys the field's
//! total count slot by its response path.

use std::sync::Arc;

use async_graphql::{Context, Request};
use tracing::debug;

use pagewise_core::error::PaginationError;
use pagewise_core::ports::{OrderableBy, Sequence, WindowRequest};
use pagewise_core::services::{
    paginate, Connection, PaginationConfig, TotalCountCache, TotalCountSlot,
};

/// Raw pagination arguments as received by a resolver.
#[derive(Debug, Clone, Default)]
pub struct PaginationArgs {
    pub limit: Option<i32>,
    pub offset: Option<i32>,
    pub ordering: Option<String>,
}

impl From<PaginationArgs> for WindowRequest {
    fn from(args: PaginationArgs) -> Self {
        WindowRequest {
            limit: args.limit.map(i64::from),
            offset: args.offset.map(i64::from).unwrap_or(0),
            ordering: args.ordering,
        }
    }
}

/// Attach a fresh total count cache to a request.
///
/// Call once per incoming operation; the cache must not outlive it.
pub fn with_total_count_cache(request: Request) -> Request {
    request.data(TotalCountCache::new())
}

/// Resolve a paginated field: order, plan the window, assemble the connection.
pub async fn resolve_connection<S: Sequence>(
    ctx: &Context<'_>,
    sequence: S,
    args: PaginationArgs,
    config: &PaginationConfig,
    custom_ordering: Option<&dyn OrderableBy<S>>,
) -> async_graphql::Result<Connection<S>> {
    let request = WindowRequest::from(args);
    let slot = total_count_slot(ctx);

    paginate(sequence, &request, config, custom_ordering, slot)
        .await
        .map_err(into_graphql_error)
}

/// Convert a pagination error, keeping its message verbatim.
pub fn into_graphql_error(err: PaginationError) -> async_graphql::Error {
    async_graphql::Error::new(err.to_string())
}

fn total_count_slot(ctx: &Context<'_>) -> Arc<TotalCountSlot> {
    match ctx.data_opt::<TotalCountCache>() {
        Some(cache) => {
            let key = ctx
                .path_node
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default();
            cache.slot(&key)
        }
        None => {
            debug!("No total count cache on request, using a detached slot");
            Arc::new(TotalCountSlot::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_defaults_to_zero() {
        let request = WindowRequest::from(PaginationArgs {
            limit: Some(3),
            offset: None,
            ordering: Some("name, asc".into()),
        });
        assert_eq!(request.limit, Some(3));
        assert_eq!(request.offset, 0);
        assert_eq!(request.ordering.as_deref(), Some("name, asc"));
    }

    #[test]
    fn error_message_is_kept() {
        let err = into_graphql_error(PaginationError::InvalidLimit(
            pagewise_core::error::LIMIT_NOT_POSITIVE.into(),
        ));
        assert!(err.message.contains("positive integer"));
    }
}
