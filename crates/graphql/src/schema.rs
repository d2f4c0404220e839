//! GraphQL schema definition.
//!
//! Exposes the `items` collection twice: `items` capped at
//! [`DEFAULT_HARD_LIMIT`] rows per page and `itemsLimited` capped at
//! [`LIMITED_HARD_LIMIT`].

use async_graphql::{Context, EmptyMutation, EmptySubscription, Object, Result, Schema, ID};
use chrono::{DateTime, Utc};

use pagewise_core::services::PaginationConfig;
use pagewise_storage::{Item as ItemModel, ItemSequence, ItemStore};

use crate::pagination::{resolve_connection, PaginationArgs};
use crate::types::PagewiseSchema;

// -----------------------------------------------------------------------------
// Schema Configuration
// -----------------------------------------------------------------------------

/// Maximum query depth to prevent deeply nested queries (DoS protection).
/// Note: GraphQL introspection requires depth ~13, so we use 15 to allow it.
pub const MAX_QUERY_DEPTH: usize = 15;

/// Maximum query complexity score (DoS protection).
pub const MAX_QUERY_COMPLEXITY: usize = 500;

/// Page size ceiling applied when a field has no explicit hard limit.
pub const DEFAULT_HARD_LIMIT: u64 = 100;

/// Page size ceiling of `itemsLimited`.
pub const LIMITED_HARD_LIMIT: u64 = 3;

// -----------------------------------------------------------------------------
// Schema Builder
// -----------------------------------------------------------------------------

/// Build the schema over an item store.
///
/// Includes query depth and complexity limits for DoS protection.
/// Requests must carry a total count cache, see
/// [`crate::with_total_count_cache`].
pub fn build_schema(query: ItemsQuery, store: ItemStore) -> PagewiseSchema {
    Schema::build(query, EmptyMutation, EmptySubscription)
        .data(store)
        .limit_depth(MAX_QUERY_DEPTH)
        .limit_complexity(MAX_QUERY_COMPLEXITY)
        .finish()
}

// -----------------------------------------------------------------------------
// Items Query
// -----------------------------------------------------------------------------

/// Query root for the `items` collection.
pub struct ItemsQuery {
    items: PaginationConfig,
    items_limited: PaginationConfig,
}

impl ItemsQuery {
    /// Use `hard_limit` for `items` instead of [`DEFAULT_HARD_LIMIT`].
    pub fn new(hard_limit: Option<u64>, warn_threshold: Option<u64>) -> Self {
        Self {
            items: PaginationConfig {
                hard_limit: hard_limit.or(Some(DEFAULT_HARD_LIMIT)),
                warn_threshold,
            },
            items_limited: PaginationConfig {
                hard_limit: Some(LIMITED_HARD_LIMIT),
                warn_threshold,
            },
        }
    }
}

impl Default for ItemsQuery {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[Object]
impl ItemsQuery {
    /// List items with limit/offset pagination.
    async fn items<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        #[graphql(desc = "Query limit")] limit: Option<i32>,
        #[graphql(desc = "Query offset")] offset: Option<i32>,
        #[graphql(desc = "Query order")] ordering: Option<String>,
    ) -> Result<ItemNodeConnection> {
        let store = ctx.data::<ItemStore>()?;
        let args = PaginationArgs {
            limit,
            offset,
            ordering,
        };

        let connection = resolve_connection(ctx, store.sequence(), args, &self.items, None).await?;
        Ok(ItemNodeConnection::from(connection))
    }

    /// List items, never more than three per page.
    async fn items_limited<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        #[graphql(desc = "Query limit")] limit: Option<i32>,
        #[graphql(desc = "Query offset")] offset: Option<i32>,
        #[graphql(desc = "Query order")] ordering: Option<String>,
    ) -> Result<ItemLimitedNodeConnection> {
        let store = ctx.data::<ItemStore>()?;
        let args = PaginationArgs {
            limit,
            offset,
            ordering,
        };

        let connection =
            resolve_connection(ctx, store.sequence(), args, &self.items_limited, None).await?;
        Ok(ItemLimitedNodeConnection::from(connection))
    }
}

// -----------------------------------------------------------------------------
// GraphQL Types
// -----------------------------------------------------------------------------

/// Item type.
#[derive(async_graphql::SimpleObject, Clone, Debug)]
pub struct Item {
    pub id: ID,
    pub name: String,
    pub value: i64,
    pub created_at: DateTime<Utc>,
}

impl From<ItemModel> for Item {
    fn from(item: ItemModel) -> Self {
        Self {
            id: ID(item.id.to_string()),
            name: item.name,
            value: item.value,
            created_at: item.created_at,
        }
    }
}

// -----------------------------------------------------------------------------
// Connection Types (offset pagination)
// -----------------------------------------------------------------------------

/// Page metadata of a connection.
#[derive(async_graphql::SimpleObject, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl From<pagewise_core::ports::PageInfo> for PageInfo {
    fn from(info: pagewise_core::ports::PageInfo) -> Self {
        Self {
            has_previous_page: info.has_previous_page,
            has_next_page: info.has_next_page,
        }
    }
}

/// Generate a connection object (`results`, `pageInfo`, `totalCount`) for
/// a node type over a sequence type, with a `From` impl from the core
/// connection.
///
/// `totalCount` is resolved lazily: from the field's cache slot when the
/// window already determined it, otherwise with one count.
#[macro_export]
macro_rules! define_connection {
    ($node:ty, $sequence:ty, $connection:ident, $name:tt) => {
        pub struct $connection {
            results: Vec<$node>,
            page_info: $crate::PageInfo,
            total: ::pagewise_core::services::TotalCountResolver<$sequence>,
        }

        impl From<::pagewise_core::services::Connection<$sequence>> for $connection {
            fn from(conn: ::pagewise_core::services::Connection<$sequence>) -> Self {
                let (results, page_info, total) = conn.into_parts();
                Self {
                    results: results.into_iter().map(<$node>::from).collect(),
                    page_info: page_info.into(),
                    total,
                }
            }
        }

        #[::async_graphql::Object(name = $name)]
        impl $connection {
            /// Elements of the requested window, in order.
            async fn results(&self) -> &Vec<$node> {
                &self.results
            }

            async fn page_info(&self) -> &$crate::PageInfo {
                &self.page_info
            }

            /// Total number of elements in the collection.
            async fn total_count(&self) -> ::async_graphql::Result<i64> {
                let total = self
                    .total
                    .resolve()
                    .await
                    .map_err(|e| ::async_graphql::Error::new(e.to_string()))?;
                Ok(total as i64)
            }
        }
    };
}

define_connection!(Item, ItemSequence, ItemNodeConnection, "ItemNodeConnection");
define_connection!(
    Item,
    ItemSequence,
    ItemLimitedNodeConnection,
    "ItemLimitedNodeConnection"
);
