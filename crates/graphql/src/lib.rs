//! GraphQL API for paginated collections.
//!
//! Paginated fields take `limit`, `offset` and `ordering` arguments and
//! return a connection with `results`, `pageInfo` and `totalCount`.
//!
//! # Adding a Paginated Field
//!
//! Declare the connection type once, then resolve through
//! [`resolve_connection`]:
//!
//! ```ignore
//! pagewise_graphql::define_connection!(
//!     Item,
//!     ItemSequence,
//!     ItemNodeConnection,
//!     "ItemNodeConnection"
//! );
//!
//! async fn items(
//!     &self,
//!     ctx: &Context<'_>,
//!     limit: Option<i32>,
//!     offset: Option<i32>,
//!     ordering: Option<String>,
//! ) -> Result<ItemNodeConnection> {
//!     let sequence = ctx.data::<ItemStore>()?.sequence();
//!     let args = PaginationArgs { limit, offset, ordering };
//!     let connection = resolve_connection(ctx, sequence, args, &self.config, None).await?;
//!     Ok(connection.into())
//! }
//! ```
//!
//! Requests must be wrapped with [`with_total_count_cache`] before
//! execution; the server does this for every operation.

mod pagination;
mod schema;
mod server;
mod types;

pub use pagination::{
    into_graphql_error, resolve_connection, with_total_count_cache, PaginationArgs,
};
pub use schema::{
    build_schema, Item, ItemLimitedNodeConnection, ItemNodeConnection, ItemsQuery, PageInfo,
    DEFAULT_HARD_LIMIT, LIMITED_HARD_LIMIT, MAX_QUERY_COMPLEXITY, MAX_QUERY_DEPTH,
};
pub use server::{router, serve_with_shutdown, ServerConfig};
pub use types::PagewiseSchema;
