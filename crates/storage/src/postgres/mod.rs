//! PostgreSQL storage adapter.
//!
//! - [`Database`] - Connection pool and migrations
//! - [`PgSequence`] - [`pagewise_core::ports::Sequence`] over one table,
//!   described by a static [`PgSource`]
//!
//! # Usage
//!
//! ```ignore
//! let db = Database::connect(&DatabaseConfig::for_graphql(&database_url)).await?;
//! db.migrate().await?;
//!
//! let items: PgSequence<Item> = PgSequence::new(db.pool().clone(), &ITEMS);
//! ```

mod database;
mod sequence;

pub use database::{Database, DatabaseConfig};
pub use sequence::{PgSequence, PgSource};
