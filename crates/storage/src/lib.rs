//! Storage layer for pagewise.
//!
//! This crate provides [`pagewise_core::ports::Sequence`] implementations:
//!
//! - [`memory::MemorySequence`] - vector-backed, for static data and tests
//! - [`postgres::PgSequence`] - a lazily built `SELECT` over a PostgreSQL
//!   table, sliced with `LIMIT`/`OFFSET` and counted with `COUNT(*)`
//!
//! plus the `items` collection used by the demo API and the database
//! pool/migration wrapper.
//!
//! # Usage
//!
//! ```ignore
//! use pagewise_storage::{Database, DatabaseConfig, ItemStore};
//!
//! let db = Database::connect(&DatabaseConfig::for_graphql(&database_url)).await?;
//! db.migrate().await?;
//!
//! let store = ItemStore::Postgres(db.pool().clone());
//! let sequence = store.sequence();
//! ```

pub mod items;
pub mod memory;
pub mod postgres;

pub use items::{Item, ItemSequence, ItemStore, ITEMS};
pub use memory::{FieldValue, MemorySequence, Record};
pub use postgres::{Database, DatabaseConfig, PgSequence, PgSource};
