//! Core layer for pagewise.
//!
//! Offset/limit pagination over lazy, countable sequences, shaped for
//! GraphQL connections (`results`, `pageInfo`, `totalCount`). The core
//! avoids counting the whole collection whenever the fetched slice already
//! proves where the collection ends.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     pagewise (binary)                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │        pagewise-graphql        │      pagewise-storage      │
//! │   (connection fields, API)     │  (memory / PostgreSQL)     │
//! ├────────────────────────────────┴────────────────────────────┤
//! │                    pagewise-core  ← YOU ARE HERE            │
//! │            (ports, ordering, planner, cache)                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`ports`] - The [`ports::Sequence`] trait adapters implement, and
//!   the shared pagination types
//! - [`services`] - Ordering normalizer, window planner, total count
//!   cache and connection assembly
//! - [`error`] - Error types
//! - [`metrics`] - Prometheus metrics definitions
//!
//! # Resolving a field
//!
//! 1. Normalize the ordering directive (`"createdAt, desc"`) and reorder
//! 2. Plan the window: fetch the slice, then derive or count the total
//! 3. Store the total in the field's [`services::TotalCountSlot`]
//! 4. Resolve `totalCount` later from the slot, counting only on a miss
//!
//! ```ignore
//! let cache = TotalCountCache::new();
//! let request = WindowRequest::new(Some(3), 6).with_ordering("name, asc");
//! let conn = paginate(sequence, &request, &config, None, cache.slot("items")).await?;
//! let total = conn.total_count().await?;
//! ```

pub mod error;
pub mod metrics;
pub mod ports;
pub mod services;

#[cfg(test)]
mod test_support;
