//! The `items` collection served by the demo API.
//!
//! The same rows can come from PostgreSQL or from memory; [`ItemStore`]
//! hands out a fresh [`ItemSequence`] per request either way.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use pagewise_core::error::{PaginationResult, StorageResult};
use pagewise_core::ports::{Sequence, SliceBounds, SortKey};

use crate::memory::{FieldValue, MemorySequence, Record};
use crate::postgres::{PgSequence, PgSource};

/// One row of the `items` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub value: i64,
    pub created_at: DateTime<Utc>,
}

impl Item {
    pub fn new(id: i64, name: impl Into<String>, value: i64) -> Self {
        Self {
            id,
            name: name.into(),
            value,
            created_at: Utc::now(),
        }
    }
}

impl Record for Item {
    const FIELDS: &'static [&'static str] = &["id", "name", "value", "created_at"];

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id)),
            "name" => Some(FieldValue::Text(self.name.clone())),
            "value" => Some(FieldValue::Int(self.value)),
            "created_at" => Some(FieldValue::Timestamp(self.created_at)),
            _ => None,
        }
    }
}

/// Table descriptor for `items`.
pub static ITEMS: PgSource = PgSource {
    table: "items",
    columns: &["id", "name", "value", "created_at"],
    sortable: &["id", "name", "value", "created_at"],
    key: "id",
};

/// Items from whichever backend the store was built with.
pub enum ItemSequence {
    Memory(MemorySequence<Item>),
    Postgres(PgSequence<Item>),
}

#[async_trait]
impl Sequence for ItemSequence {
    type Item = Item;

    async fn materialize(&self, bounds: SliceBounds) -> StorageResult<Vec<Item>> {
        match self {
            ItemSequence::Memory(seq) => seq.materialize(bounds).await,
            ItemSequence::Postgres(seq) => seq.materialize(bounds).await,
        }
    }

    async fn count(&self) -> StorageResult<u64> {
        match self {
            ItemSequence::Memory(seq) => seq.count().await,
            ItemSequence::Postgres(seq) => seq.count().await,
        }
    }

    fn order_by(self, key: &SortKey) -> PaginationResult<Self> {
        Ok(match self {
            ItemSequence::Memory(seq) => ItemSequence::Memory(seq.order_by(key)?),
            ItemSequence::Postgres(seq) => ItemSequence::Postgres(seq.order_by(key)?),
        })
    }
}

/// Source of item sequences, shared by all requests.
#[derive(Clone)]
pub enum ItemStore {
    Memory(Arc<Vec<Item>>),
    Postgres(PgPool),
}

impl ItemStore {
    pub fn in_memory(items: Vec<Item>) -> Self {
        ItemStore::Memory(Arc::new(items))
    }

    /// A new sequence over all items in natural (`id`) order.
    pub fn sequence(&self) -> ItemSequence {
        match self {
            ItemStore::Memory(items) => {
                ItemSequence::Memory(MemorySequence::new(items.to_vec()))
            }
            ItemStore::Postgres(pool) => {
                ItemSequence::Postgres(PgSequence::new(pool.clone(), &ITEMS))
            }
        }
    }
}
