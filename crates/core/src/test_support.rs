//! Instrumented in-memory sequence for unit tests.

use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{PaginationError, PaginationResult, StorageError, StorageResult};
use crate::ports::{Sequence, SliceBounds, SortKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fruit {
    pub id: u32,
    pub name: String,
    pub value: i64,
}

/// The eight-row fixture used throughout the tests.
pub fn fruits() -> Vec<Fruit> {
    [
        ("Apple", 10),
        ("Banana", 5),
        ("Cherry", 15),
        ("Date", 8),
        ("Elderberry", 12),
        ("Fig", 3),
        ("Grape", 20),
        ("Honeydew", 7),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, value))| Fruit {
        id: i as u32 + 1,
        name: name.to_string(),
        value,
    })
    .collect()
}

/// Counts every call that would reach a store.
#[derive(Debug, Default)]
pub struct Calls {
    pub materialize: AtomicUsize,
    pub count: AtomicUsize,
}

impl Calls {
    pub fn materialized(&self) -> usize {
        self.materialize.load(Ordering::SeqCst)
    }

    pub fn counted(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

/// Wrapper that counts materialize/count calls over a vector of fruits.
#[derive(Debug, Clone)]
pub struct CountingSequence {
    rows: Vec<Fruit>,
    pub calls: Arc<Calls>,
    fail_count: bool,
}

impl CountingSequence {
    pub fn new(rows: Vec<Fruit>) -> Self {
        Self {
            rows,
            calls: Arc::new(Calls::default()),
            fail_count: false,
        }
    }

    /// Make every `count` call fail.
    pub fn failing_count(mut self) -> Self {
        self.fail_count = true;
        self
    }
}

#[async_trait]
impl Sequence for CountingSequence {
    type Item = Fruit;

    async fn materialize(&self, bounds: SliceBounds) -> StorageResult<Vec<Fruit>> {
        self.calls.materialize.fetch_add(1, Ordering::SeqCst);
        let rows = self.rows.iter().skip(bounds.offset as usize);
        Ok(match bounds.length {
            Some(length) => rows.take(length as usize).cloned().collect(),
            None => rows.cloned().collect(),
        })
    }

    async fn count(&self) -> StorageResult<u64> {
        self.calls.count.fetch_add(1, Ordering::SeqCst);
        if self.fail_count {
            return Err(StorageError::QueryError("count unavailable".into()));
        }
        Ok(self.rows.len() as u64)
    }

    fn order_by(mut self, key: &SortKey) -> PaginationResult<Self> {
        let compare: fn(&Fruit, &Fruit) -> CmpOrdering = match key.field.as_str() {
            "id" => |a, b| a.id.cmp(&b.id),
            "name" => |a, b| a.name.cmp(&b.name),
            "value" => |a, b| a.value.cmp(&b.value),
            other => return Err(PaginationError::UnknownOrderingField(other.to_string())),
        };
        if key.is_descending() {
            self.rows.sort_by(|a, b| compare(b, a));
        } else {
            self.rows.sort_by(compare);
        }
        Ok(self)
    }
}

impl CountingSequence {
    pub fn names(&self) -> Vec<&str> {
        self.rows.iter().map(|f| f.name.as_str()).collect()
    }
}
