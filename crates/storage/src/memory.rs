//! In-memory sequence adapter.
//!
//! Backs a connection with a plain vector. Useful for small static
//! collections and for tests that need a store without a database.

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use pagewise_core::error::{PaginationError, PaginationResult, StorageResult};
use pagewise_core::ports::{Sequence, SliceBounds, SortKey};

/// A sortable field value.
///
/// Variant order is part of the ordering: values of different kinds sort
/// by kind, and `Null` sorts after everything else when ascending.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
    Null,
}

/// A row that exposes its fields by their store-side (snake_case) names.
pub trait Record: Clone + Send + Sync {
    /// Names accepted by [`Record::field`].
    const FIELDS: &'static [&'static str];

    /// Value of a field, `None` for unknown names.
    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// Vector-backed [`Sequence`].
#[derive(Debug, Clone)]
pub struct MemorySequence<T> {
    rows: Vec<T>,
}

impl<T: Record> MemorySequence<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }
}

impl<T: Record> FromIterator<T> for MemorySequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[async_trait]
impl<T: Record> Sequence for MemorySequence<T> {
    type Item = T;

    async fn materialize(&self, bounds: SliceBounds) -> StorageResult<Vec<T>> {
        let start = usize::try_from(bounds.offset).unwrap_or(usize::MAX);
        let rows = self.rows.iter().skip(start);
        Ok(match bounds.length {
            Some(length) => rows
                .take(usize::try_from(length).unwrap_or(usize::MAX))
                .cloned()
                .collect(),
            None => rows.cloned().collect(),
        })
    }

    async fn count(&self) -> StorageResult<u64> {
        Ok(self.rows.len() as u64)
    }

    fn order_by(mut self, key: &SortKey) -> PaginationResult<Self> {
        if !T::FIELDS.contains(&key.field.as_str()) {
            return Err(PaginationError::UnknownOrderingField(key.field.clone()));
        }

        let field = key.field.as_str();
        let compare = |a: &T, b: &T| -> Ordering {
            let (a, b) = (a.field(field), b.field(field));
            a.cmp(&b)
        };

        // Stable, so rows with equal keys keep their natural order.
        if key.is_descending() {
            self.rows.sort_by(|a, b| compare(b, a));
        } else {
            self.rows.sort_by(compare);
        }
        Ok(self)
    }
}
