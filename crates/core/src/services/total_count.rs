//! Per-request total count cache.
//!
//! The planner often learns the total size of a sequence while building a
//! window, either by counting or by deriving it from a short slice. The
//! `totalCount` field is resolved later and separately; the cache lets it
//! reuse that value instead of counting again.
//!
//! A [`TotalCountCache`] lives for exactly one external operation. Each
//! paginated field gets its own [`TotalCountSlot`], keyed by the field's
//! response path, so two connections in one operation never overwrite
//! each other's totals.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::StorageResult;
use crate::metrics::{record_cache_hit, record_count_query};
use crate::ports::Sequence;

/// Holds the resolved total of one paginated field.
#[derive(Debug, Default)]
pub struct TotalCountSlot {
    value: Mutex<Option<u64>>,
}

impl TotalCountSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a total, overwriting any previous value.
    pub fn set(&self, total: u64) {
        *self.value.lock() = Some(total);
    }

    pub fn get(&self) -> Option<u64> {
        *self.value.lock()
    }
}

/// All total count slots of one external operation.
#[derive(Debug, Default)]
pub struct TotalCountCache {
    slots: Mutex<HashMap<String, Arc<TotalCountSlot>>>,
}

impl TotalCountCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot for the field at `key`, created empty on first use.
    pub fn slot(&self, key: &str) -> Arc<TotalCountSlot> {
        let mut slots = self.slots.lock();
        match slots.get(key) {
            Some(slot) => slot.clone(),
            None => {
                let slot = Arc::new(TotalCountSlot::new());
                slots.insert(key.to_string(), slot.clone());
                slot
            }
        }
    }

    /// Number of fields that asked for a slot.
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Return the cached total, or count the sequence and cache the result.
pub async fn resolve_total_count<S>(slot: &TotalCountSlot, sequence: &S) -> StorageResult<u64>
where
    S: Sequence + ?Sized,
{
    if let Some(total) = slot.get() {
        record_cache_hit();
        return Ok(total);
    }

    let total = sequence.count().await?;
    record_count_query();
    slot.set(total);
    Ok(total)
}

/// Deferred `totalCount` of a connection.
///
/// Keeps the (possibly reordered) sequence alive so the total can still
/// be counted when the planner did not resolve it.
pub struct TotalCountResolver<S> {
    sequence: Arc<S>,
    slot: Arc<TotalCountSlot>,
}

impl<S: Sequence> TotalCountResolver<S> {
    pub fn new(sequence: Arc<S>, slot: Arc<TotalCountSlot>) -> Self {
        Self { sequence, slot }
    }

    pub async fn resolve(&self) -> StorageResult<u64> {
        resolve_total_count(&self.slot, self.sequence.as_ref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fruits, CountingSequence};

    #[test]
    fn set_overwrites_unconditionally() {
        let slot = TotalCountSlot::new();
        assert_eq!(slot.get(), None);
        slot.set(8);
        slot.set(3);
        assert_eq!(slot.get(), Some(3));
    }

    #[test]
    fn slots_are_keyed_by_field_path() {
        let cache = TotalCountCache::new();
        cache.slot("items").set(8);
        cache.slot("itemsLimited").set(3);

        assert_eq!(cache.slot("items").get(), Some(8));
        assert_eq!(cache.slot("itemsLimited").get(), Some(3));
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn cache_hit_skips_count() {
        let seq = CountingSequence::new(fruits());
        let slot = TotalCountSlot::new();
        slot.set(42);

        assert_eq!(resolve_total_count(&slot, &seq).await.unwrap(), 42);
        assert_eq!(seq.calls.counted(), 0);
    }

    #[tokio::test]
    async fn cache_miss_counts_once_then_hits() {
        let seq = Arc::new(CountingSequence::new(fruits()));
        let resolver = TotalCountResolver::new(seq.clone(), Arc::new(TotalCountSlot::new()));

        assert_eq!(resolver.resolve().await.unwrap(), 8);
        assert_eq!(resolver.resolve().await.unwrap(), 8);
        assert_eq!(seq.calls.counted(), 1);
    }

    #[tokio::test]
    async fn failing_fallback_count_propagates() {
        let seq = CountingSequence::new(fruits()).failing_count();
        let slot = TotalCountSlot::new();

        let err = resolve_total_count(&slot, &seq).await.unwrap_err();
        assert!(err.to_string().contains("count unavailable"));
        assert_eq!(slot.get(), None);
    }
}
