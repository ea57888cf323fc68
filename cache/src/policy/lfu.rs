use crate::contract::Cache;
use crate::error::CacheError;
use crate::item::CacheItem;
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::store::OrderedStore;

use std::sync::Arc;

use generational_arena::Index;
use parking_lot::Mutex;

/// A cache that evicts the least frequently used entry.
///
/// Each entry carries an access count starting at zero. A successful `get`
/// increments it and relocates the entry to the back of the order. The
/// relocation alone never picks a victim: eviction scans the whole order for
/// the minimum count, and among equal counts the entry nearest the front
/// (the one promoted longest ago) loses.
///
/// The scan is O(n) in the number of entries. That is fine for the small
/// per-dataset capacities this cache targets; large capacities would want
/// frequency buckets with the same tie-break.
#[derive(Debug)]
pub struct LfuCache {
  capacity: usize,
  store: Mutex<OrderedStore<u64>>,
  metrics: Metrics,
}

impl LfuCache {
  pub fn new(capacity: usize) -> Self {
    tracing::info!(policy = "LFU", capacity, "eviction policy: LFU cache");
    Self {
      capacity,
      store: Mutex::new(OrderedStore::new()),
      metrics: Metrics::new(),
    }
  }
}

/// Finds the first entry, walking front to back, with the smallest count.
fn least_used(store: &OrderedStore<u64>) -> Option<Index> {
  let mut victim: Option<(Index, u64)> = None;
  for (index, tracked) in store.iter_order() {
    match victim {
      // Strictly-less keeps the earliest of equal counts.
      Some((_, min)) if tracked.meta >= min => {}
      _ => victim = Some((index, tracked.meta)),
    }
  }
  victim.map(|(index, _)| index)
}

impl Cache for LfuCache {
  fn len(&self) -> usize {
    self.store.lock().len()
  }

  fn capacity(&self) -> usize {
    self.capacity
  }

  fn get(&self, key: &str) -> Result<Arc<CacheItem>, CacheError> {
    let mut store = self.store.lock();
    let found = store
      .lookup(key)
      .map(|slot| (slot.item.clone(), slot.handle));

    match found {
      Some((item, handle)) => {
        if let Some(count) = store.meta_mut(handle) {
          *count = count.saturating_add(1);
        }
        store.promote(handle);
        self.metrics.record_lookup(true);
        Ok(item)
      }
      None => {
        self.metrics.record_lookup(false);
        Err(CacheError::ItemNotFound)
      }
    }
  }

  fn set(&self, item: CacheItem) {
    if self.capacity == 0 {
      return;
    }

    let mut store = self.store.lock();
    let item = match store.overwrite(item) {
      Ok(handle) => {
        // The accumulated count survives an overwrite.
        store.promote(handle);
        self.metrics.record_update();
        return;
      }
      Err(item) => item,
    };

    if store.len() >= self.capacity {
      if let Some(victim) = least_used(&store).and_then(|handle| store.evict(handle)) {
        tracing::trace!(key = %victim, "lfu evicted least frequently used entry");
        self.metrics.record_eviction();
      }
    }

    store.push_back(item, 0);
    self.metrics.record_insert();
  }

  fn delete(&self, key: &str) -> Result<(), CacheError> {
    self
      .store
      .lock()
      .remove(key)
      .map(|_| self.metrics.record_invalidation())
      .ok_or(CacheError::ItemNotFound)
  }

  fn clear(&self) {
    self.store.lock().clear();
    self.metrics.record_clear();
  }

  fn metrics(&self) -> MetricsSnapshot {
    self.metrics.snapshot(self.len(), self.capacity)
  }
}
