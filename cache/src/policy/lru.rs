use crate::contract::Cache;
use crate::error::CacheError;
use crate::item::CacheItem;
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::store::OrderedStore;

use std::sync::Arc;

use parking_lot::Mutex;

/// A cache that evicts the least recently used entry.
///
/// Both a successful `get` and an overwrite count as a use and move the entry
/// to the back of the order in O(1).
#[derive(Debug)]
pub struct LruCache {
  capacity: usize,
  // Front is the least recently used entry.
  store: Mutex<OrderedStore<()>>,
  metrics: Metrics,
}

impl LruCache {
  pub fn new(capacity: usize) -> Self {
    tracing::info!(policy = "LRU", capacity, "eviction policy: LRU cache");
    Self {
      capacity,
      store: Mutex::new(OrderedStore::new()),
      metrics: Metrics::new(),
    }
  }
}

impl Cache for LruCache {
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
        store.promote(handle);
        self.metrics.record_update();
        return;
      }
      Err(item) => item,
    };

    if store.len() >= self.capacity {
      if let Some(victim) = store.front().and_then(|handle| store.evict(handle)) {
        tracing::trace!(key = %victim, "lru evicted least recently used entry");
        self.metrics.record_eviction();
      }
    }

    store.push_back(item, ());
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
