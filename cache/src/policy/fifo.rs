use crate::contract::Cache;
use crate::error::CacheError;
use crate::item::CacheItem;
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::store::OrderedStore;

use std::sync::Arc;

use parking_lot::Mutex;

/// A cache that evicts entries in First-In, First-Out order.
///
/// Reads never change the order. Overwriting a present key replaces its
/// payload but keeps its original position, so the oldest *inserted* key is
/// always the next victim.
#[derive(Debug)]
pub struct FifoCache {
  capacity: usize,
  store: Mutex<OrderedStore<()>>,
  metrics: Metrics,
}

impl FifoCache {
  pub fn new(capacity: usize) -> Self {
    tracing::info!(policy = "FIFO", capacity, "eviction policy: FIFO cache");
    Self {
      capacity,
      store: Mutex::new(OrderedStore::new()),
      metrics: Metrics::new(),
    }
  }
}

impl Cache for FifoCache {
  fn len(&self) -> usize {
    self.store.lock().len()
  }

  fn capacity(&self) -> usize {
    self.capacity
  }

  fn get(&self, key: &str) -> Result<Arc<CacheItem>, CacheError> {
    let found = self.store.lock().lookup(key).map(|slot| slot.item.clone());
    self.metrics.record_lookup(found.is_some());
    found.ok_or(CacheError::ItemNotFound)
  }

  fn set(&self, item: CacheItem) {
    if self.capacity == 0 {
      return;
    }

    let mut store = self.store.lock();
    let item = match store.overwrite(item) {
      Ok(_) => {
        self.metrics.record_update();
        return;
      }
      Err(item) => item,
    };

    if store.len() >= self.capacity {
      // The front of the queue is the oldest insertion.
      if let Some(victim) = store.front().and_then(|handle| store.evict(handle)) {
        tracing::trace!(key = %victim, "fifo evicted oldest entry");
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
