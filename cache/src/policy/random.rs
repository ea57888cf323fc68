#![cfg(feature = "random")]

use crate::contract::Cache;
use crate::error::CacheError;
use crate::item::CacheItem;
use crate::metrics::{Metrics, MetricsSnapshot};

use std::collections::HashMap;
use std::sync::Arc;

use ahash::RandomState;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;

#[derive(Debug)]
struct Inner {
  items: HashMap<String, Arc<CacheItem>, RandomState>,
  rng: StdRng,
}

/// A cache that evicts a uniformly random entry when it is full.
///
/// There is no ordering structure: the key map is the whole state, and `get`
/// is a pure lookup. The RNG lives under the same lock as the map.
#[derive(Debug)]
pub struct RandomCache {
  capacity: usize,
  state: Mutex<Inner>,
  metrics: Metrics,
}

impl RandomCache {
  pub fn new(capacity: usize) -> Self {
    Self::with_parts(capacity, RandomState::new(), StdRng::from_os_rng())
  }

  /// Creates a cache whose victim sequence is reproducible for a given seed.
  ///
  /// Both the RNG and the map's hasher are derived from `seed`, since the
  /// victim is picked by position in the map's iteration order.
  pub fn with_seed(capacity: usize, seed: u64) -> Self {
    let hasher = RandomState::with_seeds(
      seed,
      seed.rotate_left(16),
      seed.rotate_left(32),
      seed.rotate_left(48),
    );
    Self::with_parts(capacity, hasher, StdRng::seed_from_u64(seed))
  }

  fn with_parts(capacity: usize, hasher: RandomState, rng: StdRng) -> Self {
    tracing::info!(policy = "Random", capacity, "eviction policy: random cache");
    Self {
      capacity,
      state: Mutex::new(Inner {
        items: HashMap::with_hasher(hasher),
        rng,
      }),
      metrics: Metrics::new(),
    }
  }
}

impl Cache for RandomCache {
  fn len(&self) -> usize {
    self.state.lock().items.len()
  }

  fn capacity(&self) -> usize {
    self.capacity
  }

  fn get(&self, key: &str) -> Result<Arc<CacheItem>, CacheError> {
    let found = self.state.lock().items.get(key).cloned();
    self.metrics.record_lookup(found.is_some());
    found.ok_or(CacheError::ItemNotFound)
  }

  fn set(&self, item: CacheItem) {
    if self.capacity == 0 {
      return;
    }

    let mut guard = self.state.lock();
    let state = &mut *guard;

    if let Some(slot) = state.items.get_mut(item.key()) {
      *slot = Arc::new(item);
      self.metrics.record_update();
      return;
    }

    if state.items.len() >= self.capacity {
      let victim = state.items.keys().choose(&mut state.rng).cloned();
      if let Some(victim) = victim {
        state.items.remove(&victim);
        tracing::trace!(key = %victim, "random evicted entry");
        self.metrics.record_eviction();
      }
    }

    state.items.insert(item.key().to_owned(), Arc::new(item));
    self.metrics.record_insert();
  }

  fn delete(&self, key: &str) -> Result<(), CacheError> {
    self
      .state
      .lock()
      .items
      .remove(key)
      .map(|_| self.metrics.record_invalidation())
      .ok_or(CacheError::ItemNotFound)
  }

  fn clear(&self) {
    self.state.lock().items.clear();
    self.metrics.record_clear();
  }

  fn metrics(&self) -> MetricsSnapshot {
    self.metrics.snapshot(self.len(), self.capacity)
  }
}
