use crate::error::CacheError;
use crate::item::CacheItem;
use crate::metrics::MetricsSnapshot;

use std::sync::Arc;

/// A simple, capacity-bounded key-value cache.
///
/// Every eviction policy implements this trait, so callers can swap policies
/// without code changes. Each call is atomic with respect to every other call
/// on the same instance; sequences of calls are not.
pub trait Cache: Send + Sync {
  /// Returns the number of entries currently stored.
  fn len(&self) -> usize;

  /// Returns `true` if the cache holds no entries.
  fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Returns the maximum number of entries, fixed at construction.
  fn capacity(&self) -> usize;

  /// Retrieves the item stored under `key`.
  ///
  /// Recency- and frequency-based policies treat a hit as a use and update
  /// their eviction order accordingly.
  fn get(&self, key: &str) -> Result<Arc<CacheItem>, CacheError>;

  /// Inserts or overwrites the entry for `item.key()`.
  ///
  /// If the cache is full and the key is new, exactly one entry is evicted
  /// first. With a capacity of zero this is a no-op.
  fn set(&self, item: CacheItem);

  /// Removes the entry for `key`.
  fn delete(&self, key: &str) -> Result<(), CacheError>;

  /// Removes every entry and resets all eviction state.
  fn clear(&self);

  /// Returns a point-in-time snapshot of this instance's counters.
  fn metrics(&self) -> MetricsSnapshot;
}

impl<C: Cache + ?Sized> Cache for Arc<C> {
  fn len(&self) -> usize {
    (**self).len()
  }

  fn capacity(&self) -> usize {
    (**self).capacity()
  }

  fn get(&self, key: &str) -> Result<Arc<CacheItem>, CacheError> {
    (**self).get(key)
  }

  fn set(&self, item: CacheItem) {
    (**self).set(item)
  }

  fn delete(&self, key: &str) -> Result<(), CacheError> {
    (**self).delete(key)
  }

  fn clear(&self) {
    (**self).clear()
  }

  fn metrics(&self) -> MetricsSnapshot {
    (**self).metrics()
  }
}
