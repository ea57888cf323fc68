use crate::contract::Cache;
use crate::error::CacheError;
use crate::item::CacheItem;
use crate::metrics::MetricsSnapshot;
use crate::policy::fifo::FifoCache;
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
#[cfg(feature = "random")]
use crate::policy::random::RandomCache;
use crate::policy::EvictionPolicy;

use std::sync::Arc;

/// A cache whose eviction policy was chosen at construction time.
///
/// This is what [`CacheBuilder`](crate::CacheBuilder) produces. It forwards
/// every call to the engine of the configured variant.
#[derive(Debug)]
pub enum PolicyCache {
  Fifo(FifoCache),
  #[cfg(feature = "random")]
  Random(RandomCache),
  Lru(LruCache),
  Lfu(LfuCache),
}

macro_rules! dispatch {
  ($self:ident, $cache:ident => $body:expr) => {
    match $self {
      PolicyCache::Fifo($cache) => $body,
      #[cfg(feature = "random")]
      PolicyCache::Random($cache) => $body,
      PolicyCache::Lru($cache) => $body,
      PolicyCache::Lfu($cache) => $body,
    }
  };
}

impl PolicyCache {
  /// The eviction policy this instance was built with.
  pub fn policy(&self) -> EvictionPolicy {
    match self {
      PolicyCache::Fifo(_) => EvictionPolicy::Fifo,
      #[cfg(feature = "random")]
      PolicyCache::Random(_) => EvictionPolicy::Random,
      PolicyCache::Lru(_) => EvictionPolicy::Lru,
      PolicyCache::Lfu(_) => EvictionPolicy::Lfu,
    }
  }
}

impl Cache for PolicyCache {
  fn len(&self) -> usize {
    dispatch!(self, c => c.len())
  }

  fn capacity(&self) -> usize {
    dispatch!(self, c => c.capacity())
  }

  fn get(&self, key: &str) -> Result<Arc<CacheItem>, CacheError> {
    dispatch!(self, c => c.get(key))
  }

  fn set(&self, item: CacheItem) {
    dispatch!(self, c => c.set(item))
  }

  fn delete(&self, key: &str) -> Result<(), CacheError> {
    dispatch!(self, c => c.delete(key))
  }

  fn clear(&self) {
    dispatch!(self, c => c.clear())
  }

  fn metrics(&self) -> MetricsSnapshot {
    dispatch!(self, c => c.metrics())
  }
}

impl From<FifoCache> for PolicyCache {
  fn from(cache: FifoCache) -> Self {
    PolicyCache::Fifo(cache)
  }
}

#[cfg(feature = "random")]
impl From<RandomCache> for PolicyCache {
  fn from(cache: RandomCache) -> Self {
    PolicyCache::Random(cache)
  }
}

impl From<LruCache> for PolicyCache {
  fn from(cache: LruCache) -> Self {
    PolicyCache::Lru(cache)
  }
}

impl From<LfuCache> for PolicyCache {
  fn from(cache: LfuCache) -> Self {
    PolicyCache::Lfu(cache)
  }
}
