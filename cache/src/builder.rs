use crate::config::CacheConfig;
use crate::error::BuildError;
use crate::handles::PolicyCache;
use crate::policy::fifo::FifoCache;
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
#[cfg(feature = "random")]
use crate::policy::random::RandomCache;
use crate::policy::EvictionPolicy;

/// A builder for creating [`PolicyCache`] instances.
#[derive(Debug, Clone)]
pub struct CacheBuilder {
  capacity: usize,
  policy: EvictionPolicy,
  seed: Option<u64>,
}

impl Default for CacheBuilder {
  fn default() -> Self {
    Self::from_config(&CacheConfig::default())
  }
}

impl CacheBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_config(config: &CacheConfig) -> Self {
    Self {
      capacity: config.capacity,
      policy: config.policy,
      seed: None,
    }
  }

  /// Sets the maximum number of entries. Zero is allowed and produces a cache
  /// on which every `set` is a no-op.
  pub fn capacity(mut self, capacity: usize) -> Self {
    self.capacity = capacity;
    self
  }

  /// Sets the eviction policy.
  pub fn policy(mut self, policy: EvictionPolicy) -> Self {
    self.policy = policy;
    self
  }

  /// Seeds victim selection for the `Random` policy. Other policies are
  /// deterministic and ignore it.
  pub fn seed(mut self, seed: u64) -> Self {
    self.seed = Some(seed);
    self
  }

  /// Builds the cache.
  ///
  /// Fails only if the requested policy was compiled out.
  pub fn build(self) -> Result<PolicyCache, BuildError> {
    let cache = match self.policy {
      EvictionPolicy::Fifo => PolicyCache::Fifo(FifoCache::new(self.capacity)),
      EvictionPolicy::Lru => PolicyCache::Lru(LruCache::new(self.capacity)),
      EvictionPolicy::Lfu => PolicyCache::Lfu(LfuCache::new(self.capacity)),
      #[cfg(feature = "random")]
      EvictionPolicy::Random => PolicyCache::Random(match self.seed {
        Some(seed) => RandomCache::with_seed(self.capacity, seed),
        None => RandomCache::new(self.capacity),
      }),
      #[cfg(not(feature = "random"))]
      EvictionPolicy::Random => return Err(BuildError::PolicyUnavailable(EvictionPolicy::Random)),
    };
    Ok(cache)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::contract::Cache;

  #[test]
  fn builds_each_policy() {
    for policy in EvictionPolicy::ALL {
      let cache = CacheBuilder::new().capacity(4).policy(policy).build().unwrap();
      assert_eq!(cache.policy(), policy);
      assert_eq!(cache.capacity(), 4);
      assert!(cache.is_empty());
    }
  }

  #[test]
  fn defaults_follow_cache_config() {
    let cache = CacheBuilder::default().build().unwrap();
    let config = CacheConfig::default();
    assert_eq!(cache.policy(), config.policy);
    assert_eq!(cache.capacity(), config.capacity);
  }

  #[test]
  fn seed_is_ignored_by_deterministic_policies() {
    let cache = CacheBuilder::new()
      .policy(EvictionPolicy::Lfu)
      .seed(9)
      .build()
      .unwrap();
    assert_eq!(cache.policy(), EvictionPolicy::Lfu);
  }
}
