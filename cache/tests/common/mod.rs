#![allow(dead_code)]

use strata_cache::{CacheBuilder, CacheItem, EvictionPolicy, PolicyCache};

// Helper to build a cache for testing purposes. Random caches are seeded so
// failures reproduce.
pub fn build_test_cache(policy: EvictionPolicy, capacity: usize) -> PolicyCache {
  CacheBuilder::new()
    .policy(policy)
    .capacity(capacity)
    .seed(0x5eed)
    .build()
    .unwrap()
}

pub fn item(key: &str) -> CacheItem {
  CacheItem::new(key, format!("value-{}", key))
}

pub fn key(i: usize) -> String {
  format!("key{}", i)
}
