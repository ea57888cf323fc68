use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crossbeam_utils::CachePadded;

/// A thread-safe, internal metrics collector for one cache instance.
/// All fields are atomic so they can be bumped without extending the
/// critical section of the cache lock.
#[derive(Debug)]
pub(crate) struct Metrics {
  // --- Hit/Miss Ratios ---
  hits: CachePadded<AtomicU64>,
  misses: CachePadded<AtomicU64>,

  // --- Throughput ---
  inserts: CachePadded<AtomicU64>,
  updates: CachePadded<AtomicU64>,
  invalidations: CachePadded<AtomicU64>,
  clears: CachePadded<AtomicU64>,

  // --- Eviction Stats ---
  evicted_by_capacity: CachePadded<AtomicU64>,

  created_at: Instant,
}

// Manual implementation of Default to handle the non-default `Instant`.
impl Default for Metrics {
  fn default() -> Self {
    Self {
      hits: CachePadded::new(AtomicU64::new(0)),
      misses: CachePadded::new(AtomicU64::new(0)),
      inserts: CachePadded::new(AtomicU64::new(0)),
      updates: CachePadded::new(AtomicU64::new(0)),
      invalidations: CachePadded::new(AtomicU64::new(0)),
      clears: CachePadded::new(AtomicU64::new(0)),
      evicted_by_capacity: CachePadded::new(AtomicU64::new(0)),
      created_at: Instant::now(),
    }
  }
}

impl Metrics {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  #[inline]
  pub(crate) fn record_lookup(&self, hit: bool) {
    if hit {
      self.hits.fetch_add(1, Ordering::Relaxed);
    } else {
      self.misses.fetch_add(1, Ordering::Relaxed);
    }
  }

  #[inline]
  pub(crate) fn record_insert(&self) {
    self.inserts.fetch_add(1, Ordering::Relaxed);
  }

  #[inline]
  pub(crate) fn record_update(&self) {
    self.updates.fetch_add(1, Ordering::Relaxed);
  }

  #[inline]
  pub(crate) fn record_invalidation(&self) {
    self.invalidations.fetch_add(1, Ordering::Relaxed);
  }

  #[inline]
  pub(crate) fn record_eviction(&self) {
    self.evicted_by_capacity.fetch_add(1, Ordering::Relaxed);
  }

  #[inline]
  pub(crate) fn record_clear(&self) {
    self.clears.fetch_add(1, Ordering::Relaxed);
  }

  /// Creates a point-in-time snapshot of the current metrics.
  pub(crate) fn snapshot(&self, len: usize, capacity: usize) -> MetricsSnapshot {
    let hits = self.hits.load(Ordering::Relaxed);
    let misses = self.misses.load(Ordering::Relaxed);
    let total_lookups = hits + misses;

    MetricsSnapshot {
      hits,
      misses,
      hit_ratio: if total_lookups == 0 {
        0.0
      } else {
        hits as f64 / total_lookups as f64
      },
      inserts: self.inserts.load(Ordering::Relaxed),
      updates: self.updates.load(Ordering::Relaxed),
      invalidations: self.invalidations.load(Ordering::Relaxed),
      clears: self.clears.load(Ordering::Relaxed),
      evicted_by_capacity: self.evicted_by_capacity.load(Ordering::Relaxed),
      len,
      capacity,
      uptime_secs: self.created_at.elapsed().as_secs(),
    }
  }
}

/// A point-in-time, public-facing snapshot of a cache's metrics.
#[derive(Clone)]
pub struct MetricsSnapshot {
  /// The number of successful lookups.
  pub hits: u64,
  /// The number of failed lookups.
  pub misses: u64,
  /// The cache hit ratio (hits / (hits + misses)).
  pub hit_ratio: f64,
  /// The number of new keys inserted.
  pub inserts: u64,
  /// The number of overwrites of keys that were already present.
  pub updates: u64,
  /// The number of successful deletes.
  pub invalidations: u64,
  /// The number of `clear` calls.
  pub clears: u64,
  /// The number of entries evicted to make room for a new key.
  pub evicted_by_capacity: u64,
  /// The entry count at the time of the snapshot.
  pub len: usize,
  /// The configured capacity.
  pub capacity: usize,
  /// The number of seconds the cache has been running.
  pub uptime_secs: u64,
}

impl fmt::Debug for MetricsSnapshot {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MetricsSnapshot")
      .field("hits", &self.hits)
      .field("misses", &self.misses)
      .field("hit_ratio", &format!("{:.2}%", self.hit_ratio * 100.0))
      .field("inserts", &self.inserts)
      .field("updates", &self.updates)
      .field("invalidations", &self.invalidations)
      .field("clears", &self.clears)
      .field("evicted_by_capacity", &self.evicted_by_capacity)
      .field("len", &self.len)
      .field("capacity", &self.capacity)
      .field("uptime_secs", &self.uptime_secs)
      .finish()
  }
}
