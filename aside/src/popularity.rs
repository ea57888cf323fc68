use std::collections::HashMap;

use ahash::RandomState;
use parking_lot::Mutex;

/// A lock-guarded tally of how often each name was booked or requested.
#[derive(Debug, Default)]
pub struct PopularityTable {
  counts: Mutex<HashMap<String, u64, RandomState>>,
}

impl PopularityTable {
  pub fn new() -> Self {
    Self::default()
  }

  /// Increments the tally for `name`, returning the new count.
  pub fn bump(&self, name: &str) -> u64 {
    let mut counts = self.counts.lock();
    let count = counts.entry(name.to_owned()).or_insert(0);
    *count += 1;
    *count
  }

  pub fn count(&self, name: &str) -> u64 {
    self.counts.lock().get(name).copied().unwrap_or(0)
  }

  /// Returns up to `k` names by descending count. Equal counts are ordered by
  /// name so the result does not depend on map iteration order.
  pub fn top_k(&self, k: usize) -> Vec<String> {
    let mut ranked: Vec<(String, u64)> = self
      .counts
      .lock()
      .iter()
      .map(|(name, count)| (name.clone(), *count))
      .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.into_iter().take(k).map(|(name, _)| name).collect()
  }
}
