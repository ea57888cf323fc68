pub mod fifo;
pub mod lfu;
pub mod lru;
pub(crate) mod order_list;
#[cfg(feature = "random")]
pub mod random;

use crate::error::ParsePolicyError;

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Selects which entry is removed when a full cache admits a new key.
///
/// The policy is an explicit construction-time value; nothing in this crate
/// reads it from process-wide state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EvictionPolicy {
  /// Evict the oldest inserted entry, regardless of access.
  #[cfg_attr(feature = "serde", serde(rename = "FIFO", alias = "fifo", alias = "Fifo"))]
  Fifo,
  /// Evict a uniformly random entry.
  #[cfg_attr(feature = "serde", serde(rename = "Random", alias = "random", alias = "RANDOM"))]
  Random,
  /// Evict the least recently used entry.
  #[default]
  #[cfg_attr(feature = "serde", serde(rename = "LRU", alias = "lru", alias = "Lru"))]
  Lru,
  /// Evict the least frequently used entry.
  #[cfg_attr(feature = "serde", serde(rename = "LFU", alias = "lfu", alias = "Lfu"))]
  Lfu,
}

impl EvictionPolicy {
  pub const ALL: [EvictionPolicy; 4] = [
    EvictionPolicy::Fifo,
    EvictionPolicy::Random,
    EvictionPolicy::Lru,
    EvictionPolicy::Lfu,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      EvictionPolicy::Fifo => "FIFO",
      EvictionPolicy::Random => "Random",
      EvictionPolicy::Lru => "LRU",
      EvictionPolicy::Lfu => "LFU",
    }
  }
}

impl fmt::Display for EvictionPolicy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for EvictionPolicy {
  type Err = ParsePolicyError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    EvictionPolicy::ALL
      .into_iter()
      .find(|policy| policy.as_str().eq_ignore_ascii_case(trimmed))
      .ok_or_else(|| ParsePolicyError {
        input: s.to_owned(),
      })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_names_case_insensitively() {
    assert_eq!("FIFO".parse(), Ok(EvictionPolicy::Fifo));
    assert_eq!("random".parse(), Ok(EvictionPolicy::Random));
    assert_eq!(" Lru ".parse(), Ok(EvictionPolicy::Lru));
    assert_eq!("lfu".parse(), Ok(EvictionPolicy::Lfu));
  }

  #[test]
  fn rejects_unknown_names() {
    let err = "MRU".parse::<EvictionPolicy>().unwrap_err();
    assert!(err.to_string().contains("MRU"));
  }

  #[test]
  fn display_round_trips_through_from_str() {
    for policy in EvictionPolicy::ALL {
      assert_eq!(policy.to_string().parse(), Ok(policy));
    }
  }
}
