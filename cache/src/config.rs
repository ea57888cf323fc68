use crate::builder::CacheBuilder;
use crate::error::{BuildError, ConfigError};
use crate::handles::PolicyCache;
use crate::policy::EvictionPolicy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Entry count used when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 10;

/// The construction-time settings of one cache instance.
///
/// Both fields are fixed for the lifetime of the cache built from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CacheConfig {
  /// Maximum number of entries. Zero yields a cache that never stores
  /// anything.
  pub capacity: usize,
  pub policy: EvictionPolicy,
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self {
      capacity: DEFAULT_CAPACITY,
      policy: EvictionPolicy::default(),
    }
  }
}

impl CacheConfig {
  pub fn new(capacity: usize, policy: EvictionPolicy) -> Self {
    Self { capacity, policy }
  }

  /// Resolves a config from `<PREFIX>_POLICY` and `<PREFIX>_CAPACITY`.
  ///
  /// With an empty prefix the variables are plain `POLICY` and `CAPACITY`.
  /// Unset variables fall back to the defaults; malformed ones are errors.
  pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
    Self::from_lookup(prefix, |name| std::env::var(name).ok())
  }

  /// Like [`from_env`](Self::from_env) but reads variables through `lookup`.
  pub fn from_lookup<F>(prefix: &str, lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut config = Self::default();

    let policy_var = var_name(prefix, "POLICY");
    if let Some(raw) = lookup(&policy_var) {
      config.policy = raw.parse().map_err(|source| ConfigError::InvalidPolicy {
        var: policy_var.clone(),
        source,
      })?;
    }

    let capacity_var = var_name(prefix, "CAPACITY");
    if let Some(raw) = lookup(&capacity_var) {
      config.capacity = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidCapacity {
          var: capacity_var.clone(),
          value: raw.clone(),
        })?;
    }

    tracing::debug!(
      policy = %config.policy,
      capacity = config.capacity,
      "resolved cache config"
    );
    Ok(config)
  }

  pub fn builder(&self) -> CacheBuilder {
    CacheBuilder::from_config(self)
  }

  pub fn build(&self) -> Result<PolicyCache, BuildError> {
    self.builder().build()
  }
}

fn var_name(prefix: &str, suffix: &str) -> String {
  let prefix = prefix.trim_matches('_');
  if prefix.is_empty() {
    return suffix.to_owned();
  }
  let normalized: String = prefix
    .chars()
    .map(|c| if c == '-' { '_' } else { c.to_ascii_uppercase() })
    .collect();
  format!("{}_{}", normalized, suffix)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect();
    move |name: &str| vars.get(name).cloned()
  }

  #[test]
  fn defaults_when_nothing_set() {
    let config = CacheConfig::from_lookup("detail", |_| None).unwrap();
    assert_eq!(config, CacheConfig::default());
    assert_eq!(config.capacity, DEFAULT_CAPACITY);
  }

  #[test]
  fn reads_prefixed_variables() {
    let lookup = lookup_from(&[
      ("RESERVATION_CACHE_POLICY", "lfu"),
      ("RESERVATION_CACHE_CAPACITY", "25"),
    ]);
    let config = CacheConfig::from_lookup("reservation-cache", lookup).unwrap();
    assert_eq!(config, CacheConfig::new(25, EvictionPolicy::Lfu));
  }

  #[test]
  fn empty_prefix_reads_bare_names() {
    let lookup = lookup_from(&[("POLICY", "FIFO")]);
    let config = CacheConfig::from_lookup("", lookup).unwrap();
    assert_eq!(config.policy, EvictionPolicy::Fifo);
  }

  #[test]
  fn malformed_values_are_errors() {
    let bad_policy = CacheConfig::from_lookup("x", lookup_from(&[("X_POLICY", "MRU")]));
    assert!(matches!(bad_policy, Err(ConfigError::InvalidPolicy { .. })));

    let bad_capacity = CacheConfig::from_lookup("x", lookup_from(&[("X_CAPACITY", "-1")]));
    assert!(matches!(
      bad_capacity,
      Err(ConfigError::InvalidCapacity { ref var, .. }) if var == "X_CAPACITY"
    ));
  }

  #[cfg(feature = "serde")]
  #[test]
  fn deserializes_with_policy_names_and_defaults() {
    let config: CacheConfig = serde_json::from_str(r#"{"policy":"LFU"}"#).unwrap();
    assert_eq!(config, CacheConfig::new(DEFAULT_CAPACITY, EvictionPolicy::Lfu));

    let config: CacheConfig = serde_json::from_str(r#"{"capacity":0,"policy":"fifo"}"#).unwrap();
    assert_eq!(config, CacheConfig::new(0, EvictionPolicy::Fifo));
  }
}
