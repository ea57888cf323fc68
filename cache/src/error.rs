use crate::policy::EvictionPolicy;

use std::fmt;

/// Errors returned by the operations of the [`Cache`](crate::Cache) contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
  /// The requested key is not present in the cache.
  ItemNotFound,
}

impl fmt::Display for CacheError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CacheError::ItemNotFound => write!(f, "cache miss"),
    }
  }
}

impl std::error::Error for CacheError {}

/// Errors that can occur when building a cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
  /// The requested policy was compiled out of this build (e.g. `Random`
  /// without the `random` feature).
  PolicyUnavailable(EvictionPolicy),
}

impl fmt::Display for BuildError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BuildError::PolicyUnavailable(policy) => {
        write!(f, "eviction policy {} is not enabled in this build", policy)
      }
    }
  }
}

impl std::error::Error for BuildError {}

/// The given string does not name a known eviction policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePolicyError {
  pub(crate) input: String,
}

impl fmt::Display for ParsePolicyError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "unrecognized cache policy '{}' (expected FIFO, Random, LRU or LFU)",
      self.input
    )
  }
}

impl std::error::Error for ParsePolicyError {}

/// Errors raised while resolving a [`CacheConfig`](crate::CacheConfig) from
/// the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
  InvalidPolicy { var: String, source: ParsePolicyError },
  InvalidCapacity { var: String, value: String },
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::InvalidPolicy { var, source } => write!(f, "{}: {}", var, source),
      ConfigError::InvalidCapacity { var, value } => write!(
        f,
        "{}: capacity must be a non-negative integer, got '{}'",
        var, value
      ),
    }
  }
}

impl std::error::Error for ConfigError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ConfigError::InvalidPolicy { source, .. } => Some(source),
      ConfigError::InvalidCapacity { .. } => None,
    }
  }
}
