/// Which collaborator a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
  Cache,
  Store,
}

impl std::fmt::Display for Layer {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Layer::Cache => f.write_str("cache"),
      Layer::Store => f.write_str("store"),
    }
  }
}

/// Errors surfaced by [`CacheAside`](crate::CacheAside).
#[derive(Debug, thiserror::Error)]
pub enum AsideError {
  /// The key is absent from both the cache and the store.
  #[error("{key}: item does not exist in cache or store")]
  NotFound { key: String },

  /// The caller's token fired, or a collaborator reported cancellation.
  #[error("operation cancelled: {0}")]
  Cancelled(String),

  /// A payload already accepted into the cache or store failed to decode.
  /// This means the data was written in an incompatible format elsewhere; it
  /// is never reported as a miss.
  #[error("{key}: stored payload failed to decode")]
  Decode {
    key: String,
    #[source]
    source: serde_json::Error,
  },

  /// The value could not be serialized before a write.
  #[error("{key}: value failed to encode")]
  Encode {
    key: String,
    #[source]
    source: serde_json::Error,
  },

  /// A collaborator failed in a way that is neither a miss nor a
  /// cancellation.
  #[error("{layer} call failed: {message}")]
  Internal { layer: Layer, message: String },
}

impl AsideError {
  pub fn is_not_found(&self) -> bool {
    matches!(self, AsideError::NotFound { .. })
  }

  pub fn is_cancelled(&self) -> bool {
    matches!(self, AsideError::Cancelled(_))
  }
}
