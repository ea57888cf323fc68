#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The unit of stored data: an opaque key and an opaque byte payload.
///
/// Two items with the same key are the same cache entry; the payload plays no
/// part in identity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CacheItem {
  key: String,
  value: Vec<u8>,
}

impl CacheItem {
  pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
    Self {
      key: key.into(),
      value: value.into(),
    }
  }

  #[inline]
  pub fn key(&self) -> &str {
    &self.key
  }

  #[inline]
  pub fn value(&self) -> &[u8] {
    &self.value
  }

  /// Consumes the item, returning its key and payload.
  pub fn into_parts(self) -> (String, Vec<u8>) {
    (self.key, self.value)
  }
}
