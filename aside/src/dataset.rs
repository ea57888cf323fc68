use crate::client::CacheClient;
use crate::coordinator::CacheAside;
use crate::error::AsideError;
use crate::keys::{KeyDeriver, UuidKeyDeriver};
use crate::store::RecordStore;

use crate::popularity::PopularityTable;

use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;
use std::sync::Arc;

use ahash::RandomState;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

/// A typed view of one cache-aside dataset.
///
/// Every record in the dataset has type `T`. Records may be addressed by a
/// plain key, or by a pair of identifiers turned into a key by `D` (for
/// example one reservation per restaurant and user).
///
/// Pair writes are indexed by their first identifier, so every record
/// written for `a` can be read back with [`fetch_all`](Self::fetch_all). The
/// index lives in memory only and starts empty.
pub struct Dataset<T, C, S, D = UuidKeyDeriver> {
  aside: CacheAside<C, S>,
  keys: D,
  // First identifier -> derived keys written under it.
  members: Mutex<HashMap<String, HashSet<String, RandomState>, RandomState>>,
  popularity: Option<Arc<PopularityTable>>,
  _record: PhantomData<fn() -> T>,
}

impl<T, C, S> Dataset<T, C, S, UuidKeyDeriver>
where
  T: Serialize + DeserializeOwned,
  C: CacheClient,
  S: RecordStore,
{
  pub fn new(aside: CacheAside<C, S>) -> Self {
    Self::with_keys(aside, UuidKeyDeriver)
  }
}

impl<T, C, S, D> Dataset<T, C, S, D>
where
  T: Serialize + DeserializeOwned,
  C: CacheClient,
  S: RecordStore,
  D: KeyDeriver,
{
  pub fn with_keys(aside: CacheAside<C, S>, keys: D) -> Self {
    Self {
      aside,
      keys,
      members: Mutex::new(HashMap::with_hasher(RandomState::new())),
      popularity: None,
      _record: PhantomData,
    }
  }

  /// Counts every completed pair write against its first identifier.
  pub fn with_popularity(mut self, popularity: Arc<PopularityTable>) -> Self {
    self.popularity = Some(popularity);
    self
  }

  pub fn aside(&self) -> &CacheAside<C, S> {
    &self.aside
  }

  pub fn popularity(&self) -> Option<&PopularityTable> {
    self.popularity.as_deref()
  }

  /// The keys written under `a` so far, sorted.
  pub fn pair_keys(&self, a: &str) -> Vec<String> {
    let mut keys: Vec<String> = self
      .members
      .lock()
      .get(a)
      .map(|set| set.iter().cloned().collect())
      .unwrap_or_default();
    keys.sort_unstable();
    keys
  }

  /// The key under which the record for `(a, b)` is stored.
  pub fn pair_key(&self, a: &str, b: &str) -> String {
    self.keys.derive_key(a, b)
  }

  pub async fn fetch(&self, key: &str, cancel: &CancellationToken) -> Result<T, AsideError> {
    self.aside.read(key, cancel).await
  }

  pub async fn put(&self, key: &str, value: &T, cancel: &CancellationToken) -> Result<bool, AsideError> {
    self.aside.write(key, value, cancel).await
  }

  pub async fn fetch_pair(&self, a: &str, b: &str, cancel: &CancellationToken) -> Result<T, AsideError> {
    let key = self.pair_key(a, b);
    self.fetch(&key, cancel).await
  }

  pub async fn put_pair(
    &self,
    a: &str,
    b: &str,
    value: &T,
    cancel: &CancellationToken,
  ) -> Result<bool, AsideError> {
    let key = self.pair_key(a, b);
    let written = self.put(&key, value, cancel).await?;

    // Indexed once both legs were attempted, even if one failed.
    self
      .members
      .lock()
      .entry(a.to_owned())
      .or_insert_with(|| HashSet::with_hasher(RandomState::new()))
      .insert(key);
    if let Some(popularity) = &self.popularity {
      popularity.bump(a);
    }
    Ok(written)
  }

  /// Reads every record written for `a` through the cache, in key order.
  ///
  /// Stops at the first failed read and returns its error. An `a` with no
  /// writes yields an empty list.
  pub async fn fetch_all(&self, a: &str, cancel: &CancellationToken) -> Result<Vec<T>, AsideError> {
    let keys = self.pair_keys(a);
    let mut records = Vec::with_capacity(keys.len());
    for key in &keys {
      records.push(self.fetch(key, cancel).await?);
    }
    tracing::debug!(dataset = %self.aside.name(), owner = a, count = records.len(), "fetched all records");
    Ok(records)
  }
}
