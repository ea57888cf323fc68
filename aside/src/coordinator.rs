use crate::client::CacheClient;
use crate::codec;
use crate::error::{AsideError, Layer};
use crate::status::Status;
use crate::store::{Record, RecordStore};

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;
use strata_cache::CacheItem;
use tokio_util::sync::CancellationToken;

/// Races a collaborator call against the caller's token. A token that has
/// already fired wins without polling the call.
async fn guarded<T, F>(cancel: &CancellationToken, call: F) -> Result<T, Status>
where
  F: Future<Output = Result<T, Status>>,
{
  tokio::select! {
    biased;
    _ = cancel.cancelled() => Err(Status::cancelled("caller cancelled the request")),
    result = call => result,
  }
}

fn escalate(layer: Layer, status: Status) -> AsideError {
  match status {
    Status::Cancelled(message) => AsideError::Cancelled(message),
    other => AsideError::Internal {
      layer,
      message: other.to_string(),
    },
  }
}

/// Runs the cache-aside protocol for one logical dataset.
///
/// The coordinator holds no lock of its own. Each step is a separate call to
/// the cache or the store, so two concurrent reads of the same missing key
/// may both fall through to the store and both repopulate the cache; they
/// write the same payload, and the last one wins.
#[derive(Debug)]
pub struct CacheAside<C, S> {
  name: String,
  cache: C,
  store: S,
}

impl<C, S> CacheAside<C, S>
where
  C: CacheClient,
  S: RecordStore,
{
  pub fn new(name: impl Into<String>, cache: C, store: S) -> Self {
    Self {
      name: name.into(),
      cache,
      store,
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn cache(&self) -> &C {
    &self.cache
  }

  pub fn store(&self) -> &S {
    &self.store
  }

  /// Reads `key` through the cache.
  ///
  /// A cache hit is decoded and returned. On a miss the store is consulted;
  /// a store hit is decoded, pushed back into the cache on a best-effort
  /// basis, and returned even if that push fails. A key missing from both
  /// layers is [`AsideError::NotFound`]. Cancellation during the cache or
  /// store lookup is returned immediately.
  pub async fn read<T>(&self, key: &str, cancel: &CancellationToken) -> Result<T, AsideError>
  where
    T: DeserializeOwned,
  {
    match guarded(cancel, self.cache.get_item(key)).await {
      Ok(item) => {
        tracing::debug!(dataset = %self.name, key, "cache hit");
        return codec::decode(key, item.value());
      }
      Err(Status::NotFound(_)) => {
        tracing::debug!(dataset = %self.name, key, "cache miss, reading store");
      }
      Err(status) => return Err(escalate(Layer::Cache, status)),
    }

    let record = match guarded(cancel, self.store.get_record(key)).await {
      Ok(record) => record,
      Err(Status::NotFound(_)) => {
        return Err(AsideError::NotFound {
          key: key.to_owned(),
        })
      }
      Err(status) => return Err(escalate(Layer::Store, status)),
    };

    let value = codec::decode(key, &record.value)?;
    self.populate(record, cancel).await;
    Ok(value)
  }

  async fn populate(&self, record: Record, cancel: &CancellationToken) {
    let item = CacheItem::new(record.key, record.value);
    let key = item.key().to_owned();
    match guarded(cancel, self.cache.set_item(item)).await {
      Ok(true) => tracing::debug!(dataset = %self.name, key = %key, "cache populated"),
      Ok(false) => {
        tracing::warn!(dataset = %self.name, key = %key, "cache declined population")
      }
      Err(status) => {
        tracing::warn!(dataset = %self.name, key = %key, error = %status, "failed to populate cache")
      }
    }
  }

  /// Writes `value` under `key` to the cache and then to the store.
  ///
  /// Both writes are always attempted. The result is `true` only if both
  /// succeeded; a partial failure is reported as `false` and is neither
  /// retried nor rolled back. If either write was cancelled the whole
  /// operation is [`AsideError::Cancelled`].
  pub async fn write<T>(
    &self,
    key: &str,
    value: &T,
    cancel: &CancellationToken,
  ) -> Result<bool, AsideError>
  where
    T: Serialize + ?Sized,
  {
    let payload = codec::encode(key, value)?;

    let cache_result = guarded(
      cancel,
      self.cache.set_item(CacheItem::new(key, payload.clone())),
    )
    .await;
    let store_result = guarded(cancel, self.store.set_record(Record::new(key, payload))).await;

    let cache_ok = match &cache_result {
      Ok(accepted) => *accepted,
      Err(status) => {
        tracing::warn!(dataset = %self.name, key, error = %status, "cache write failed");
        false
      }
    };
    let store_ok = match &store_result {
      Ok(()) => true,
      Err(status) => {
        tracing::warn!(dataset = %self.name, key, error = %status, "store write failed");
        false
      }
    };

    for result in [cache_result.err(), store_result.err()] {
      if let Some(Status::Cancelled(message)) = result {
        return Err(AsideError::Cancelled(message));
      }
    }

    Ok(cache_ok && store_ok)
  }
}
