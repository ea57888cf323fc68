use crate::client::CacheClient;
use crate::status::Status;

use std::sync::Arc;

use async_trait::async_trait;
use strata_cache::{BuildError, Cache, CacheConfig, CacheError, CacheItem, PolicyCache};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetItemResponse {
  pub item: Arc<CacheItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetItemResponse {
  pub success: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteItemResponse;

/// The remote-facing operation surface of one cache instance.
///
/// Translates the [`Cache`] contract into request/response calls with the
/// collaborator status taxonomy. It also implements [`CacheClient`], so an
/// in-process engine can stand in wherever a remote cache is expected.
#[derive(Debug)]
pub struct CacheService<C> {
  name: String,
  cache: C,
}

impl CacheService<PolicyCache> {
  /// Builds the engine described by `config` and wraps it.
  pub fn from_config(name: impl Into<String>, config: &CacheConfig) -> Result<Self, BuildError> {
    Ok(Self::new(name, config.build()?))
  }
}

impl<C: Cache> CacheService<C> {
  pub fn new(name: impl Into<String>, cache: C) -> Self {
    let name = name.into();
    tracing::info!(service = %name, capacity = cache.capacity(), "cache service ready");
    Self { name, cache }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// The engine behind this service.
  pub fn cache(&self) -> &C {
    &self.cache
  }

  pub fn get_item(&self, key: &str) -> Result<GetItemResponse, Status> {
    match self.cache.get(key) {
      Ok(item) => Ok(GetItemResponse { item }),
      Err(CacheError::ItemNotFound) => Err(Status::not_found(format!(
        "key {} not found in cache {}",
        key, self.name
      ))),
    }
  }

  /// Stores `item`. The engine contract cannot reject an item, so this only
  /// ever reports success; a zero-capacity cache accepts and drops it.
  pub fn set_item(&self, item: CacheItem) -> Result<SetItemResponse, Status> {
    self.cache.set(item);
    Ok(SetItemResponse { success: true })
  }

  pub fn delete_item(&self, key: &str) -> Result<DeleteItemResponse, Status> {
    match self.cache.delete(key) {
      Ok(()) => Ok(DeleteItemResponse),
      Err(CacheError::ItemNotFound) => Err(Status::not_found(format!(
        "item to be deleted not found in cache {}",
        self.name
      ))),
    }
  }
}

#[async_trait]
impl<C: Cache> CacheClient for CacheService<C> {
  async fn get_item(&self, key: &str) -> Result<CacheItem, Status> {
    CacheService::get_item(self, key).map(|resp| Arc::unwrap_or_clone(resp.item))
  }

  async fn set_item(&self, item: CacheItem) -> Result<bool, Status> {
    CacheService::set_item(self, item).map(|resp| resp.success)
  }

  async fn delete_item(&self, key: &str) -> Result<(), Status> {
    CacheService::delete_item(self, key).map(|_| ())
  }
}
