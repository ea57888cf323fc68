use crate::status::Status;

use std::sync::Arc;

use async_trait::async_trait;
use strata_cache::CacheItem;

/// The cache as seen by a coordinator: the `GetItem` / `SetItem` /
/// `DeleteItem` surface, reached over whatever transport the deployment uses.
#[async_trait]
pub trait CacheClient: Send + Sync {
  /// Fails with [`Status::NotFound`] when the key is absent.
  async fn get_item(&self, key: &str) -> Result<CacheItem, Status>;

  /// Returns whether the cache accepted the item.
  async fn set_item(&self, item: CacheItem) -> Result<bool, Status>;

  /// Fails with [`Status::NotFound`] when the key is absent.
  async fn delete_item(&self, key: &str) -> Result<(), Status>;
}

#[async_trait]
impl<T: CacheClient + ?Sized> CacheClient for Arc<T> {
  async fn get_item(&self, key: &str) -> Result<CacheItem, Status> {
    (**self).get_item(key).await
  }

  async fn set_item(&self, item: CacheItem) -> Result<bool, Status> {
    (**self).set_item(item).await
  }

  async fn delete_item(&self, key: &str) -> Result<(), Status> {
    (**self).delete_item(key).await
  }
}
