#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use strata_aside::{CacheAside, CacheClient, CacheService, MemoryStore, Record, RecordStore, Status};
use strata_cache::{CacheConfig, CacheItem, EvictionPolicy, PolicyCache};

pub type LocalAside = CacheAside<Arc<CacheService<PolicyCache>>, Arc<MemoryStore>>;

pub fn json(value: &str) -> Vec<u8> {
  serde_json::to_vec(value).unwrap()
}

// An in-process cache of the given policy in front of a pre-seeded store.
pub fn local_aside(policy: EvictionPolicy, records: Vec<(&str, &str)>) -> LocalAside {
  let service = CacheService::from_config("test-cache", &CacheConfig::new(10, policy)).unwrap();
  let store = MemoryStore::with_records(records.into_iter().map(|(k, v)| Record::new(k, json(v))));
  CacheAside::new("test", Arc::new(service), Arc::new(store))
}

/// A cache client whose calls fail with scripted statuses. Unscripted gets
/// miss and unscripted sets succeed.
#[derive(Default)]
pub struct ScriptedCache {
  pub get_status: Option<Status>,
  pub set_status: Option<Status>,
  pub gets: AtomicUsize,
  pub sets: AtomicUsize,
}

impl ScriptedCache {
  pub fn failing_get(status: Status) -> Self {
    Self {
      get_status: Some(status),
      ..Self::default()
    }
  }

  pub fn failing_set(status: Status) -> Self {
    Self {
      set_status: Some(status),
      ..Self::default()
    }
  }

  pub fn gets(&self) -> usize {
    self.gets.load(Ordering::SeqCst)
  }

  pub fn sets(&self) -> usize {
    self.sets.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl CacheClient for ScriptedCache {
  async fn get_item(&self, key: &str) -> Result<CacheItem, Status> {
    self.gets.fetch_add(1, Ordering::SeqCst);
    Err(self.get_status.clone().unwrap_or_else(|| Status::not_found(key)))
  }

  async fn set_item(&self, _item: CacheItem) -> Result<bool, Status> {
    self.sets.fetch_add(1, Ordering::SeqCst);
    match &self.set_status {
      Some(status) => Err(status.clone()),
      None => Ok(true),
    }
  }

  async fn delete_item(&self, key: &str) -> Result<(), Status> {
    Err(Status::not_found(key))
  }
}

/// A store that delegates to a [`MemoryStore`] unless a status is scripted.
#[derive(Default)]
pub struct ScriptedStore {
  pub inner: MemoryStore,
  pub get_status: Option<Status>,
  pub set_status: Option<Status>,
}

#[async_trait]
impl RecordStore for ScriptedStore {
  async fn get_record(&self, key: &str) -> Result<Record, Status> {
    match &self.get_status {
      Some(status) => Err(status.clone()),
      None => self.inner.get_record(key).await,
    }
  }

  async fn set_record(&self, record: Record) -> Result<(), Status> {
    match &self.set_status {
      Some(status) => Err(status.clone()),
      None => self.inner.set_record(record).await,
    }
  }
}

/// A store whose reads take `delay` before answering from `inner`.
pub struct SlowStore {
  pub inner: MemoryStore,
  pub delay: std::time::Duration,
}

#[async_trait]
impl RecordStore for SlowStore {
  async fn get_record(&self, key: &str) -> Result<Record, Status> {
    tokio::time::sleep(self.delay).await;
    self.inner.get_record(key).await
  }

  async fn set_record(&self, record: Record) -> Result<(), Status> {
    self.inner.set_record(record).await
  }
}
