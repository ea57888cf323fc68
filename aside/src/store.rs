use crate::status::Status;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ahash::RandomState;
use async_trait::async_trait;
use parking_lot::Mutex;

/// A keyed byte payload held by the persistent store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
  pub key: String,
  pub value: Vec<u8>,
}

impl Record {
  pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
    Self {
      key: key.into(),
      value: value.into(),
    }
  }
}

/// The slow, authoritative store behind the cache.
#[async_trait]
pub trait RecordStore: Send + Sync {
  /// Fails with [`Status::NotFound`] when no record exists for `key`.
  async fn get_record(&self, key: &str) -> Result<Record, Status>;

  async fn set_record(&self, record: Record) -> Result<(), Status>;
}

#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
  async fn get_record(&self, key: &str) -> Result<Record, Status> {
    (**self).get_record(key).await
  }

  async fn set_record(&self, record: Record) -> Result<(), Status> {
    (**self).set_record(record).await
  }
}

/// An unbounded in-process [`RecordStore`].
///
/// Counts every read and write it serves, which makes it useful for checking
/// how often a coordinator actually reaches the store.
#[derive(Debug, Default)]
pub struct MemoryStore {
  records: Mutex<HashMap<String, Vec<u8>, RandomState>>,
  reads: AtomicUsize,
  writes: AtomicUsize,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a store pre-filled with `records`. Seeding is not counted as
  /// writes.
  pub fn with_records<I>(records: I) -> Self
  where
    I: IntoIterator<Item = Record>,
  {
    let store = Self::new();
    {
      let mut map = store.records.lock();
      for record in records {
        map.insert(record.key, record.value);
      }
    }
    store
  }

  pub fn len(&self) -> usize {
    self.records.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn reads(&self) -> usize {
    self.reads.load(Ordering::Relaxed)
  }

  pub fn writes(&self) -> usize {
    self.writes.load(Ordering::Relaxed)
  }
}

#[async_trait]
impl RecordStore for MemoryStore {
  async fn get_record(&self, key: &str) -> Result<Record, Status> {
    self.reads.fetch_add(1, Ordering::Relaxed);
    self
      .records
      .lock()
      .get(key)
      .map(|value| Record::new(key, value.clone()))
      .ok_or_else(|| Status::not_found(format!("no record for key {}", key)))
  }

  async fn set_record(&self, record: Record) -> Result<(), Status> {
    self.writes.fetch_add(1, Ordering::Relaxed);
    self.records.lock().insert(record.key, record.value);
    Ok(())
  }
}
