mod common;

use common::{json, local_aside, ScriptedCache, ScriptedStore};
use pretty_assertions::assert_eq;
use strata_aside::{AsideError, CacheAside, MemoryStore, RecordStore, Status};
use strata_cache::{Cache, EvictionPolicy};
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_write_reaches_both_layers() {
  let aside = local_aside(EvictionPolicy::Lru, vec![]);
  let cancel = CancellationToken::new();

  let ok = aside.write("d1", "details", &cancel).await.unwrap();

  assert!(ok);
  let cached = aside.cache().cache().get("d1").unwrap();
  assert_eq!(cached.value(), json("details").as_slice());
  let stored = aside.store().get_record("d1").await.unwrap();
  assert_eq!(stored.value, json("details"));
  assert_eq!(aside.store().writes(), 1);

  let read_back: String = aside.read("d1", &cancel).await.unwrap();
  assert_eq!(read_back, "details");
}

#[tokio::test]
async fn test_store_failure_reports_false_without_rollback() {
  let store = ScriptedStore {
    set_status: Some(Status::unknown("read-only replica")),
    ..ScriptedStore::default()
  };
  let aside = CacheAside::new("test", ScriptedCache::default(), store);

  let ok = aside.write("k", &42u32, &CancellationToken::new()).await.unwrap();

  assert!(!ok);
  assert_eq!(aside.cache().sets(), 1, "Cache write still happened");
}

#[tokio::test]
async fn test_cache_failure_still_writes_store() {
  let aside = CacheAside::new(
    "test",
    ScriptedCache::failing_set(Status::unknown("cache down")),
    MemoryStore::new(),
  );

  let ok = aside.write("k", &42u32, &CancellationToken::new()).await.unwrap();

  assert!(!ok);
  assert_eq!(aside.store().writes(), 1);
  assert_eq!(aside.store().get_record("k").await.unwrap().value, b"42".to_vec());
}

#[tokio::test]
async fn test_cancelled_cache_leg_is_reported_after_store_leg() {
  let aside = CacheAside::new(
    "test",
    ScriptedCache::failing_set(Status::cancelled("client went away")),
    MemoryStore::new(),
  );

  let err = aside
    .write("k", &1u8, &CancellationToken::new())
    .await
    .unwrap_err();

  assert!(matches!(err, AsideError::Cancelled(ref msg) if msg == "client went away"));
  assert_eq!(aside.store().writes(), 1, "Both writes are always attempted");
}

#[tokio::test]
async fn test_fired_token_cancels_write() {
  let aside = local_aside(EvictionPolicy::Fifo, vec![]);
  let cancel = CancellationToken::new();
  cancel.cancel();

  let err = aside.write("k", "v", &cancel).await.unwrap_err();

  assert!(err.is_cancelled());
  assert!(aside.cache().cache().is_empty());
  assert_eq!(aside.store().writes(), 0);
}

#[tokio::test]
async fn test_write_into_zero_capacity_cache_succeeds() {
  use std::sync::Arc;
  use strata_aside::CacheService;
  use strata_cache::CacheConfig;

  let service = CacheService::from_config("empty", &CacheConfig::new(0, EvictionPolicy::Lfu)).unwrap();
  let aside = CacheAside::new("test", Arc::new(service), MemoryStore::new());
  let cancel = CancellationToken::new();

  assert!(aside.write("k", "v", &cancel).await.unwrap());
  assert!(aside.cache().cache().is_empty());

  // Reads keep falling through to the store.
  let value: String = aside.read("k", &cancel).await.unwrap();
  assert_eq!(value, "v");
  let value: String = aside.read("k", &cancel).await.unwrap();
  assert_eq!(value, "v");
  assert_eq!(aside.store().reads(), 2);
}
