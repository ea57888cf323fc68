mod common;

use common::{local_aside, ScriptedCache, ScriptedStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strata_aside::{CacheAside, Dataset, KeyDeriver, PopularityTable, Status, UuidKeyDeriver};
use strata_cache::{Cache, EvictionPolicy};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Reservation {
  user_name: String,
  restaurant_name: String,
  time: i64,
}

fn reservation(user: &str, restaurant: &str, time: i64) -> Reservation {
  Reservation {
    user_name: user.to_owned(),
    restaurant_name: restaurant.to_owned(),
    time,
  }
}

#[tokio::test]
async fn test_pair_records_round_trip_through_both_layers() {
  let reservations: Dataset<Reservation, _, _> = Dataset::new(local_aside(EvictionPolicy::Lfu, vec![]));
  let cancel = CancellationToken::new();
  let booking = reservation("alice", "Cafe Luna", 1_700_000_000);

  assert!(reservations
    .put_pair("Cafe Luna", "alice", &booking, &cancel)
    .await
    .unwrap());

  let key = UuidKeyDeriver.derive_key("Cafe Luna", "alice");
  assert_eq!(reservations.pair_key("Cafe Luna", "alice"), key);
  assert!(reservations.aside().cache().cache().get(&key).is_ok());

  // Drop the cached copy; the store still answers and repopulates.
  reservations.aside().cache().cache().clear();
  let fetched = reservations.fetch_pair("Cafe Luna", "alice", &cancel).await.unwrap();
  assert_eq!(fetched, booking);
  assert!(reservations.aside().cache().cache().get(&key).is_ok());
}

#[tokio::test]
async fn test_unknown_pair_is_not_found() {
  let reservations: Dataset<Reservation, _, _> = Dataset::new(local_aside(EvictionPolicy::Lru, vec![]));

  let err = reservations
    .fetch_pair("Nowhere", "bob", &CancellationToken::new())
    .await
    .unwrap_err();

  assert!(err.is_not_found());
}

#[tokio::test]
async fn test_custom_key_deriver() {
  let details = Dataset::<String, _, _, _>::with_keys(
    local_aside(EvictionPolicy::Fifo, vec![]),
    |a: &str, b: &str| format!("{}::{}", a, b),
  );
  let cancel = CancellationToken::new();

  assert!(details.put_pair("x", "y", &"z".to_owned(), &cancel).await.unwrap());
  assert_eq!(details.fetch("x::y", &cancel).await.unwrap(), "z");
}

#[tokio::test]
async fn test_popularity_follows_bookings() {
  let popularity = Arc::new(PopularityTable::new());
  let reservations: Dataset<Reservation, _, _> =
    Dataset::new(local_aside(EvictionPolicy::Lru, vec![])).with_popularity(popularity.clone());
  let cancel = CancellationToken::new();

  let bookings = [
    ("Cafe Luna", "alice"),
    ("Noodle Bar", "bob"),
    ("Cafe Luna", "carol"),
    ("Taqueria", "dave"),
    ("Cafe Luna", "erin"),
    ("Noodle Bar", "frank"),
  ];
  for (i, (restaurant, user)) in bookings.iter().enumerate() {
    let booking = reservation(user, restaurant, i as i64);
    assert!(reservations.put_pair(restaurant, user, &booking, &cancel).await.unwrap());
  }

  assert_eq!(popularity.top_k(2), vec!["Cafe Luna", "Noodle Bar"]);
  assert_eq!(reservations.popularity().map(|p| p.count("Taqueria")), Some(1));
  assert_eq!(reservations.aside().store().len(), bookings.len());
}

#[tokio::test]
async fn test_fetch_all_returns_every_record_for_owner() {
  let reviews: Dataset<Reservation, _, _> = Dataset::new(local_aside(EvictionPolicy::Fifo, vec![]));
  let cancel = CancellationToken::new();

  for (restaurant, user) in [("Cafe Luna", "alice"), ("Cafe Luna", "bob"), ("Taqueria", "carol")] {
    let booking = reservation(user, restaurant, 0);
    assert!(reviews.put_pair(restaurant, user, &booking, &cancel).await.unwrap());
  }
  // Rewriting a pair does not duplicate it in the index.
  let rewrite = reservation("alice", "Cafe Luna", 5);
  assert!(reviews.put_pair("Cafe Luna", "alice", &rewrite, &cancel).await.unwrap());

  assert_eq!(reviews.pair_keys("Cafe Luna").len(), 2);

  // Served from the store once the cache has been emptied.
  reviews.aside().cache().cache().clear();
  let mut found = reviews.fetch_all("Cafe Luna", &cancel).await.unwrap();
  found.sort_by(|a, b| a.user_name.cmp(&b.user_name));
  assert_eq!(found, vec![rewrite, reservation("bob", "Cafe Luna", 0)]);
  assert_eq!(reviews.aside().cache().cache().len(), 2, "Reads repopulated the cache");

  assert!(reviews.fetch_all("Nowhere", &cancel).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_fetch_all_stops_at_first_missing_record() {
  let store = ScriptedStore {
    set_status: Some(Status::unknown("read-only replica")),
    ..ScriptedStore::default()
  };
  let reviews: Dataset<Reservation, _, _> =
    Dataset::new(CacheAside::new("test", ScriptedCache::failing_set(Status::unknown("down")), store));
  let cancel = CancellationToken::new();

  let written = reviews
    .put_pair("Cafe Luna", "alice", &reservation("alice", "Cafe Luna", 0), &cancel)
    .await
    .unwrap();
  assert!(!written);
  assert_eq!(reviews.pair_keys("Cafe Luna").len(), 1, "Attempted writes are indexed");

  let err = reviews.fetch_all("Cafe Luna", &cancel).await.unwrap_err();
  assert!(err.is_not_found());
}

#[tokio::test]
async fn test_cancelled_pair_write_is_not_indexed() {
  let popularity = Arc::new(PopularityTable::new());
  let reviews: Dataset<Reservation, _, _> =
    Dataset::new(local_aside(EvictionPolicy::Lru, vec![])).with_popularity(popularity.clone());
  let cancel = CancellationToken::new();
  cancel.cancel();

  let err = reviews
    .put_pair("Cafe Luna", "alice", &reservation("alice", "Cafe Luna", 0), &cancel)
    .await
    .unwrap_err();

  assert!(err.is_cancelled());
  assert!(reviews.pair_keys("Cafe Luna").is_empty());
  assert_eq!(popularity.count("Cafe Luna"), 0);
}
