use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strata_aside::{CacheAside, CacheService, Dataset, MemoryStore, PopularityTable};
use strata_cache::{Cache, CacheConfig};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Reservation {
  user_name: String,
  restaurant_name: String,
  time: i64,
}

#[tokio::main]
async fn main() {
  // Policy and capacity come from RESERVATIONS_POLICY / RESERVATIONS_CAPACITY.
  let config = CacheConfig::from_env("reservations").expect("Invalid cache config");
  let service = CacheService::from_config("reservations", &config).expect("Failed to build cache");
  let popularity = Arc::new(PopularityTable::new());
  let reservations: Dataset<Reservation, _, _> =
    Dataset::new(CacheAside::new("reservations", service, MemoryStore::new()))
      .with_popularity(popularity.clone());
  let cancel = CancellationToken::new();

  for (restaurant, user) in [("Cafe Luna", "alice"), ("Noodle Bar", "bob"), ("Cafe Luna", "carol")] {
    let booking = Reservation {
      user_name: user.to_owned(),
      restaurant_name: restaurant.to_owned(),
      time: 1_700_000_000,
    };
    match reservations.put_pair(restaurant, user, &booking, &cancel).await {
      Ok(true) => {}
      Ok(false) => println!("Partial write for {} at {}", user, restaurant),
      Err(e) => println!("Write failed: {}", e),
    }
  }

  // Evict everything; the next read falls through to the store.
  reservations.aside().cache().cache().clear();

  match reservations.fetch_all("Cafe Luna", &cancel).await {
    Ok(found) => println!("Cafe Luna bookings: {:?}", found),
    Err(e) => println!("Fetch failed: {}", e),
  }

  println!("Most popular: {:?}", popularity.top_k(1));
  println!("Store reads: {}", reservations.aside().store().reads());
  println!("\nCache metrics: {:#?}", reservations.aside().cache().cache().metrics());
}
