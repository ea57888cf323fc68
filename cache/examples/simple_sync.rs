use strata_cache::{Cache, CacheBuilder, CacheItem, EvictionPolicy};

fn main() {
  // A three-entry LRU cache.
  let cache = CacheBuilder::default()
    .capacity(3)
    .policy(EvictionPolicy::Lru)
    .build()
    .expect("Failed to build cache");

  for key in ["key1", "key2", "key3"] {
    cache.set(CacheItem::new(key, format!("value for {}", key)));
  }

  // Touch key1 so key2 becomes the least recently used entry.
  if let Ok(item) = cache.get("key1") {
    println!("Found {}: {}", item.key(), String::from_utf8_lossy(item.value()));
  }

  println!("Inserting key4 into a full cache.");
  cache.set(CacheItem::new("key4", "value for key4"));

  match cache.get("key2") {
    Ok(_) => println!("key2 is still cached."),
    Err(e) => println!("key2: {} (evicted as expected)", e),
  }

  println!("\nCache metrics: {:#?}", cache.metrics());
}
