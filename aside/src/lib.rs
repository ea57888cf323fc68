//! Cache-aside coordination between a bounded [`strata_cache`] instance and a
//! slower persistent record store.
//!
//! Reads check the cache first, fall back to the store on a miss and then
//! repopulate the cache on a best-effort basis. Writes go to the cache and the
//! store independently and report one combined status.
//!
//! Every external call made by [`CacheAside`] races against a caller-supplied
//! [`CancellationToken`](tokio_util::sync::CancellationToken); a fired token
//! surfaces as [`AsideError::Cancelled`] and never as a fallback.

pub mod client;
pub mod codec;
pub mod coordinator;
pub mod dataset;
pub mod error;
pub mod keys;
pub mod popularity;
pub mod service;
pub mod status;
pub mod store;

pub use client::CacheClient;
pub use coordinator::CacheAside;
pub use dataset::Dataset;
pub use error::AsideError;
pub use keys::{KeyDeriver, UuidKeyDeriver};
pub use popularity::PopularityTable;
pub use service::{CacheService, DeleteItemResponse, GetItemResponse, SetItemResponse};
pub use status::Status;
pub use store::{MemoryStore, Record, RecordStore};

pub use strata_cache::CacheItem;
