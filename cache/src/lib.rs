//! A capacity-bounded, concurrent, in-memory key-value cache with
//! interchangeable eviction policies.
//!
//! # Features
//! - **One Contract**: every policy implements [`Cache`] (`len`, `get`, `set`,
//!   `delete`, `clear`), so callers can swap policies without code changes.
//! - **Four Policies**: First-In-First-Out, Random, Least-Recently-Used and
//!   Least-Frequently-Used, selected with an explicit [`EvictionPolicy`].
//! - **Linearizable Operations**: each instance is guarded by a single lock
//!   covering both its key map and its eviction order.
//! - **Observability**: exposes hit/miss and eviction counters through
//!   [`MetricsSnapshot`].

// Public modules that form the API
pub mod builder;
pub mod config;
pub mod contract;
pub mod error;
pub mod handles;
pub mod item;
pub mod metrics;
pub mod policy;

// Internal, crate-only modules
mod store;

// Re-export the primary user-facing types for convenience
pub use builder::CacheBuilder;
pub use config::CacheConfig;
pub use contract::Cache;
pub use error::{BuildError, CacheError, ConfigError, ParsePolicyError};
pub use handles::PolicyCache;
pub use item::CacheItem;
pub use metrics::MetricsSnapshot;
pub use policy::fifo::FifoCache;
pub use policy::lfu::LfuCache;
pub use policy::lru::LruCache;
#[cfg(feature = "random")]
pub use policy::random::RandomCache;
pub use policy::EvictionPolicy;
