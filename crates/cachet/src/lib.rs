//! TTL-aware key/value caching on S3-compatible object storage.
//!
//! This crate is a thin adapter: it translates cache semantics (`set`,
//! `get`, `del`, `clear`, per-entry TTL, glob deletes) into object-storage
//! calls and store responses back into cache semantics, including "miss"
//! and "expired". Durability, consistency, authentication, and retries all
//! belong to the store.
//!
//! # Design principles
//!
//! 1. **Pure adapter**: no storage tier of its own, no eviction loop — the
//!    bucket is the cache.
//! 2. **Lazy expiry**: expiry is a timestamp comparison at read time; an
//!    expired entry physically remains until deleted.
//! 3. **Stale reads are cheap**: metadata is checked before the body is
//!    fetched, so a known-stale entry costs one round trip.
//! 4. **Testable**: works against an in-memory backend or any custom
//!    [`StoreClient`].
//!
//! # Example
//!
//! ```no_run
//! use cachet::{Cache, CacheConfig};
//!
//! # async fn demo() -> cachet::CacheResult<()> {
//! let cache = Cache::new(CacheConfig::new("my-bucket"))?;
//!
//! cache.set("greeting", "hello", Some(60)).await?;
//! let hit: Option<String> = cache.get("greeting").await?;
//!
//! cache.del("greet*").await?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod glob;
pub mod store;

// Convenience re-exports
pub use cache::{Cache, GetOptions};
pub use config::CacheConfig;
pub use error::{CacheError, CacheResult};
pub use glob::KeyPattern;
pub use store::{ObjectHead, ObjectStoreClient, StoreClient};

// Re-export bytes for custom store-client implementations
pub use bytes::Bytes;

/// Crate version, as published.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
