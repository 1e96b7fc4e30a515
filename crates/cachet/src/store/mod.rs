//! Object-storage abstraction behind the cache.
//!
//! The cache is a façade; everything durable lives in the bucket. This
//! module defines the capability set the façade is built on and the default
//! implementation over the `object_store` crate.
//!
//! A client is scoped to a single bucket at construction. Supplying a custom
//! implementation to [`Cache::with_client`](crate::Cache::with_client) is
//! the injection point for mocks and exotic backends.

pub mod object_store_backend;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;

use crate::error::CacheResult;

pub use object_store_backend::ObjectStoreClient;

/// Object metadata returned by a head request, without the body.
#[derive(Debug, Clone, Copy)]
pub struct ObjectHead {
    /// When the object was last written. Set by the store, not the adapter.
    pub last_modified: DateTime<Utc>,
    /// Absolute expiry instant attached at write time, if any.
    pub expires: Option<DateTime<Utc>>,
}

/// Storage capability set consumed by the cache façade.
///
/// All operations are async; none retries internally. Retry and timeout
/// policy belong to the implementation, not to callers of this trait.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Write `body` under `key`, fully replacing any existing object.
    ///
    /// `expires` is carried as store-level metadata alongside the write.
    async fn put_object(
        &self,
        key: &str,
        body: Bytes,
        expires: Option<DateTime<Utc>>,
    ) -> CacheResult<()>;

    /// Fetch the object body.
    ///
    /// # Returns
    ///
    /// - `Ok(Bytes)` with the body
    /// - `Err(CacheError::NotFound)` if there is no object under `key`
    async fn get_object(&self, key: &str) -> CacheResult<Bytes>;

    /// Fetch object metadata without transferring the body.
    ///
    /// # Returns
    ///
    /// - `Ok(ObjectHead)` for an existing object
    /// - `Err(CacheError::NotFound)` if there is no object under `key`
    async fn head_object(&self, key: &str) -> CacheResult<ObjectHead>;

    /// Stream every key under `prefix`. An empty prefix lists the whole
    /// bucket.
    ///
    /// Implementations must yield the **complete** listing, paging the
    /// store's list API until exhausted. A truncated listing silently
    /// leaves matching objects behind on pattern deletes.
    fn list_objects(&self, prefix: &str) -> BoxStream<'_, CacheResult<String>>;

    /// Delete one object. Deleting an absent key is not an error.
    async fn delete_object(&self, key: &str) -> CacheResult<()>;

    /// Delete a batch of objects in one store call.
    async fn delete_objects(&self, keys: Vec<String>) -> CacheResult<()>;
}
