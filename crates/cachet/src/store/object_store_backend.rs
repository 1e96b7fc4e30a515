//! Default store client backed by the `object_store` crate.
//!
//! Supports S3 and S3-compatible endpoints (MinIO, Backblaze B2, Wasabi,
//! R2) plus an in-memory backend for tests.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;
use futures::StreamExt;
use object_store::path::Path;
use object_store::{
    Attribute, Attributes, GetOptions, ObjectStore, ObjectStoreExt, PutOptions, PutPayload,
};

use super::{ObjectHead, StoreClient};
use crate::config::CacheConfig;
use crate::error::{CacheError, CacheResult};

/// Metadata attribute carrying the absolute expiry instant, RFC 3339.
const EXPIRES_ATTR: &str = "expires";

/// Store client backed by `object_store`.
pub struct ObjectStoreClient {
    inner: Arc<dyn ObjectStore>,
}

impl ObjectStoreClient {
    /// Build the default S3 client for the configured bucket.
    ///
    /// Credentials, and the region unless overridden, come from the usual
    /// AWS environment variables. No network call is made here; the bucket
    /// must pre-exist.
    pub fn from_config(config: &CacheConfig) -> CacheResult<Self> {
        let mut builder =
            object_store::aws::AmazonS3Builder::from_env().with_bucket_name(&config.bucket);

        if let Some(region) = &config.region {
            builder = builder.with_region(region);
        }
        if let Some(endpoint) = &config.endpoint {
            builder = builder
                .with_endpoint(endpoint)
                .with_allow_http(endpoint.starts_with("http://"));
        }

        let store = builder.build().map_err(|e| CacheError::Io {
            message: format!("failed to create S3 client: {}", e),
        })?;

        Ok(Self {
            inner: Arc::new(store),
        })
    }

    /// Wrap a pre-built `object_store` handle.
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { inner: store }
    }

    /// In-memory client for tests.
    pub fn memory() -> Self {
        Self {
            inner: Arc::new(object_store::memory::InMemory::new()),
        }
    }
}

impl std::fmt::Debug for ObjectStoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStoreClient")
            .field("inner", &self.inner)
            .finish()
    }
}

#[async_trait]
impl StoreClient for ObjectStoreClient {
    async fn put_object(
        &self,
        key: &str,
        body: Bytes,
        expires: Option<DateTime<Utc>>,
    ) -> CacheResult<()> {
        let mut attributes = Attributes::new();
        if let Some(expires) = expires {
            attributes.insert(
                Attribute::Metadata(EXPIRES_ATTR.into()),
                expires.to_rfc3339().into(),
            );
        }
        let opts = PutOptions {
            attributes,
            ..Default::default()
        };

        self.inner
            .put_opts(&Path::from(key), PutPayload::from_bytes(body), opts)
            .await
            .map_err(|e| CacheError::from_object_store(e, key))?;
        Ok(())
    }

    async fn get_object(&self, key: &str) -> CacheResult<Bytes> {
        let result = self
            .inner
            .get(&Path::from(key))
            .await
            .map_err(|e| CacheError::from_object_store(e, key))?;

        result
            .bytes()
            .await
            .map_err(|e| CacheError::from_object_store(e, key))
    }

    async fn head_object(&self, key: &str) -> CacheResult<ObjectHead> {
        // A plain head() drops custom attributes, so issue a bodiless get.
        let options = GetOptions {
            head: true,
            ..Default::default()
        };
        let result = self
            .inner
            .get_opts(&Path::from(key), options)
            .await
            .map_err(|e| CacheError::from_object_store(e, key))?;

        let expires = result
            .attributes
            .get(&Attribute::Metadata(EXPIRES_ATTR.into()))
            .and_then(|value| match DateTime::parse_from_rfc3339(value.as_ref()) {
                Ok(instant) => Some(instant.with_timezone(&Utc)),
                Err(e) => {
                    tracing::warn!(key, error = %e, "unparseable expiry attribute, treating entry as unexpiring");
                    None
                }
            });

        Ok(ObjectHead {
            last_modified: result.meta.last_modified,
            expires,
        })
    }

    fn list_objects(&self, prefix: &str) -> BoxStream<'_, CacheResult<String>> {
        let prefix = (!prefix.is_empty()).then(|| Path::from(prefix));
        self.inner
            .list(prefix.as_ref())
            .map(|entry| match entry {
                Ok(meta) => Ok(meta.location.to_string()),
                Err(e) => Err(CacheError::ObjectStore(e)),
            })
            .boxed()
    }

    async fn delete_object(&self, key: &str) -> CacheResult<()> {
        match self.inner.delete(&Path::from(key)).await {
            Ok(()) => Ok(()),
            // Absent keys delete successfully, matching S3 semantics.
            Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(CacheError::from_object_store(e, key)),
        }
    }

    async fn delete_objects(&self, keys: Vec<String>) -> CacheResult<()> {
        let locations = futures::stream::iter(
            keys.into_iter()
                .map(|key| Ok::<_, object_store::Error>(Path::from(key))),
        );
        let mut results = self.inner.delete_stream(locations.boxed());

        while let Some(result) = results.next().await {
            match result {
                Ok(_) => {}
                Err(object_store::Error::NotFound { .. }) => {}
                Err(e) => return Err(CacheError::ObjectStore(e)),
            }
        }
        Ok(())
    }
}
