//! Construction-time configuration for the cache adapter.

use crate::error::{CacheError, CacheResult};

/// Configuration for [`Cache`](crate::Cache).
///
/// Only `bucket` is required. The bucket must already exist; the adapter
/// never provisions storage.
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// Target bucket.
    pub bucket: String,
    /// Service endpoint override, for S3-compatible self-hosted stores
    /// (MinIO, Ceph RGW, LocalStack).
    pub endpoint: Option<String>,
    /// Region for the default S3 client. Falls back to the environment.
    pub region: Option<String>,
}

impl CacheConfig {
    /// Configuration targeting the given bucket.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Default::default()
        }
    }

    /// Override the service endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the region for the default S3 client.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Fail fast when no bucket is configured.
    pub(crate) fn validate(&self) -> CacheResult<()> {
        if self.bucket.is_empty() {
            return Err(CacheError::NotConfigured {
                reason: "a bucket name is required".to_string(),
            });
        }
        Ok(())
    }
}
