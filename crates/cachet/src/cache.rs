//! The cache façade: `set`/`get`/`del`/`clear` over an object-storage
//! bucket.

use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, TimeDelta, Utc};
use futures::TryStreamExt;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::CacheConfig;
use crate::error::{CacheError, CacheResult};
use crate::glob::{KeyPattern, WILDCARD};
use crate::store::{ObjectStoreClient, StoreClient};

/// Options recognized by [`Cache::get_opts`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GetOptions {
    /// Freshness cutoff: entries last modified strictly before this instant
    /// are treated as misses. When set, the entry's own expiry metadata is
    /// ignored.
    pub from_date: Option<DateTime<Utc>>,
}

impl GetOptions {
    /// Options with a freshness cutoff.
    pub fn from_date(cutoff: DateTime<Utc>) -> Self {
        Self {
            from_date: Some(cutoff),
        }
    }
}

/// TTL-aware key/value cache backed by an object-storage bucket.
///
/// The adapter holds no state beyond the bucket name and a store-client
/// handle, both fixed at construction. Clones share the client, and any
/// number of operations may run concurrently against one handle; there is
/// no cross-key transactionality, so e.g. `clear` racing a `set` leaves the
/// outcome to the store.
///
/// Keys are opaque strings passed to the store untransformed; values are
/// anything `serde` can represent as JSON, including `0`, `false`, and
/// `null`. Expiry never deletes anything: an expired entry still exists in
/// the bucket until explicitly deleted, but reads treat it as absent.
#[derive(Clone)]
pub struct Cache {
    client: Arc<dyn StoreClient>,
    bucket: String,
}

impl Cache {
    /// Build a cache over the default S3 client.
    ///
    /// Fails fast, without touching the network, when no bucket is
    /// configured. The bucket must already exist; provisioning is not this
    /// layer's job.
    pub fn new(config: CacheConfig) -> CacheResult<Self> {
        config.validate()?;
        let client = ObjectStoreClient::from_config(&config)?;
        Ok(Self {
            client: Arc::new(client),
            bucket: config.bucket,
        })
    }

    /// Build a cache over a caller-supplied store client.
    ///
    /// `config.endpoint` and `config.region` are ignored here; the client
    /// already embeds its own transport.
    pub fn with_client(config: CacheConfig, client: Arc<dyn StoreClient>) -> CacheResult<Self> {
        config.validate()?;
        Ok(Self {
            client,
            bucket: config.bucket,
        })
    }

    /// The configured bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Serialize `value` to JSON and write it under `key`, fully replacing
    /// any prior entry.
    ///
    /// A `ttl_seconds` of zero or more attaches an absolute expiry instant
    /// (now + TTL) as store-level metadata; a negative or omitted TTL means
    /// the entry never expires. Serialization failure surfaces before any
    /// store call. Issues exactly one write per invocation.
    pub async fn set<T>(&self, key: &str, value: &T, ttl_seconds: Option<i64>) -> CacheResult<()>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(value).map_err(|source| CacheError::Serialize {
            key: key.to_string(),
            source,
        })?;

        let expires = expiry_instant(ttl_seconds);
        tracing::debug!(bucket = %self.bucket, key, ?expires, "cache set");
        self.client.put_object(key, Bytes::from(body), expires).await
    }

    /// Read the entry under `key`, honoring its expiry metadata.
    ///
    /// Returns `Ok(None)` for absent or expired entries; absence is not an
    /// error. Repeated gets of an unmodified key return deep-equal values.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> CacheResult<Option<T>> {
        self.get_opts(key, GetOptions::default()).await
    }

    /// Read with explicit options; see [`GetOptions`].
    ///
    /// The metadata is checked first and the body fetched only once the
    /// entry is known fresh, so a stale read costs a single round trip.
    pub async fn get_opts<T: DeserializeOwned>(
        &self,
        key: &str,
        options: GetOptions,
    ) -> CacheResult<Option<T>> {
        let head = match self.client.head_object(key).await {
            Ok(head) => head,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };

        let fresh = match options.from_date {
            // The caller's cutoff wins over the entry's own expiry.
            Some(cutoff) => head.last_modified >= cutoff,
            None => match head.expires {
                Some(expires) => expires >= Utc::now(),
                None => true,
            },
        };
        if !fresh {
            tracing::debug!(bucket = %self.bucket, key, "cache miss (stale)");
            return Ok(None);
        }

        let body = match self.client.get_object(key).await {
            Ok(body) => body,
            // Deleted between head and body fetch: still a miss, not an error.
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };

        let value = serde_json::from_slice(&body).map_err(|source| CacheError::Deserialize {
            key: key.to_string(),
            source,
        })?;
        Ok(Some(value))
    }

    /// Delete `key`, or every matching key when it contains `*`.
    ///
    /// Deleting an absent key succeeds silently. A pattern is matched with
    /// shell-glob semantics (see [`KeyPattern`]); a pattern matching
    /// nothing is a successful no-op that issues no delete call.
    pub async fn del(&self, key: &str) -> CacheResult<()> {
        if key.contains(WILDCARD) {
            self.del_pattern(key).await
        } else {
            tracing::debug!(bucket = %self.bucket, key, "cache del");
            self.client.delete_object(key).await
        }
    }

    /// Delete every entry in the bucket. A no-op on an empty bucket.
    pub async fn clear(&self) -> CacheResult<()> {
        self.del_pattern("*").await
    }

    async fn del_pattern(&self, pattern: &str) -> CacheResult<()> {
        let pattern = KeyPattern::new(pattern)?;

        // Drain the listing completely before matching: the store paginates,
        // and matching a partial page would silently leave keys behind.
        let keys: Vec<String> = self
            .client
            .list_objects(pattern.literal_prefix())
            .try_collect()
            .await?;

        let matched: Vec<String> = keys.into_iter().filter(|key| pattern.matches(key)).collect();
        tracing::debug!(
            bucket = %self.bucket,
            pattern = pattern.as_str(),
            matched = matched.len(),
            "cache pattern del"
        );

        if matched.is_empty() {
            return Ok(());
        }
        self.client.delete_objects(matched).await
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}

/// Absolute expiry instant for a TTL, or `None` when the entry should not
/// expire.
fn expiry_instant(ttl_seconds: Option<i64>) -> Option<DateTime<Utc>> {
    let ttl = ttl_seconds.filter(|t| *t >= 0)?;
    // TTLs past chrono's representable range never expire.
    TimeDelta::try_seconds(ttl).and_then(|delta| Utc::now().checked_add_signed(delta))
}
