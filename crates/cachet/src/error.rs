//! Error types for cache operations.

use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors that can occur while caching against the backing object store.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The adapter was constructed without a bucket.
    /// Raised synchronously, before any network access.
    #[error("no bucket configured: {reason}")]
    NotConfigured { reason: String },

    /// No object under this key. Reads translate this to a miss and
    /// single-key deletes to a silent success; it only escapes through the
    /// raw store client.
    #[error("object not found: {key}")]
    NotFound { key: String },

    /// The value could not be represented as JSON.
    /// Raised before any store call.
    #[error("failed to serialize value for '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The stored body is not valid JSON.
    #[error("failed to parse cached value for '{key}': {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A delete pattern did not compile as a glob.
    #[error("invalid delete pattern '{pattern}': {reason}")]
    Pattern { pattern: String, reason: String },

    /// Client-construction or transport failure outside the store's own
    /// error taxonomy.
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Error from the underlying object store, propagated unchanged.
    #[error("object store error: {0}")]
    ObjectStore(object_store::Error),

    /// Other errors, for custom store-client implementations.
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CacheError {
    /// Returns true if this error indicates the object was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if the value failed to serialize, i.e. the error was
    /// raised before any network call.
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialize { .. })
    }

    /// Create from an object_store error with context about the key.
    pub fn from_object_store(err: object_store::Error, key: &str) -> Self {
        match &err {
            object_store::Error::NotFound { .. } => CacheError::NotFound {
                key: key.to_string(),
            },
            _ => CacheError::ObjectStore(err),
        }
    }
}

impl From<object_store::Error> for CacheError {
    fn from(err: object_store::Error) -> Self {
        CacheError::from_object_store(err, "unknown")
    }
}
