//! Glob handling for pattern deletes.
//!
//! A delete key containing `*` is a pattern, matched against full keys with
//! shell-glob semantics: `*` matches any run of characters, `?` exactly
//! one, `[...]` POSIX character classes. Matching is case-sensitive and
//! anchored. Keys are opaque strings that often encode hierarchy, so `*`
//! deliberately spans path-like separators.

use globset::{GlobBuilder, GlobMatcher};

use crate::error::{CacheError, CacheResult};

/// The marker that switches [`Cache::del`](crate::Cache::del) into pattern
/// mode.
pub(crate) const WILDCARD: char = '*';

/// Compiled delete pattern.
#[derive(Debug, Clone)]
pub struct KeyPattern {
    pattern: String,
    matcher: GlobMatcher,
}

impl KeyPattern {
    /// Compile `pattern` with shell-glob semantics.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Pattern`] when the pattern does not compile,
    /// e.g. an unclosed character class.
    pub fn new(pattern: &str) -> CacheResult<Self> {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(false)
            .backslash_escape(true)
            .build()
            .map_err(|e| CacheError::Pattern {
                pattern: pattern.to_string(),
                reason: e.kind().to_string(),
            })?;

        Ok(Self {
            pattern: pattern.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    /// True when the pattern matches the full key.
    pub fn matches(&self, key: &str) -> bool {
        self.matcher.is_match(key)
    }

    /// The fixed literal prefix preceding the first wildcard, used to
    /// narrow the store listing before matching.
    pub fn literal_prefix(&self) -> &str {
        literal_prefix(&self.pattern)
    }

    /// The original pattern string.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

/// Longest leading run of `pattern` that contains no glob syntax.
fn literal_prefix(pattern: &str) -> &str {
    match pattern.find(['*', '?', '[']) {
        Some(idx) => &pattern[..idx],
        None => pattern,
    }
}
