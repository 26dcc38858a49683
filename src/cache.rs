//! Content-addressed TTL caching for analysis results.
//!
//! [`TtlCache`] is a generic in-memory key/value store with a single
//! process-wide time-to-live. Entries expire lazily: an expired entry is
//! evicted by the `get` that observes it, so expiration never requires a
//! background sweep. [`derive_key`] produces the cache keys from a cheap
//! structural fingerprint of the data plus the caller's context strings.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Default time-to-live for cache entries (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Cache entry with timestamp.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    timestamp: Instant,
}

/// Generic TTL cache keyed on opaque strings.
///
/// All operations take `&self`; the underlying map is guarded by a
/// non-poisoning mutex, so cache operations are infallible even when a
/// concurrent caller panicked mid-request. No operation holds the lock
/// across anything slower than a map access.
#[derive(Debug)]
pub struct TtlCache<V> {
    /// The cache storage
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    /// Time-to-live applied uniformly to all entries
    ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    /// Creates a cache with the default 300 second TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Creates a cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Gets a value from the cache.
    ///
    /// Returns `None` both for unknown keys and for entries whose TTL has
    /// elapsed. An expired entry is removed as a side effect of the lookup,
    /// so a follow-up `get` under the same clock reading also misses.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.timestamp.elapsed() < self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Sets a value in the cache, overwriting any existing entry for the
    /// key and stamping the current time.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.entries.lock().insert(
            key.into(),
            CacheEntry {
                value,
                timestamp: Instant::now(),
            },
        );
    }

    /// Clears the entire cache.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Number of stored entries, expired ones included until evicted.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` when the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// The TTL applied to every entry.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Gets cache statistics.
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.lock();
        let total_entries = entries.len();
        let expired_entries = entries
            .values()
            .filter(|entry| entry.timestamp.elapsed() >= self.ttl)
            .count();

        CacheStats {
            total_entries,
            expired_entries,
            active_entries: total_entries - expired_entries,
        }
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Total number of entries
    pub total_entries: usize,
    /// Number of expired entries
    pub expired_entries: usize,
    /// Number of active (non-expired) entries
    pub active_entries: usize,
}

/// Derives a cache key from a dataset and caller-supplied context strings.
///
/// The data fragment is a fingerprint, not a content hash: for arrays it
/// covers only the length and the first element, so two datasets of equal
/// length sharing a first record collide. The context fragment (for example
/// a file key or tab name) is the caller's tool for keeping such datasets
/// apart. Both fragments are truncated SHA-256 digests joined as
/// `xxxxxxxx_xxxxxxxx`.
pub fn derive_key(data: &Value, context: &[&str]) -> String {
    let fingerprint = match data {
        Value::Array(records) if !records.is_empty() => {
            format!("{}:{}", records.len(), records[0])
        }
        other => other.to_string(),
    };

    format!(
        "{}_{}",
        short_hash(fingerprint.as_bytes()),
        short_hash(context.join("\u{1f}").as_bytes())
    )
}

/// First 4 digest bytes as 8 hex chars.
fn short_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let hash = hasher.finalize();
    hex::encode(&hash[..4])
}
