//! In-memory response cache for proxied France Travail calls.
//!
//! Entries are keyed by a digest of the request parameters and expire a fixed time after
//! insertion. The cache lives for the lifetime of the process and is never persisted.

use std::future::Future;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use log::{debug, info};
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::francetravail::ProxyResponse;

/// Lifetime of a cached response.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(600);

/// Entry count at which `insert` sweeps expired entries out of the map.
pub const DEFAULT_PURGE_THRESHOLD: usize = 1024;

/// Generates a deterministic cache key from an endpoint namespace and its parameters.
///
/// Parameters are sorted by name (then value) before hashing, so the same set of pairs
/// yields the same key whatever order it was built in. Every field is length-prefixed, so
/// values containing `&` or `=` cannot collide with a different set of pairs. Callers must
/// drop null values beforehand.
pub fn compute_cache_key<K, V>(namespace: &str, params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut hasher = Sha256::new();

    hash_field(&mut hasher, namespace);

    let mut sorted: Vec<(&str, &str)> = params
        .iter()
        .map(|(name, value)| (name.as_ref(), value.as_ref()))
        .collect();
    sorted.sort_unstable();

    for (name, value) in sorted {
        hash_field(&mut hasher, name);
        hash_field(&mut hasher, value);
    }

    hex::encode(hasher.finalize())
}

fn hash_field(hasher: &mut Sha256, field: &str) {
    hasher.update((field.len() as u64).to_le_bytes());
    hasher.update(field.as_bytes());
}

struct CacheEntry {
    response: ProxyResponse,
    expires_at: Instant,
}

/// Thread-safe response cache with per-entry TTL expiration.
pub struct ResponseCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
    purge_threshold: usize,
}

impl Default for ResponseCache {
    fn default() -> Self {
        ResponseCache::new(DEFAULT_CACHE_TTL)
    }
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        ResponseCache {
            entries: DashMap::new(),
            ttl,
            purge_threshold: DEFAULT_PURGE_THRESHOLD,
        }
    }

    /// Sets the entry count above which `insert` sweeps expired entries.
    pub fn with_purge_threshold(mut self, purge_threshold: usize) -> Self {
        self.purge_threshold = purge_threshold;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the stored response for `key` if it has not expired yet.
    ///
    /// An expired entry is removed on the way out.
    pub fn get(&self, key: &str) -> Option<ProxyResponse> {
        if let Some(entry) = self.entries.get(key) {
            if entry.expires_at > Instant::now() {
                return Some(entry.response.clone());
            }
            drop(entry);
            self.entries
                .remove_if(key, |_, entry| entry.expires_at <= Instant::now());
        }
        None
    }

    /// Stores `response` under `key`, replacing any previous entry.
    ///
    /// Expired entries are swept only once the map holds `purge_threshold` entries;
    /// below that, `get` evicts them lazily.
    pub fn insert(&self, key: &str, response: ProxyResponse) {
        if self.entries.len() >= self.purge_threshold {
            self.purge_expired();
        }
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                response,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Drops every expired entry.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| entry.expires_at > now);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serves `key` from the cache, or runs `fetch` and caches its result.
    ///
    /// Only successful (2xx) responses are stored; errors and non-success responses pass
    /// through untouched. Two concurrent misses on the same key may both run `fetch`.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, fetch: F) -> Result<ProxyResponse>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ProxyResponse>>,
    {
        if let Some(cached) = self.get(key) {
            info!("Cache hit for key {}", key.get(..12).unwrap_or(key));
            return Ok(cached);
        }

        debug!("Cache miss for key {}", key.get(..12).unwrap_or(key));
        let response = fetch().await?;

        if response.is_success() {
            self.insert(key, response.clone());
        }

        Ok(response)
    }
}
