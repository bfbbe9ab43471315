//! TTL-keyed caching of computed aggregate payloads.
//!
//! Purely a performance optimization: the compute path is always present,
//! and a concurrent double-miss just recomputes deterministically (last
//! writer wins).

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use praxis_shared::{ProvisionSign, ReportingWindow, Resolution};

/// Default cache capacity (number of entries).
const DEFAULT_CACHE_CAPACITY: u64 = 1_000;

/// TTL cache for computed payloads of one scope type.
///
/// Thread-safe and suitable for concurrent access; entries are shared via
/// `Arc` so a hit never clones the payload.
#[derive(Clone)]
pub struct ResultCache<T> {
    cache: Cache<String, Arc<T>>,
}

impl<T: Send + Sync + 'static> ResultCache<T> {
    /// Creates a cache with the given TTL and default capacity.
    #[must_use]
    pub fn new(ttl_secs: u64) -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY, ttl_secs)
    }

    /// Creates a cache with explicit capacity and TTL.
    #[must_use]
    pub fn with_capacity(max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    /// Looks up a cached payload.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<T>> {
        self.cache.get(key)
    }

    /// Stores a payload under the given key.
    pub fn insert(&self, key: String, value: T) {
        self.cache.insert(key, Arc::new(value));
    }

    /// Invalidates all cached entries.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Returns the number of entries currently in the cache.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Runs cache maintenance tasks.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }
}

/// Builds cache keys from everything that affects a computed payload:
/// scope, window bounds, resolution, and the provision sign convention.
#[derive(Debug, Clone)]
pub struct CacheKey {
    parts: Vec<String>,
}

impl CacheKey {
    /// Starts a key for a scope kind and identifier, e.g. `("task", "T-1")`.
    #[must_use]
    pub fn scope(kind: &str, identifier: &str) -> Self {
        Self {
            parts: vec![kind.to_string(), identifier.to_string()],
        }
    }

    /// Appends the window bounds.
    #[must_use]
    pub fn window(mut self, window: ReportingWindow) -> Self {
        self.parts.push(window.start.to_string());
        self.parts.push(window.end.to_string());
        self
    }

    /// Appends the chart resolution.
    #[must_use]
    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.parts.push(resolution.as_str().to_string());
        self
    }

    /// Appends the provision sign convention.
    #[must_use]
    pub fn provision_sign(mut self, sign: ProvisionSign) -> Self {
        self.parts.push(sign.as_str().to_string());
        self
    }

    /// Renders the key.
    #[must_use]
    pub fn build(self) -> String {
        self.parts.join(":")
    }
}
