// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Shared cache of parsed paths
//!
//! Paths are immutable once parsed, so one parsed instance can be handed to
//! any number of callers and threads. Keys are the exact path text: spaces
//! inside quoted keys are significant, so no normalization is applied.

use crate::evaluator::Path;
use crate::parser::{self, ParseResult};
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Parsed path shared between callers
pub type SharedPath = Arc<Path>;

/// Statistics about cache performance
#[derive(Debug, Clone)]
pub struct PathCacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of entries currently cached
    pub entries: usize,
    /// Number of entries evicted because the cache was full
    pub evictions: u64,
}

impl PathCacheStats {
    /// Cache hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        if self.hits + self.misses == 0 {
            0.0
        } else {
            (self.hits as f64) / ((self.hits + self.misses) as f64) * 100.0
        }
    }
}

/// Configuration for the path cache
#[derive(Debug, Clone)]
pub struct PathCacheConfig {
    /// Maximum number of entries to cache
    pub max_entries: usize,
    /// Whether the cache is enabled
    pub enabled: bool,
    /// TTL for cache entries (None = never expire)
    pub entry_ttl: Option<Duration>,
}

impl Default for PathCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            enabled: true,
            entry_ttl: Some(Duration::from_secs(3600)),
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    path: SharedPath,
    created_at: Instant,
    last_accessed: Instant,
}

impl CacheEntry {
    fn new(path: SharedPath) -> Self {
        let now = Instant::now();
        Self {
            path,
            created_at: now,
            last_accessed: now,
        }
    }

    fn access(&mut self) -> SharedPath {
        self.last_accessed = Instant::now();
        Arc::clone(&self.path)
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Thread-safe cache of parsed paths with oldest-first eviction
pub struct PathCache {
    cache: DashMap<String, CacheEntry>,
    config: PathCacheConfig,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl PathCache {
    /// Create a cache with the default configuration
    pub fn new() -> Self {
        Self::with_config(PathCacheConfig::default())
    }

    /// Create a cache with a custom configuration
    pub fn with_config(config: PathCacheConfig) -> Self {
        Self {
            cache: DashMap::new(),
            config,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Cached path for `text`, if any
    pub fn get(&self, text: &str) -> Option<SharedPath> {
        if !self.config.enabled {
            return None;
        }

        if let Some(mut entry) = self.cache.get_mut(text) {
            if let Some(ttl) = self.config.entry_ttl {
                if entry.is_expired(ttl) {
                    drop(entry);
                    self.cache.remove(text);
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    return None;
                }
            }

            self.hits.fetch_add(1, Ordering::Relaxed);
            Some(entry.access())
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            None
        }
    }

    /// Cache a parsed path under its own text
    pub fn put(&self, path: SharedPath) {
        if !self.config.enabled {
            return;
        }

        if self.cache.len() >= self.config.max_entries {
            self.evict_oldest_entries();
        }

        let key = path.to_text().to_string();
        self.cache.insert(key, CacheEntry::new(path));
    }

    /// Cached path for `text`, parsing and caching it on a miss.
    ///
    /// Syntax errors are returned as-is and never cached.
    pub fn get_or_parse(&self, text: &str) -> ParseResult<SharedPath> {
        if let Some(path) = self.get(text) {
            return Ok(path);
        }

        let path = Arc::new(parser::parse(text)?);
        log::trace!("caching parsed path '{text}'");
        self.put(Arc::clone(&path));
        Ok(path)
    }

    /// Cache statistics
    pub fn stats(&self) -> PathCacheStats {
        PathCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.len(),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    /// Clear all cached entries
    pub fn clear(&self) {
        self.cache.clear();
    }

    /// Drop expired entries
    pub fn cleanup(&self) {
        if let Some(ttl) = self.config.entry_ttl {
            self.cache.retain(|_, entry| !entry.is_expired(ttl));
        }
    }

    /// Evict the least recently used 20% of entries
    fn evict_oldest_entries(&self) {
        let mut entries: Vec<(String, Instant)> = self
            .cache
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().last_accessed))
            .collect();

        entries.sort_by_key(|(_, last_accessed)| *last_accessed);

        let remove_count = (self.config.max_entries / 5).max(1);
        for (key, _) in entries.into_iter().take(remove_count) {
            self.cache.remove(&key);
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }
        log::debug!("path cache full, evicted {remove_count} entries");
    }
}

impl Default for PathCache {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_PATH_CACHE: once_cell::sync::Lazy<PathCache> =
    once_cell::sync::Lazy::new(PathCache::new);

/// The process-wide path cache
pub fn global_path_cache() -> &'static PathCache {
    &GLOBAL_PATH_CACHE
}

/// Parse `text` through the global cache
pub fn parse_cached(text: &str) -> ParseResult<SharedPath> {
    global_path_cache().get_or_parse(text)
}
