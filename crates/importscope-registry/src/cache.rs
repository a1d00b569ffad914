//! In-memory TTL cache in front of a registry provider

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::lookup::{RegistryError, VersionLookup};

#[derive(Debug, Clone)]
struct CacheEntry {
    version: Option<String>,
    timestamp: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.timestamp.elapsed() > self.ttl
    }
}

/// Remembers lookups (including "not found") for `default_ttl`.
#[derive(Debug)]
pub struct LookupCache {
    entries: HashMap<String, CacheEntry>,
    default_ttl: Duration,
}

impl LookupCache {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            default_ttl,
        }
    }

    /// Outer `None` is a miss; inner `None` is a cached "unknown package".
    pub fn get(&self, package: &str) -> Option<Option<String>> {
        self.entries
            .get(package)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.version.clone())
    }

    pub fn insert(&mut self, package: &str, version: Option<String>) {
        self.entries.insert(
            package.to_string(),
            CacheEntry {
                version,
                timestamp: Instant::now(),
                ttl: self.default_ttl,
            },
        );
    }

    pub fn cleanup_expired(&mut self) {
        self.entries.retain(|_, entry| !entry.is_expired());
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Wraps a provider with a [`LookupCache`]. Errors are not cached.
pub struct CachedLookup {
    inner: Box<dyn VersionLookup>,
    cache: Mutex<LookupCache>,
}

impl CachedLookup {
    pub fn new(inner: Box<dyn VersionLookup>, ttl: Duration) -> Self {
        Self {
            inner,
            cache: Mutex::new(LookupCache::new(ttl)),
        }
    }

    pub fn cached_len(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[async_trait::async_trait]
impl VersionLookup for CachedLookup {
    async fn latest_version(&self, package: &str) -> Result<Option<String>, RegistryError> {
        let hit = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(package);
        if let Some(version) = hit {
            tracing::trace!("cache hit for {}", package);
            return Ok(version);
        }

        let version = self.inner.latest_version(package).await?;
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(package, version.clone());
        Ok(version)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
