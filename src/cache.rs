// src/cache.rs

//! Best-effort query memoization for the read path.
//!
//! The cache is an explicit dependency injected into services (never an
//! ambient singleton) so it stays swappable and testable. Values are JSON
//! strings keyed by strings composed in the service layer; a miss is always
//! safe to recompute from the repository, and concurrent population is
//! last-write-wins.

use std::num::NonZeroUsize;
use std::sync::RwLock;

use async_trait::async_trait;
use lru::LruCache;

/// Generic key-value store contract. No eviction guarantees beyond whatever
/// the backing implementation provides.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: String);
}

/// In-process LRU cache.
pub struct MemoryCache {
    entries: RwLock<LruCache<String, String>>,
}

impl MemoryCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
        }
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        // LRU promotion needs the write lock even on reads.
        let mut entries = match self.entries.write() {
            Ok(guard) => guard,
            Err(_) => return None,
        };
        entries.get(key).cloned()
    }

    async fn set(&self, key: &str, value: String) {
        if let Ok(mut entries) = self.entries.write() {
            entries.put(key.to_string(), value);
        }
    }
}
