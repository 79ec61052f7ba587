//! Compiled query cache - keyed by raw query text

use crate::condition::ast::Condition;
use crate::error::Result;
use ahash::AHashMap;
use parking_lot::RwLock;

/// Default number of distinct queries kept before the cache is flushed
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Cache of compiled queries with fast hashing (ahash).
///
/// Entries depend on the specification they were compiled with, so each
/// engine owns its own cache. Blank queries are cached as `None`. Holds at
/// most `capacity` entries: inserting a new query into a full cache flushes it
/// first.
#[derive(Debug)]
pub struct QueryCache {
    entries: RwLock<AHashMap<String, Option<Condition>>>,
    capacity: usize,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capacity of 0 disables caching
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(AHashMap::with_capacity(capacity.min(DEFAULT_CACHE_CAPACITY))),
            capacity,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get a cached result, or compile and cache it. Errors are not cached.
    #[inline]
    pub fn get_or_compile<F>(&self, query: &str, compile: F) -> Result<Option<Condition>>
    where
        F: FnOnce(&str) -> Result<Option<Condition>>,
    {
        // Fast path: check read lock first
        {
            let entries = self.entries.read();
            if let Some(compiled) = entries.get(query) {
                tracing::trace!(query, "query cache hit");
                return Ok(compiled.clone());
            }
        }

        // Slow path: compile and cache
        let compiled = compile(query)?;
        if self.capacity == 0 {
            return Ok(compiled);
        }

        {
            let mut entries = self.entries.write();
            if entries.len() >= self.capacity && !entries.contains_key(query) {
                tracing::debug!(capacity = self.capacity, "query cache full, flushing");
                entries.clear();
            }
            entries.insert(query.to_string(), compiled.clone());
        }

        Ok(compiled)
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
