//! In-memory template caching.
//!
//! Loaded records are memoized per (source, name). The cache is bounded by a
//! fixed capacity; once full, the oldest-inserted entry is dropped. Eviction
//! follows insertion order, not access order, matching the behavior callers
//! already depend on. Entries are never invalidated by content change; only
//! an explicit clear empties the cache.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::template::TemplateRecord;

/// Default number of records kept per cache.
pub const DEFAULT_CAPACITY: usize = 32;

/// Bounded name-to-record cache with insertion-order eviction.
#[derive(Debug, Default)]
pub struct TemplateCache {
    entries: HashMap<String, Arc<TemplateRecord>>,
    /// Names in insertion order; front is evicted first.
    order: VecDeque<String>,
    capacity: usize,
}

impl TemplateCache {
    /// Create a cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a cache bounded to `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    /// Look up a cached record. Lookups do not affect eviction order.
    pub fn get(&self, name: &str) -> Option<Arc<TemplateRecord>> {
        self.entries.get(name).map(Arc::clone)
    }

    /// Insert a record, evicting the oldest-inserted entry when full.
    ///
    /// Re-inserting an existing name replaces the value without changing its
    /// position in the eviction order.
    pub fn insert(&mut self, record: Arc<TemplateRecord>) {
        let name = record.name.clone();

        if self.entries.insert(name.clone(), record).is_some() {
            return;
        }

        self.order.push_back(name);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                tracing::debug!(template = %oldest, "cache full, evicting oldest entry");
                self.entries.remove(&oldest);
            }
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Number of cached records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether a name is cached.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}
