//! Injected page-cache collaborator.
//!
//! The surrounding application caches raw API page bodies in a key-value
//! store (browser local storage, in the original site). Only the pager
//! consults it; the collector core never touches a cache.

use std::collections::HashMap;

/// Get/put-by-key storage for serialized page bodies.
pub trait PageCache {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&mut self, key: &str, value: String);
}

/// HashMap-backed cache for tests and single-process runs.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: HashMap<String, String>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PageCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }
}

/// Cache that stores nothing; every page is fetched fresh.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCache;

impl PageCache for NoCache {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn put(&mut self, _key: &str, _value: String) {}
}
