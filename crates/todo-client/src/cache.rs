//! Query Cache
//!
//! Results of read calls keyed by `(resource kind, token)`. A successful
//! mutation invalidates its key; the next read then goes back to the server.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Todos,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub kind: ResourceKind,
    pub token: String,
}

impl QueryKey {
    pub fn new(kind: ResourceKind, token: impl Into<String>) -> Self {
        Self {
            kind,
            token: token.into(),
        }
    }

    pub fn todos(token: impl Into<String>) -> Self {
        Self::new(ResourceKind::Todos, token)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    stale: bool,
}

#[derive(Debug, Clone)]
pub struct QueryCache<T> {
    entries: HashMap<QueryKey, CacheEntry<T>>,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T: Clone> QueryCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached data, only while it has not been invalidated
    pub fn fresh(&self, key: &QueryKey) -> Option<T> {
        self.entries
            .get(key)
            .filter(|entry| !entry.stale)
            .map(|entry| entry.data.clone())
    }

    pub fn insert(&mut self, key: QueryKey, data: T) {
        self.entries.insert(key, CacheEntry { data, stale: false });
    }

    /// Mark a key stale. Returns whether an entry existed.
    pub fn invalidate(&mut self, key: &QueryKey) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.stale = true;
                true
            }
            None => false,
        }
    }

    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries.get(key).map_or(true, |entry| entry.stale)
    }

    pub fn remove(&mut self, key: &QueryKey) {
        self.entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_until_invalidated() {
        let mut cache = QueryCache::new();
        let key = QueryKey::todos("tok");
        assert!(cache.is_stale(&key));
        assert_eq!(cache.fresh(&key), None);

        cache.insert(key.clone(), vec![1, 2]);
        assert_eq!(cache.fresh(&key), Some(vec![1, 2]));

        assert!(cache.invalidate(&key));
        assert_eq!(cache.fresh(&key), None);

        cache.insert(key.clone(), vec![3]);
        assert_eq!(cache.fresh(&key), Some(vec![3]));
    }

    #[test]
    fn test_keys_are_scoped_by_token() {
        let mut cache = QueryCache::new();
        cache.insert(QueryKey::todos("a"), "a-data");
        cache.insert(QueryKey::todos("b"), "b-data");

        cache.invalidate(&QueryKey::todos("a"));
        assert!(cache.is_stale(&QueryKey::todos("a")));
        assert_eq!(cache.fresh(&QueryKey::todos("b")), Some("b-data"));
    }

    #[test]
    fn test_invalidate_missing_key() {
        let mut cache: QueryCache<u8> = QueryCache::new();
        assert!(!cache.invalidate(&QueryKey::todos("none")));
        cache.insert(QueryKey::todos("x"), 1);
        cache.remove(&QueryKey::todos("x"));
        assert!(cache.is_stale(&QueryKey::todos("x")));
        assert!(!cache.invalidate(&QueryKey::todos("x")));
    }
}
