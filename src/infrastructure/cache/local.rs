//! Process-local cache tier

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::cache::ConfigCache;
use crate::domain::config_entry::ConfigEntry;

/// Holds the most recently known entry per cache key.
///
/// Writes replace the held `Arc` whole and never compare timestamps. A
/// poisoned lock is recovered since the guarded map only ever sees whole
/// replacements, so this tier never fails.
#[derive(Debug)]
pub struct InMemoryConfigCache {
    entries: RwLock<HashMap<String, Arc<ConfigEntry>>>,
    latest: RwLock<Arc<ConfigEntry>>,
}

impl Default for InMemoryConfigCache {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryConfigCache {
    /// Creates a tier holding the empty entry for every key
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            latest: RwLock::new(ConfigEntry::empty()),
        }
    }

    /// Returns the entry held for `key`, or the empty entry if none was written
    pub fn read(&self, key: &str) -> Arc<ConfigEntry> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);

        entries.get(key).cloned().unwrap_or_else(ConfigEntry::empty)
    }

    /// Replaces the entry held for `key`
    pub fn write(&self, key: &str, entry: Arc<ConfigEntry>) {
        {
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            entries.insert(key.to_string(), Arc::clone(&entry));
        }

        *self.latest.write().unwrap_or_else(PoisonError::into_inner) = entry;
    }

    /// Returns the entry written last, whatever its key
    pub fn latest(&self) -> Arc<ConfigEntry> {
        Arc::clone(&self.latest.read().unwrap_or_else(PoisonError::into_inner))
    }
}

#[async_trait]
impl ConfigCache for InMemoryConfigCache {
    async fn get(&self, key: &str) -> Arc<ConfigEntry> {
        self.read(key)
    }

    async fn set(&self, key: &str, entry: Arc<ConfigEntry>) {
        self.write(key, entry);
    }

    fn get_in_memory(&self) -> Arc<ConfigEntry> {
        self.latest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG_JSON: &str = r#"{"p": {"u": "http://example.com", "r": 0}}"#;

    #[test]
    fn test_read_unknown_key_returns_empty() {
        let cache = InMemoryConfigCache::new();

        assert!(ConfigEntry::is_empty_sentinel(&cache.read("missing")));
        assert!(ConfigEntry::is_empty_sentinel(&cache.latest()));
    }

    #[test]
    fn test_write_replaces_reference() {
        let cache = InMemoryConfigCache::new();
        let entry = Arc::new(ConfigEntry::new(CONFIG_JSON, 10, None));

        cache.write("key", Arc::clone(&entry));

        assert!(Arc::ptr_eq(&cache.read("key"), &entry));
        assert!(Arc::ptr_eq(&cache.latest(), &entry));
    }

    #[test]
    fn test_write_ignores_timestamps() {
        let cache = InMemoryConfigCache::new();
        let newer = Arc::new(ConfigEntry::new(CONFIG_JSON, 2_000, None));
        let older = Arc::new(ConfigEntry::new(CONFIG_JSON, 1_000, None));

        cache.write("key", newer);
        cache.write("key", Arc::clone(&older));

        assert!(Arc::ptr_eq(&cache.read("key"), &older));
    }

    #[test]
    fn test_keys_are_independent() {
        let cache = InMemoryConfigCache::new();
        let entry = Arc::new(ConfigEntry::new(CONFIG_JSON, 10, None));

        cache.write("a", Arc::clone(&entry));

        assert!(Arc::ptr_eq(&cache.read("a"), &entry));
        assert!(ConfigEntry::is_empty_sentinel(&cache.read("b")));
    }

    #[test]
    fn test_recovers_from_poisoned_lock() {
        let cache = Arc::new(InMemoryConfigCache::new());

        let poisoner = Arc::clone(&cache);
        let handle: std::thread::JoinHandle<()> = std::thread::spawn(move || {
            let _guard = poisoner.entries.write().unwrap();
            panic!("poison the lock");
        });
        assert!(handle.join().is_err());
        assert!(cache.entries.is_poisoned());

        let entry = Arc::new(ConfigEntry::new(CONFIG_JSON, 10, None));
        cache.write("key", Arc::clone(&entry));
        assert!(Arc::ptr_eq(&cache.read("key"), &entry));
    }

    #[tokio::test]
    async fn test_concurrent_readers_see_whole_entries() {
        let cache = Arc::new(InMemoryConfigCache::new());
        let first = Arc::new(ConfigEntry::new(CONFIG_JSON, 1, Some("a".to_string())));
        let second = Arc::new(ConfigEntry::new("{}", 2, Some("b".to_string())));
        cache.write("key", Arc::clone(&first));

        let writer = {
            let cache = Arc::clone(&cache);
            let (first, second) = (Arc::clone(&first), Arc::clone(&second));
            tokio::spawn(async move {
                for i in 0..500 {
                    let next = if i % 2 == 0 { &second } else { &first };
                    cache.set("key", Arc::clone(next)).await;
                }
            })
        };

        let readers = (0..4).map(|_| {
            let cache = Arc::clone(&cache);
            let (first, second) = (Arc::clone(&first), Arc::clone(&second));
            tokio::spawn(async move {
                for _ in 0..500 {
                    let seen = cache.get("key").await;
                    assert!(Arc::ptr_eq(&seen, &first) || Arc::ptr_eq(&seen, &second));
                }
            })
        });

        writer.await.unwrap();
        for result in futures::future::join_all(readers).await {
            result.unwrap();
        }
    }
}
