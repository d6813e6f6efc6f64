//! Public entry point of the config cache

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cache::{ConfigCache, ExternalCache};
use crate::domain::config_entry::ConfigEntry;
use crate::domain::diagnostics::Logger;

use super::external::ExternalConfigCache;
use super::local::InMemoryConfigCache;

#[derive(Debug)]
enum Tier {
    Local(InMemoryConfigCache),
    External(ExternalConfigCache),
}

/// Config cache that is either local-only or local plus an external store,
/// chosen at construction
#[derive(Debug)]
pub struct ConfigCacheFacade {
    tier: Tier,
}

impl Default for ConfigCacheFacade {
    fn default() -> Self {
        Self::local()
    }
}

impl ConfigCacheFacade {
    /// Creates a cache without an external tier
    pub fn local() -> Self {
        Self {
            tier: Tier::Local(InMemoryConfigCache::new()),
        }
    }

    /// Creates a cache that shares entries through `store`
    pub fn with_external(store: Arc<dyn ExternalCache>, logger: Arc<dyn Logger>) -> Self {
        Self {
            tier: Tier::External(ExternalConfigCache::new(store, logger)),
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self.tier, Tier::External(_))
    }

    fn inner(&self) -> &dyn ConfigCache {
        match &self.tier {
            Tier::Local(cache) => cache,
            Tier::External(cache) => cache,
        }
    }
}

#[async_trait]
impl ConfigCache for ConfigCacheFacade {
    async fn get(&self, key: &str) -> Arc<ConfigEntry> {
        self.inner().get(key).await
    }

    async fn set(&self, key: &str, entry: Arc<ConfigEntry>) {
        self.inner().set(key, entry).await
    }

    fn get_in_memory(&self) -> Arc<ConfigEntry> {
        self.inner().get_in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::diagnostics::mock::RecordingLogger;
    use crate::domain::diagnostics::LogLevel;
    use crate::infrastructure::cache::store::InMemoryExternalCache;

    const CONFIG_JSON: &str = r#"{"p": {"u": "http://example.com", "r": 0}}"#;

    fn external_facade(store: InMemoryExternalCache) -> ConfigCacheFacade {
        ConfigCacheFacade::with_external(
            Arc::new(store),
            Arc::new(RecordingLogger::new(LogLevel::Warn)),
        )
    }

    #[tokio::test]
    async fn test_both_modes_follow_set_semantics() {
        for facade in [ConfigCacheFacade::local(), external_facade(InMemoryExternalCache::new())] {
            let key = "cache-key";

            // Empty initially
            assert!(ConfigEntry::is_empty_sentinel(&facade.get(key).await));

            // An empty entry with a newer timestamp replaces the held entry
            let empty = Arc::new(ConfigEntry::empty().with_timestamp(ConfigEntry::generate_timestamp()));
            facade.set(key, Arc::clone(&empty)).await;

            assert!(Arc::ptr_eq(&facade.get(key).await, &empty));
            assert!(Arc::ptr_eq(&facade.get_in_memory(), &empty));

            // A non-empty entry with an older timestamp replaces it too
            let older = Arc::new(ConfigEntry::new(
                CONFIG_JSON,
                empty.timestamp() - 1000,
                Some("\"ETAG\"".to_string()),
            ));
            facade.set(key, Arc::clone(&older)).await;

            assert!(Arc::ptr_eq(&facade.get(key).await, &older));
            assert!(Arc::ptr_eq(&facade.get_in_memory(), &older));
        }
    }

    #[tokio::test]
    async fn test_external_mode_publishes_to_store() {
        let store = InMemoryExternalCache::new();
        let facade = external_facade(store.clone());
        assert!(facade.is_external());

        let entry = Arc::new(ConfigEntry::new(CONFIG_JSON, 5, None));
        facade.set("key", entry).await;

        assert_eq!(
            store.get("key").await.unwrap().as_deref(),
            Some(format!("5\n\n{}", CONFIG_JSON).as_str())
        );
    }

    #[test]
    fn test_default_is_local() {
        assert!(!ConfigCacheFacade::default().is_external());
    }
}
