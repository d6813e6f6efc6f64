//! In-process external cache using moka
//!
//! Stands in for a network store when several caches in one process should
//! share payloads, and in tests.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::domain::cache::ExternalCache;
use crate::domain::DomainError;

/// Configuration for the moka external cache
#[derive(Debug, Clone)]
pub struct InMemoryExternalCacheConfig {
    /// Maximum number of payloads
    pub max_capacity: u64,
    /// Expiration applied to every payload
    pub ttl: Option<Duration>,
}

impl Default for InMemoryExternalCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            ttl: None,
        }
    }
}

impl InMemoryExternalCacheConfig {
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

/// Thread-safe payload store; clones share the same entries
#[derive(Debug, Clone)]
pub struct InMemoryExternalCache {
    cache: MokaCache<String, String>,
}

impl Default for InMemoryExternalCache {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryExternalCache {
    pub fn new() -> Self {
        Self::with_config(InMemoryExternalCacheConfig::default())
    }

    pub fn with_config(config: InMemoryExternalCacheConfig) -> Self {
        let mut builder = MokaCache::builder().max_capacity(config.max_capacity);

        if let Some(ttl) = config.ttl {
            builder = builder.time_to_live(ttl);
        }

        Self {
            cache: builder.build(),
        }
    }
}

#[async_trait]
impl ExternalCache for InMemoryExternalCache {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.cache.get(key).await)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.cache.insert(key.to_string(), value.to_string()).await;
        Ok(())
    }
}
