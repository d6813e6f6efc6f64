//! Cache factory for runtime selection of the external tier

use std::sync::Arc;
use std::time::Duration;

use crate::domain::cache::ExternalCache;
use crate::domain::diagnostics::Logger;
use crate::domain::DomainError;

use super::facade::ConfigCacheFacade;
use super::store::{
    InMemoryExternalCache, InMemoryExternalCacheConfig, RedisExternalCache,
    RedisExternalCacheConfig,
};

/// Supported external tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheBackend {
    /// Local tier only
    #[default]
    None,
    /// In-process moka store
    InMemory,
    /// Redis
    Redis,
}

impl std::fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheBackend::None => write!(f, "none"),
            CacheBackend::InMemory => write!(f, "in_memory"),
            CacheBackend::Redis => write!(f, "redis"),
        }
    }
}

impl std::str::FromStr for CacheBackend {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "none" | "local" => Ok(CacheBackend::None),
            "in_memory" | "inmemory" | "memory" => Ok(CacheBackend::InMemory),
            "redis" => Ok(CacheBackend::Redis),
            _ => Err(DomainError::configuration(format!(
                "Unknown cache backend: {}. Valid backends: none, in_memory, redis",
                s
            ))),
        }
    }
}

/// Configuration of the external tier
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// Which external tier to use
    pub backend: CacheBackend,
    /// Redis URL (required for the Redis backend)
    pub redis_url: Option<String>,
    /// Key prefix for namespacing (Redis only)
    pub key_prefix: Option<String>,
    /// Expiration of external payloads
    pub ttl: Option<Duration>,
    /// Maximum capacity (in-memory backend only)
    pub max_capacity: Option<u64>,
}

impl CacheConfig {
    /// Local tier only
    pub fn local() -> Self {
        Self::default()
    }

    /// In-process shared store
    pub fn in_memory() -> Self {
        Self {
            backend: CacheBackend::InMemory,
            ..Default::default()
        }
    }

    /// Redis shared store
    pub fn redis(url: impl Into<String>) -> Self {
        Self {
            backend: CacheBackend::Redis,
            redis_url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = Some(capacity);
        self
    }

    /// Creates config from environment variables
    pub fn from_env() -> Result<Self, DomainError> {
        let backend = std::env::var("CACHE_BACKEND")
            .unwrap_or_else(|_| "none".to_string())
            .parse()?;

        let ttl = std::env::var("CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs);

        let max_capacity = std::env::var("CACHE_MAX_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok());

        Ok(Self {
            backend,
            redis_url: std::env::var("REDIS_URL").ok(),
            key_prefix: std::env::var("CACHE_KEY_PREFIX").ok(),
            ttl,
            max_capacity,
        })
    }
}

/// Factory for creating config caches
#[derive(Debug, Default)]
pub struct CacheFactory;

impl CacheFactory {
    pub fn new() -> Self {
        Self
    }

    /// Creates a config cache based on configuration
    pub async fn create(
        &self,
        config: &CacheConfig,
        logger: Arc<dyn Logger>,
    ) -> Result<Arc<ConfigCacheFacade>, DomainError> {
        let Some(store) = self.create_store(config).await? else {
            tracing::debug!("No external cache configured");
            return Ok(Arc::new(ConfigCacheFacade::local()));
        };

        tracing::debug!(backend = %config.backend, "External cache configured");

        Ok(self.create_with_store(store, logger))
    }

    /// Creates the external store alone, or `None` for the local-only backend
    pub async fn create_store(
        &self,
        config: &CacheConfig,
    ) -> Result<Option<Arc<dyn ExternalCache>>, DomainError> {
        match config.backend {
            CacheBackend::None => Ok(None),
            CacheBackend::InMemory => Ok(Some(self.create_in_memory_store(config))),
            CacheBackend::Redis => self.create_redis_store(config).await.map(Some),
        }
    }

    /// Creates a config cache over a caller-provided store
    pub fn create_with_store(
        &self,
        store: Arc<dyn ExternalCache>,
        logger: Arc<dyn Logger>,
    ) -> Arc<ConfigCacheFacade> {
        Arc::new(ConfigCacheFacade::with_external(store, logger))
    }

    fn create_in_memory_store(&self, config: &CacheConfig) -> Arc<dyn ExternalCache> {
        let mut store_config = InMemoryExternalCacheConfig::default();

        if let Some(capacity) = config.max_capacity {
            store_config = store_config.with_max_capacity(capacity);
        }

        if let Some(ttl) = config.ttl {
            store_config = store_config.with_ttl(ttl);
        }

        Arc::new(InMemoryExternalCache::with_config(store_config))
    }

    async fn create_redis_store(
        &self,
        config: &CacheConfig,
    ) -> Result<Arc<dyn ExternalCache>, DomainError> {
        let url = config.redis_url.clone().ok_or_else(|| {
            DomainError::configuration("Redis URL is required for Redis cache backend")
        })?;

        let mut redis_config = RedisExternalCacheConfig::new(url);

        if let Some(prefix) = &config.key_prefix {
            redis_config = redis_config.with_key_prefix(prefix.clone());
        }

        if let Some(ttl) = config.ttl {
            redis_config = redis_config.with_ttl(ttl);
        }

        let store = RedisExternalCache::new(redis_config).await?;
        Ok(Arc::new(store))
    }
}
