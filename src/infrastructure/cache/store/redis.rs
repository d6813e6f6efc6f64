//! Redis-backed external cache

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use crate::domain::cache::ExternalCache;
use crate::domain::DomainError;

/// Configuration for the Redis external cache
#[derive(Debug, Clone)]
pub struct RedisExternalCacheConfig {
    /// Redis connection URL (e.g., "redis://127.0.0.1:6379")
    pub url: String,
    /// Expiration applied to every payload; payloads never expire when unset
    pub ttl: Option<Duration>,
    /// Key prefix for namespacing
    pub key_prefix: Option<String>,
    /// Connection timeout
    pub connection_timeout: Duration,
}

impl Default for RedisExternalCacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            ttl: None,
            key_prefix: None,
            connection_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisExternalCacheConfig {
    /// Creates a new configuration with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Sets the payload expiration
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Sets the key prefix
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Sets the connection timeout
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    fn prefix_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

/// External cache storing payloads as plain Redis strings, so SDKs in other
/// languages pointed at the same instance read the same values.
#[derive(Clone)]
pub struct RedisExternalCache {
    connection: ConnectionManager,
    config: RedisExternalCacheConfig,
}

impl fmt::Debug for RedisExternalCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisExternalCache")
            .field("config", &self.config)
            .field("connection", &"<ConnectionManager>")
            .finish()
    }
}

impl RedisExternalCache {
    /// Connects to Redis
    pub async fn new(config: RedisExternalCacheConfig) -> Result<Self, DomainError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| DomainError::cache(format!("Failed to create Redis client: {}", e)))?;

        let connection = tokio::time::timeout(
            config.connection_timeout,
            ConnectionManager::new(client),
        )
        .await
        .map_err(|_| {
            DomainError::cache(format!(
                "Timed out connecting to Redis after {:?}",
                config.connection_timeout
            ))
        })?
        .map_err(|e| DomainError::cache(format!("Failed to connect to Redis: {}", e)))?;

        tracing::info!(prefix = ?config.key_prefix, "Connected to Redis external cache");

        Ok(Self { connection, config })
    }

    /// Connects to Redis with default configuration
    pub async fn with_url(url: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(RedisExternalCacheConfig::new(url)).await
    }
}

#[async_trait]
impl ExternalCache for RedisExternalCache {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let prefixed_key = self.config.prefix_key(key);
        let mut conn = self.connection.clone();

        let result: Option<String> = conn.get(&prefixed_key).await.map_err(|e| {
            DomainError::cache(format!("Failed to get key '{}': {}", key, e))
        })?;

        Ok(result)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let prefixed_key = self.config.prefix_key(key);
        let mut conn = self.connection.clone();

        let result: redis::RedisResult<()> = match self.config.ttl {
            Some(ttl) => conn.set_ex(&prefixed_key, value, ttl.as_secs().max(1)).await,
            None => conn.set(&prefixed_key, value).await,
        };

        result.map_err(|e| DomainError::cache(format!("Failed to set key '{}': {}", key, e)))
    }
}
