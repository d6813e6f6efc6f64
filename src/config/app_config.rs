use std::time::Duration;

use serde::Deserialize;

use crate::domain::cache::key::{DEFAULT_PRODUCT_TYPE, DEFAULT_PRODUCT_VERSION};
use crate::domain::cache::CacheKeyDeriver;
use crate::domain::diagnostics::LogLevel;
use crate::domain::DomainError;
use crate::infrastructure::cache::{CacheBackend, CacheConfig};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub cache: CacheSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Cache section as it appears in configuration files and the environment
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// SDK key whose config slot is read and written
    pub sdk_key: Option<String>,
    pub product_type: String,
    pub product_version: String,
    /// Minimum level of cache diagnostics
    pub diagnostics_level: LogLevel,
    /// External tier: none, in_memory or redis
    pub backend: String,
    pub redis_url: Option<String>,
    pub key_prefix: Option<String>,
    pub ttl_secs: Option<u64>,
    pub max_capacity: Option<u64>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            sdk_key: None,
            product_type: DEFAULT_PRODUCT_TYPE.to_string(),
            product_version: DEFAULT_PRODUCT_VERSION.to_string(),
            diagnostics_level: LogLevel::default(),
            backend: CacheBackend::default().to_string(),
            redis_url: None,
            key_prefix: None,
            ttl_secs: None,
            max_capacity: None,
        }
    }
}

impl CacheSettings {
    /// Builds the key deriver for the configured SDK key
    pub fn key_deriver(&self) -> Result<CacheKeyDeriver, DomainError> {
        let sdk_key = self
            .sdk_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| DomainError::validation("cache.sdk_key must be set"))?;

        Ok(CacheKeyDeriver::new(sdk_key)
            .with_product_type(&self.product_type)
            .with_product_version(&self.product_version))
    }

    /// Converts the settings into the factory configuration
    pub fn to_cache_config(&self) -> Result<CacheConfig, DomainError> {
        Ok(CacheConfig {
            backend: self.backend.parse()?,
            redis_url: self.redis_url.clone(),
            key_prefix: self.key_prefix.clone(),
            ttl: self.ttl_secs.map(Duration::from_secs),
            max_capacity: self.max_capacity,
        })
    }
}

impl AppConfig {
    /// Loads `config/default`, `config/local` and `APP__*` environment variables, in that order
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(
            config::Config::builder()
                .add_source(config::File::with_name("config/default").required(false))
                .add_source(config::File::with_name("config/local").required(false))
                .add_source(
                    config::Environment::with_prefix("APP")
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    fn load_from(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, config::ConfigError> {
        builder.build()?.try_deserialize()
    }
}
