//! Remote Config Cache
//!
//! Client-side cache for remote configuration that several processes, and
//! SDKs written in other languages, can share through an external store:
//! - Portable cache key derivation (SHA-1 over a canonical key string)
//! - Portable cache payload format
//! - Two-tier cache: process-local entries reconciled with an optional
//!   external store (Redis or in-process), isolating every store failure

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    derive_key, CacheKeyDeriver, ConfigCache, ConfigEntry, DecodeError, DomainError,
    ExternalCache, LogEventId, LogLevel, Logger,
};
pub use infrastructure::cache::{CacheConfig, CacheFactory, ConfigCacheFacade};
