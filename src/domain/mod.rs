//! Domain layer - Core cache types and contracts

pub mod cache;
pub mod config_entry;
pub mod diagnostics;
pub mod error;

pub use cache::{derive_key, CacheKeyDeriver, ConfigCache, ExternalCache};
pub use config_entry::{ConfigEntry, DecodeError};
pub use diagnostics::{LogEventId, LogLevel, Logger, LoggerWrapper};
pub use error::DomainError;
