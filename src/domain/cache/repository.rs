//! Cache trait definitions

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::config_entry::ConfigEntry;
use crate::domain::DomainError;

/// Contract of a shared, out-of-process key-value store holding serialized
/// cache payloads.
///
/// Implementations may fail on any call. Callers treat every failure as a
/// loss of freshness, never of correctness.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ExternalCache: Send + Sync {
    /// Gets the payload stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Stores `value` under `key`
    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;
}

/// Config cache used by the rest of the SDK.
///
/// Neither `get` nor `set` fails: callers always receive a usable entry,
/// possibly stale or empty.
#[async_trait]
pub trait ConfigCache: Send + Sync + Debug {
    /// Gets the most recent entry known for `key`
    async fn get(&self, key: &str) -> Arc<ConfigEntry>;

    /// Makes `entry` the current entry for `key`
    async fn set(&self, key: &str, entry: Arc<ConfigEntry>);

    /// Returns the most recently held entry without touching any external store
    fn get_in_memory(&self) -> Arc<ConfigEntry>;
}
