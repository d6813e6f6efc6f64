//! Two-tier config cache reconciling the local tier with a shared external store

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::cache::{ConfigCache, ExternalCache};
use crate::domain::config_entry::{self, ConfigEntry};
use crate::domain::diagnostics::{Logger, LoggerWrapper};

use super::local::InMemoryConfigCache;

#[derive(Debug, Clone, Copy)]
enum StoreOperation {
    Read,
    Write,
}

/// Config cache backed by a possibly shared, fallible external store.
///
/// External failures are logged and absorbed. `get` then answers from the
/// local tier, and `set` keeps the local write it already made.
pub struct ExternalConfigCache {
    store: Arc<dyn ExternalCache>,
    local: InMemoryConfigCache,
    logger: LoggerWrapper,
}

impl fmt::Debug for ExternalConfigCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalConfigCache")
            .field("store", &"<ExternalCache>")
            .field("local", &self.local)
            .field("logger", &self.logger)
            .finish()
    }
}

impl ExternalConfigCache {
    pub fn new(store: Arc<dyn ExternalCache>, logger: Arc<dyn Logger>) -> Self {
        Self {
            store,
            local: InMemoryConfigCache::new(),
            logger: LoggerWrapper::new(logger),
        }
    }

    /// Converts a failed store interaction into a diagnostic and `None`
    fn absorb<T, E>(&self, operation: StoreOperation, result: Result<T, E>) -> Option<T>
    where
        E: Error + 'static,
    {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                match operation {
                    StoreOperation::Read => self.logger.cache_read_failed(&e),
                    StoreOperation::Write => self.logger.cache_write_failed(&e),
                }
                None
            }
        }
    }
}

#[async_trait]
impl ConfigCache for ExternalConfigCache {
    async fn get(&self, key: &str) -> Arc<ConfigEntry> {
        let payload = self.absorb(StoreOperation::Read, self.store.get(key).await);

        let Some(payload) = payload.flatten().filter(|payload| !payload.is_empty()) else {
            debug!(key, "No external payload, serving local entry");
            return self.local.read(key);
        };

        let Some(decoded) = self.absorb(StoreOperation::Read, config_entry::deserialize(&payload))
        else {
            return self.local.read(key);
        };

        let local = self.local.read(key);
        if decoded.same_content(&local) {
            return local;
        }

        debug!(key, timestamp = decoded.timestamp(), "Adopting external entry");

        let decoded = Arc::new(decoded);
        self.local.write(key, Arc::clone(&decoded));
        decoded
    }

    async fn set(&self, key: &str, entry: Arc<ConfigEntry>) {
        self.local.write(key, Arc::clone(&entry));

        // Another process may hold real data under this key
        if entry.is_empty() {
            debug!(key, timestamp = entry.timestamp(), "Empty entry kept local only");
            return;
        }

        let payload = config_entry::serialize(&entry);
        self.absorb(StoreOperation::Write, self.store.set(key, &payload).await);
    }

    fn get_in_memory(&self) -> Arc<ConfigEntry> {
        self.local.latest()
    }
}
