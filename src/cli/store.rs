//! Inspect and seed commands - read entries through the configured cache and
//! publish them to its external store

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::domain::cache::{ConfigCache, ExternalCache};
use crate::domain::config_entry::{self, ConfigEntry};
use crate::infrastructure::cache::CacheFactory;

use super::payload::describe;

/// Arguments for the seed command
#[derive(Args, Clone, Debug)]
pub struct SeedArgs {
    /// Config JSON file to publish
    #[arg(long)]
    pub file: PathBuf,

    /// ETag to record with the config
    #[arg(long)]
    pub etag: Option<String>,
}

/// Prints the entry the cache currently serves
pub async fn inspect() -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let (cache, key) = super::open_cache(&config).await?;

    let entry = cache.get(&key).await;
    println!("key: {}\n{}", key, describe(&entry));

    Ok(())
}

/// Publishes a config file to the external store as the current entry
pub async fn seed(args: SeedArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let config_json = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    if config_json.is_empty() {
        anyhow::bail!("{} is empty; empty entries are never published", args.file.display());
    }

    let key = config.cache.key_deriver()?.derive();
    let store = CacheFactory::new()
        .create_store(&config.cache.to_cache_config()?)
        .await?
        .context("No external cache backend configured; set cache.backend to publish")?;

    let entry = ConfigEntry::new(config_json, ConfigEntry::generate_timestamp(), args.etag);
    publish(store.as_ref(), &key, &entry).await?;

    info!(key = %key, timestamp = entry.timestamp(), "Seeded cache entry");

    Ok(())
}

/// Writes `entry` under `key`, failing when the store rejects the write
async fn publish(store: &dyn ExternalCache, key: &str, entry: &ConfigEntry) -> anyhow::Result<()> {
    store
        .set(key, &config_entry::serialize(entry))
        .await
        .with_context(|| format!("Failed to publish entry under key {}", key))
}
