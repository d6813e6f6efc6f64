//! CLI module for the config cache
//!
//! Provides subcommands for working with a shared config cache:
//! - `key`: derive the cache key of an SDK key
//! - `encode` / `decode`: convert between config files and cache payloads
//! - `inspect`: read the configured SDK key's entry through the cache
//! - `seed`: publish a config file through the cache

pub mod key;
pub mod payload;
pub mod store;

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::cache::{CacheFactory, ConfigCacheFacade};
use crate::infrastructure::diagnostics::TracingLogger;
use crate::infrastructure::logging;

/// Config cache - derive keys and inspect shared cache payloads
#[derive(Parser)]
#[command(name = "config-cache")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the cache key of an SDK key
    Key(key::KeyArgs),

    /// Print the cache payload for a config file
    Encode(payload::EncodeArgs),

    /// Print the fields of a cache payload
    Decode(payload::DecodeArgs),

    /// Read the configured SDK key's entry through the cache
    Inspect,

    /// Publish a config file through the cache
    Seed(store::SeedArgs),
}

/// Runs the parsed command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Key(args) => key::run(args),
        Command::Encode(args) => payload::encode(args),
        Command::Decode(args) => payload::decode(args),
        Command::Inspect => store::inspect().await,
        Command::Seed(args) => store::seed(args).await,
    }
}

/// Loads `.env` and the application configuration, then installs logging
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_logging(&config.logging)?;

    Ok(config)
}

/// Builds the cache described by the configuration and the key it serves
pub(crate) async fn open_cache(
    config: &AppConfig,
) -> anyhow::Result<(Arc<ConfigCacheFacade>, String)> {
    let key = config.cache.key_deriver()?.derive();
    let cache_config = config.cache.to_cache_config()?;

    let logger = Arc::new(TracingLogger::new(config.cache.diagnostics_level));
    let cache = CacheFactory::new().create(&cache_config, logger).await?;

    if !cache.is_external() {
        tracing::warn!("No external cache backend configured, only the local tier is used");
    }

    Ok((cache, key))
}
