//! Key command - prints the cache key of an SDK key

use clap::Args;

use crate::domain::cache::key::{DEFAULT_PRODUCT_TYPE, DEFAULT_PRODUCT_VERSION};
use crate::domain::cache::CacheKeyDeriver;

/// Arguments for the key command
#[derive(Args, Clone, Debug)]
pub struct KeyArgs {
    /// SDK key identifying the config
    #[arg(long)]
    pub sdk_key: String,

    /// Product type of the config resource
    #[arg(long, default_value = DEFAULT_PRODUCT_TYPE)]
    pub product_type: String,

    /// Product version of the config resource
    #[arg(long, default_value = DEFAULT_PRODUCT_VERSION)]
    pub product_version: String,
}

impl KeyArgs {
    fn deriver(&self) -> CacheKeyDeriver {
        CacheKeyDeriver::new(&self.sdk_key)
            .with_product_type(&self.product_type)
            .with_product_version(&self.product_version)
    }
}

/// Prints the derived key
pub fn run(args: KeyArgs) -> anyhow::Result<()> {
    println!("{}", args.deriver().derive());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use clap::Parser;

    fn parse(args: &[&str]) -> KeyArgs {
        let mut argv = vec!["config-cache", "key"];
        argv.extend_from_slice(args);

        match Cli::try_parse_from(argv).unwrap().command {
            Command::Key(args) => args,
            _ => panic!("expected key command"),
        }
    }

    #[test]
    fn test_defaults_derive_published_key() {
        let args = parse(&["--sdk-key", "test2"]);

        assert_eq!(args.product_type, "config");
        assert_eq!(args.product_version, "v5");
        assert_eq!(
            args.deriver().derive(),
            "c09513b1756de9e4bc48815ec7a142b2441ed4d5"
        );
    }

    #[test]
    fn test_product_overrides() {
        let args = parse(&["--sdk-key", "test2", "--product-version", "v6"]);

        assert_ne!(
            args.deriver().derive(),
            "c09513b1756de9e4bc48815ec7a142b2441ed4d5"
        );
    }
}
