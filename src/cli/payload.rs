//! Encode and decode commands - convert between config files and cache payloads

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use crate::domain::config_entry::{self, ConfigEntry};

/// Arguments for the encode command
#[derive(Args, Clone, Debug)]
pub struct EncodeArgs {
    /// Config JSON file; `-` reads stdin
    #[arg(long)]
    pub file: PathBuf,

    /// Fetch time in milliseconds since the Unix epoch (defaults to now)
    #[arg(long)]
    pub timestamp: Option<i64>,

    /// ETag to record with the config
    #[arg(long)]
    pub etag: Option<String>,
}

/// Arguments for the decode command
#[derive(Args, Clone, Debug)]
pub struct DecodeArgs {
    /// Payload file; `-` reads stdin
    #[arg(long)]
    pub file: PathBuf,
}

/// Prints the payload for a config file
pub fn encode(args: EncodeArgs) -> anyhow::Result<()> {
    let config_json = read_input(&args.file)?;
    print!("{}", encode_payload(config_json, args.timestamp, args.etag));
    Ok(())
}

/// Prints the fields of a payload
pub fn decode(args: DecodeArgs) -> anyhow::Result<()> {
    let payload = read_input(&args.file)?;
    let entry = config_entry::deserialize(&payload).context("Invalid cache payload")?;

    println!("{}", describe(&entry));
    Ok(())
}

fn encode_payload(config_json: String, timestamp: Option<i64>, etag: Option<String>) -> String {
    let timestamp = timestamp.unwrap_or_else(ConfigEntry::generate_timestamp);
    config_entry::serialize(&ConfigEntry::new(config_json, timestamp, etag))
}

/// Human-readable summary of an entry
pub(crate) fn describe(entry: &ConfigEntry) -> String {
    let fetched_at = chrono::DateTime::from_timestamp_millis(entry.timestamp())
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "out of range".to_string());

    format!(
        "timestamp: {} ({})\netag: {}\nempty: {}\nvalid json: {}\nbody bytes: {}",
        entry.timestamp(),
        fetched_at,
        entry.http_etag().unwrap_or("<none>"),
        entry.is_empty(),
        entry.config().is_some(),
        entry.config_json().len(),
    )
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read stdin")?;
        return Ok(input);
    }

    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_payload() {
        let payload = encode_payload("{}".to_string(), Some(1_686_756_435_844), Some("test-etag".to_string()));
        assert_eq!(payload, "1686756435844\ntest-etag\n{}");
    }

    #[test]
    fn test_describe() {
        let entry = ConfigEntry::new("{}", 1_686_756_435_844, None);
        let summary = describe(&entry);

        assert!(summary.contains("timestamp: 1686756435844 (2023-06-14T15:27:15.844+00:00)"));
        assert!(summary.contains("etag: <none>"));
        assert!(summary.contains("empty: false"));
        assert!(summary.contains("valid json: true"));
        assert!(summary.contains("body bytes: 2"));
    }
}
