//! Cache payload format shared by every SDK that reads or writes the external cache
//!
//! A payload is three newline-separated fields:
//!
//! ```text
//! <timestamp in decimal milliseconds>\n<ETag or empty>\n<config JSON>
//! ```
//!
//! The last field runs to the end of the payload and may itself contain
//! newlines. The format must stay byte-identical across implementations.

use thiserror::Error;

use super::entity::ConfigEntry;

const SEPARATOR: char = '\n';
const SEPARATOR_COUNT: usize = 2;

/// Errors produced when a payload does not follow the cache payload format
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Number of values is fewer than expected: expected {expected} separators, found {found}")]
    MissingSeparator { expected: usize, found: usize },

    #[error("Invalid fetch time: '{value}'")]
    InvalidTimestamp { value: String },
}

/// Serializes an entry into the cache payload format
pub fn serialize(entry: &ConfigEntry) -> String {
    let etag = entry.http_etag().unwrap_or_default();
    let config_json = entry.config_json();

    let mut payload = String::with_capacity(20 + etag.len() + config_json.len());
    payload.push_str(&entry.timestamp().to_string());
    payload.push(SEPARATOR);
    payload.push_str(etag);
    payload.push(SEPARATOR);
    payload.push_str(config_json);
    payload
}

/// Parses a cache payload back into an entry.
///
/// Only the first two separators are significant. The body is taken
/// verbatim and is not validated as JSON.
pub fn deserialize(payload: &str) -> Result<ConfigEntry, DecodeError> {
    let mut fields = payload.splitn(SEPARATOR_COUNT + 1, SEPARATOR);

    let (Some(timestamp), Some(etag), Some(config_json)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(DecodeError::MissingSeparator {
            expected: SEPARATOR_COUNT,
            found: payload.matches(SEPARATOR).count(),
        });
    };

    let timestamp = parse_timestamp(timestamp)?;
    let etag = (!etag.is_empty()).then(|| etag.to_string());

    Ok(ConfigEntry::new(config_json, timestamp, etag))
}

fn parse_timestamp(value: &str) -> Result<i64, DecodeError> {
    let digits = value.strip_prefix('-').unwrap_or(value);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::InvalidTimestamp {
            value: value.to_string(),
        });
    }

    value.parse().map_err(|_| DecodeError::InvalidTimestamp {
        value: value.to_string(),
    })
}
