//! Cached configuration entry

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use once_cell::sync::{Lazy, OnceCell};
use serde_json::Value;

static EMPTY: Lazy<Arc<ConfigEntry>> = Lazy::new(|| Arc::new(ConfigEntry::new("", 0, None)));

/// A configuration document together with its fetch time and validator token.
///
/// Entries are immutable. Caches hold them behind an `Arc` and replace the
/// whole reference on update, so concurrent readers observe either the old or
/// the new entry.
#[derive(Clone)]
pub struct ConfigEntry {
    config_json: String,
    /// Parsed form of `config_json`, computed on first access and never serialized
    config: OnceCell<Option<Value>>,
    /// Milliseconds since the Unix epoch
    timestamp: i64,
    http_etag: Option<String>,
}

impl ConfigEntry {
    /// Creates a new entry. An empty `config_json` denotes "no known configuration".
    ///
    /// ETags that are empty or contain a newline are dropped, since the
    /// payload format cannot carry them.
    pub fn new(config_json: impl Into<String>, timestamp: i64, http_etag: Option<String>) -> Self {
        Self {
            config_json: config_json.into(),
            config: OnceCell::new(),
            timestamp,
            http_etag: http_etag.filter(|etag| !etag.is_empty() && !etag.contains('\n')),
        }
    }

    /// The zero-state sentinel: no content, timestamp 0, no ETag.
    ///
    /// Every call returns the same shared allocation.
    pub fn empty() -> Arc<ConfigEntry> {
        Arc::clone(&EMPTY)
    }

    /// Returns true if `entry` is the shared sentinel returned by [`ConfigEntry::empty`]
    pub fn is_empty_sentinel(entry: &Arc<ConfigEntry>) -> bool {
        Arc::ptr_eq(entry, &EMPTY)
    }

    /// Current wall-clock time in milliseconds since the Unix epoch
    pub fn generate_timestamp() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn config_json(&self) -> &str {
        &self.config_json
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn http_etag(&self) -> Option<&str> {
        self.http_etag.as_deref()
    }

    /// True when the entry carries no configuration document
    pub fn is_empty(&self) -> bool {
        self.config_json.is_empty()
    }

    /// Parsed configuration document.
    ///
    /// Returns `None` for empty entries and for bodies that are not valid JSON.
    pub fn config(&self) -> Option<&Value> {
        self.config
            .get_or_init(|| {
                if self.config_json.is_empty() {
                    None
                } else {
                    serde_json::from_str(&self.config_json).ok()
                }
            })
            .as_ref()
    }

    /// Returns a copy of this entry stamped with a different fetch time
    pub fn with_timestamp(&self, timestamp: i64) -> Self {
        Self {
            timestamp,
            ..self.clone()
        }
    }

    /// True when both entries carry the same document text
    pub fn same_content(&self, other: &ConfigEntry) -> bool {
        self.config_json == other.config_json
    }

    /// True for the empty sentinel and for entries fetched longer than
    /// `expiration` ago
    pub fn is_expired(&self, expiration: Duration) -> bool {
        if std::ptr::eq(self, Arc::as_ptr(&*EMPTY)) {
            return true;
        }

        let expiration_ms = i64::try_from(expiration.as_millis()).unwrap_or(i64::MAX);

        self.timestamp.saturating_add(expiration_ms) < Self::generate_timestamp()
    }
}

impl PartialEq for ConfigEntry {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp
            && self.http_etag == other.http_etag
            && self.config_json == other.config_json
    }
}

impl Eq for ConfigEntry {}

impl fmt::Debug for ConfigEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigEntry")
            .field("timestamp", &self.timestamp)
            .field("http_etag", &self.http_etag)
            .field("config_json_len", &self.config_json.len())
            .finish()
    }
}
