//! Diagnostics sink contract

use std::error::Error;
use std::fmt::{self, Debug};
use std::str::FromStr;

use serde::Deserialize;

use crate::domain::DomainError;

/// Severity of a diagnostic message, ordered from least to most severe.
///
/// `Off` is only meaningful as a minimum level and disables all messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Off,
}

impl LogLevel {
    /// Returns true if a message of `level` passes this minimum level
    pub fn is_enabled(self, level: LogLevel) -> bool {
        level != LogLevel::Off && level >= self
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
            LogLevel::Off => write!(f, "off"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" | "none" => Ok(LogLevel::Off),
            _ => Err(DomainError::configuration(format!(
                "Unknown log level: {}. Valid levels: debug, info, warn, error, off",
                s
            ))),
        }
    }
}

/// Numeric identifier of a diagnostic event, stable across SDKs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LogEventId(pub u32);

impl LogEventId {
    /// Reading from the external cache failed
    pub const CACHE_READ_FAILED: LogEventId = LogEventId(2200);
    /// Writing to the external cache failed
    pub const CACHE_WRITE_FAILED: LogEventId = LogEventId(2201);
}

impl fmt::Display for LogEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sink for diagnostic messages
pub trait Logger: Send + Sync + Debug {
    /// Minimum level this sink wants to receive
    fn level(&self) -> LogLevel {
        LogLevel::Warn
    }

    /// Records a message
    fn log(
        &self,
        level: LogLevel,
        event_id: LogEventId,
        message: &str,
        error: Option<&(dyn Error + 'static)>,
    );
}
