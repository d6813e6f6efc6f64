use std::error::Error;
use std::sync::Arc;

use super::logger::{LogEventId, LogLevel, Logger};

/// Level-filtering front of a [`Logger`] with the cache's named diagnostics
#[derive(Debug, Clone)]
pub struct LoggerWrapper {
    logger: Arc<dyn Logger>,
}

impl LoggerWrapper {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.logger.level().is_enabled(level)
    }

    pub fn log(
        &self,
        level: LogLevel,
        event_id: LogEventId,
        message: &str,
        error: Option<&(dyn Error + 'static)>,
    ) {
        if self.is_enabled(level) {
            self.logger.log(level, event_id, message, error);
        }
    }

    pub fn cache_read_failed(&self, error: &(dyn Error + 'static)) {
        self.log(
            LogLevel::Error,
            LogEventId::CACHE_READ_FAILED,
            "Error occurred while reading the cache.",
            Some(error),
        );
    }

    pub fn cache_write_failed(&self, error: &(dyn Error + 'static)) {
        self.log(
            LogLevel::Error,
            LogEventId::CACHE_WRITE_FAILED,
            "Error occurred while writing the cache.",
            Some(error),
        );
    }
}
