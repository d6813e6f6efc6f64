//! Diagnostics sink forwarding to `tracing`

use std::error::Error;

use crate::domain::diagnostics::{LogEventId, LogLevel, Logger};

/// Emits diagnostics as `tracing` events with `event_id` and `error` fields
#[derive(Debug, Clone, Default)]
pub struct TracingLogger {
    level: LogLevel,
}

impl TracingLogger {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }
}

impl Logger for TracingLogger {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn log(
        &self,
        level: LogLevel,
        event_id: LogEventId,
        message: &str,
        error: Option<&(dyn Error + 'static)>,
    ) {
        let error = error.map(|e| e.to_string());
        let error = error.as_deref();
        let event_id = event_id.0;

        match level {
            LogLevel::Debug => tracing::debug!(event_id, error, "{}", message),
            LogLevel::Info => tracing::info!(event_id, error, "{}", message),
            LogLevel::Warn => tracing::warn!(event_id, error, "{}", message),
            LogLevel::Error => tracing::error!(event_id, error, "{}", message),
            LogLevel::Off => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    use crate::domain::DomainError;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Buffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Buffer {
        type Writer = Buffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_emits_event_with_fields() {
        let buffer = Buffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_ansi(false)
            .finish();

        let logger = TracingLogger::new(LogLevel::Warn);
        let error = DomainError::cache("Operation failed");

        tracing::subscriber::with_default(subscriber, || {
            logger.log(
                LogLevel::Error,
                LogEventId::CACHE_READ_FAILED,
                "Error occurred while reading the cache.",
                Some(&error),
            );
        });

        let output = buffer.contents();
        assert!(output.contains("ERROR"));
        assert!(output.contains("event_id=2200"));
        assert!(output.contains("Cache error: Operation failed"));
        assert!(output.contains("Error occurred while reading the cache."));
    }

    #[test]
    fn test_default_level_is_warn() {
        assert_eq!(TracingLogger::default().level(), LogLevel::Warn);
    }
}
