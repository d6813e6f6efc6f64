//! Diagnostics domain - severity, event ids and the logger contract

mod logger;
mod wrapper;

pub use logger::{LogEventId, LogLevel, Logger};
pub use wrapper::LoggerWrapper;

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::error::Error;
    use std::sync::Mutex;

    /// A message captured by [`RecordingLogger`]
    #[derive(Debug, Clone)]
    pub struct RecordedMessage {
        pub level: LogLevel,
        pub event_id: LogEventId,
        pub message: String,
        pub error: Option<String>,
    }

    /// Logger that keeps every message it receives
    #[derive(Debug)]
    pub struct RecordingLogger {
        level: LogLevel,
        messages: Mutex<Vec<RecordedMessage>>,
    }

    impl RecordingLogger {
        pub fn new(level: LogLevel) -> Self {
            Self {
                level,
                messages: Mutex::new(Vec::new()),
            }
        }

        pub fn messages(&self) -> Vec<RecordedMessage> {
            self.messages.lock().unwrap().clone()
        }

        pub fn reset(&self) {
            self.messages.lock().unwrap().clear();
        }

        /// Counts Error messages with `event_id`
        pub fn errors_with_id(&self, event_id: LogEventId) -> usize {
            self.messages
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.level == LogLevel::Error && m.event_id == event_id)
                .count()
        }
    }

    impl Logger for RecordingLogger {
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
            self.messages.lock().unwrap().push(RecordedMessage {
                level,
                event_id,
                message: message.to_string(),
                error: error.map(|e| e.to_string()),
            });
        }
    }
}
