//! Logger that keeps every line in memory

use parking_lot::Mutex;

use super::level::LogLevel;
use super::traits::Logger;

/// Captures log lines so tests can assert on diagnostics
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured lines, oldest first
    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.lock().clone()
    }

    /// Captured messages at exactly `level`
    pub fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.lines.lock().push((level, message.to_string()));
    }
}

impl Logger for MemoryLogger {
    fn debug(&self, message: &str) {
        self.push(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_logger_captures_in_order() {
        let logger = MemoryLogger::new();
        assert!(logger.is_empty());

        logger.info("first");
        logger.log(LogLevel::Error, "second");
        logger.warn(&format!("third {}", 3));

        let lines = logger.lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], (LogLevel::Info, "first".to_string()));
        assert_eq!(lines[1], (LogLevel::Error, "second".to_string()));
        assert_eq!(logger.messages_at(LogLevel::Warn), vec!["third 3".to_string()]);
    }
}
