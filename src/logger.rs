// src/logger.rs
// =============================================================================
// Logging capability handed to the downloader when it is constructed.
//
// The downloader never reaches for a global logger directly: it gets an
// Arc<dyn Logger> in its constructor. In the real binary that is a
// TracingLogger, which forwards every line to the `tracing` macros (and from
// there to stderr and the log file configured in main.rs). Tests hand in a
// RecordingLogger and assert on the lines it captured.
//
// Rust concepts:
// - Traits as interfaces: Logger is the capability, the structs implement it
// - Trait objects: Arc<dyn Logger> lets us pick the implementation at runtime
// - Send + Sync: required so the logger can be shared with the tokio runtime
// =============================================================================

use std::sync::Arc;

/// Severity of a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
}

/// Something that can receive human-readable progress and diagnostic lines.
///
/// Only [`Logger::log`] has to be implemented, the per-level helpers forward to it.
pub trait Logger: Send + Sync {
    fn log(&self, level: Level, message: &str);

    fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    fn warning(&self, message: &str) {
        self.log(Level::Warning, message);
    }

    fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }
}

/// Forwards log lines to the `tracing` macros.
///
/// The target is fixed to the crate name so RUST_LOG=gh_folder=debug works.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn shared() -> Arc<dyn Logger> {
        Arc::new(TracingLogger)
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::Debug => tracing::debug!(target: "gh_folder", "{}", message),
            Level::Info => tracing::info!(target: "gh_folder", "{}", message),
            Level::Warning => tracing::warn!(target: "gh_folder", "{}", message),
            Level::Error => tracing::error!(target: "gh_folder", "{}", message),
        }
    }
}

#[cfg(test)]
pub use recording::RecordingLogger;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_helpers_forward_to_log() {
        let logger = RecordingLogger::default();
        logger.debug("d");
        logger.info("i");
        logger.warning("w");
        logger.error("e");

        assert_eq!(
            logger.lines(),
            vec![
                (Level::Debug, "d".to_string()),
                (Level::Info, "i".to_string()),
                (Level::Warning, "w".to_string()),
                (Level::Error, "e".to_string()),
            ]
        );
        assert_eq!(logger.at(Level::Warning), vec!["w".to_string()]);
    }

    #[test]
    fn test_tracing_logger_without_subscriber() {
        // No subscriber installed: the lines are simply dropped
        let logger = TracingLogger::shared();
        logger.info("nobody is listening");
    }
}
