//! Destinations for log lines.

use tracing::Level;

/// Receives one formatted line per filesystem call.
///
/// Implemented for every `Fn(&str) + Send + Sync` closure, so the simplest
/// sink is a closure:
///
/// ```rust
/// use logfs::LogSink;
///
/// let sink = |line: &str| eprintln!("fs: {line}");
/// sink.log("Root(): \"/\"");
/// ```
///
/// Sinks are treated as infallible; a sink that can fail must deal with the
/// failure itself.
pub trait LogSink: Send + Sync {
    /// Record one line.
    fn log(&self, line: &str);
}

impl<F> LogSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn log(&self, line: &str) {
        self(line)
    }
}

/// Sink that emits every line as a `tracing` event with target `logfs`.
///
/// ```rust
/// use logfs::{MemoryFs, TracingSink, wrap};
/// use tracing::Level;
///
/// let fs = wrap(MemoryFs::new(), TracingSink::new().with_level(Level::INFO));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    level: Level,
}

impl TracingSink {
    /// A sink emitting at `DEBUG`.
    pub fn new() -> Self {
        Self {
            level: Level::DEBUG,
        }
    }

    /// Emit at `level` instead.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// The level events are emitted at.
    pub fn level(&self) -> Level {
        self.level
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for TracingSink {
    fn log(&self, line: &str) {
        // `tracing` macros need the level at compile time.
        if self.level == Level::ERROR {
            tracing::error!(target: "logfs", "{line}");
        } else if self.level == Level::WARN {
            tracing::warn!(target: "logfs", "{line}");
        } else if self.level == Level::INFO {
            tracing::info!(target: "logfs", "{line}");
        } else if self.level == Level::DEBUG {
            tracing::debug!(target: "logfs", "{line}");
        } else {
            tracing::trace!(target: "logfs", "{line}");
        }
    }
}
