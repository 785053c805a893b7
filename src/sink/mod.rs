//! The sink capability contract and the bundled sink implementations.
//!
//! A sink is one independently configured log destination. The fan-out
//! logger only talks to sinks through [`LogSink`]; filtering and I/O are the
//! sink's business.

pub mod json_lines;
pub mod memory;
pub mod text;
pub mod tracing_sink;

use crate::domain::{Field, LogLevel};
use std::panic::Location;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

pub use json_lines::JsonLinesSink;
pub use memory::{FatalExit, MemorySink};
pub use text::TextSink;
pub use tracing_sink::TracingSink;

/// Exit status used by the default terminating operation.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Shared handle to a sink. Every logger derived from a common ancestor holds
/// clones of the same handles.
pub type SharedSink = Arc<dyn LogSink>;

/// Capability contract every log destination satisfies.
///
/// Configuration goes through `&self`: a sink is shared between loggers, and
/// a level or caller change made through one handle is seen by all of them.
pub trait LogSink: Send + Sync {
    /// Sets the minimum severity this sink accepts.
    fn set_level(&self, level: LogLevel);

    /// Enables or disables recording of the call-site origin.
    fn set_caller(&self, enabled: bool);

    /// Accepts one event. Implementations drop events below their threshold.
    fn log(
        &self,
        level: LogLevel,
        message: &str,
        fields: &[Field],
        caller: &'static Location<'static>,
    );

    fn trace(&self, message: &str, fields: &[Field], caller: &'static Location<'static>) {
        self.log(LogLevel::Trace, message, fields, caller);
    }

    fn debug(&self, message: &str, fields: &[Field], caller: &'static Location<'static>) {
        self.log(LogLevel::Debug, message, fields, caller);
    }

    fn info(&self, message: &str, fields: &[Field], caller: &'static Location<'static>) {
        self.log(LogLevel::Info, message, fields, caller);
    }

    fn warn(&self, message: &str, fields: &[Field], caller: &'static Location<'static>) {
        self.log(LogLevel::Warn, message, fields, caller);
    }

    fn error(&self, message: &str, fields: &[Field], caller: &'static Location<'static>) {
        self.log(LogLevel::Error, message, fields, caller);
    }

    /// Pushes any buffered output to its destination.
    fn flush(&self) {}

    /// Terminating operation: records the event at `Fatal`, flushes, and ends
    /// the process. Never returns normally.
    fn fatal(&self, message: &str, fields: &[Field], caller: &'static Location<'static>) -> ! {
        self.log(LogLevel::Fatal, message, fields, caller);
        self.flush();
        std::process::exit(FATAL_EXIT_CODE)
    }
}

/// Threshold and caller flag shared by the bundled sinks.
#[derive(Debug)]
pub struct SinkSettings {
    level: AtomicU8,
    show_caller: AtomicBool,
}

impl SinkSettings {
    pub fn new(level: LogLevel, show_caller: bool) -> Self {
        Self {
            level: AtomicU8::new(level as u8),
            show_caller: AtomicBool::new(show_caller),
        }
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Acquire))
    }

    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::Release);
    }

    pub fn show_caller(&self) -> bool {
        self.show_caller.load(Ordering::Acquire)
    }

    pub fn set_caller(&self, enabled: bool) {
        self.show_caller.store(enabled, Ordering::Release);
    }

    /// Whether an event at `level` passes the threshold.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level()
    }
}

impl Default for SinkSettings {
    fn default() -> Self {
        Self::new(LogLevel::default(), false)
    }
}
