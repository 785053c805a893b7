//! The fan-out logger.
//!
//! One call on a [`FanOutLogger`] is replayed, synchronously and in
//! registration order, on every attached sink. Mutators return a new logger
//! value; the sink handles themselves are shared, so level and caller changes
//! reach every logger holding the same sinks.

use crate::domain::{Field, LogLevel};
use crate::sink::SharedSink;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct FanOutLogger {
    sinks: Arc<[SharedSink]>,
    level: LogLevel,
    show_caller: bool,
}

impl FanOutLogger {
    /// Logger with no sinks, level `Info` and caller capture off.
    pub fn new() -> Self {
        Self {
            sinks: Arc::from(Vec::new()),
            level: LogLevel::default(),
            show_caller: false,
        }
    }

    /// Logger over `sinks` in the given order. The first one is primary.
    pub fn from_sinks<I>(sinks: I) -> Self
    where
        I: IntoIterator<Item = SharedSink>,
    {
        Self {
            sinks: sinks.into_iter().collect(),
            ..Self::new()
        }
    }

    /// Returns a logger whose sequence is this one's plus `sink` at the end.
    ///
    /// `self` and every other clone keep their own sequence. The new sink is
    /// taken as is; the recorded level and caller flag are not applied to it.
    #[must_use]
    pub fn with_sink(&self, sink: SharedSink) -> Self {
        let mut sinks = Vec::with_capacity(self.sinks.len() + 1);
        sinks.extend(self.sinks.iter().cloned());
        sinks.push(sink);

        Self {
            sinks: sinks.into(),
            ..self.clone()
        }
    }

    /// Sets `level` as the threshold of every held sink, in order, and
    /// returns a logger recording it.
    #[must_use]
    pub fn with_level(&self, level: LogLevel) -> Self {
        for sink in self.sinks.iter() {
            sink.set_level(level);
        }
        debug!(sinks = self.sinks.len(), %level, "Applied level to sinks");

        Self {
            level,
            ..self.clone()
        }
    }

    /// Toggles call-site capture on every held sink, in order. `None` means
    /// enabled.
    #[must_use]
    pub fn with_caller(&self, enabled: Option<bool>) -> Self {
        let enabled = enabled.unwrap_or(true);
        for sink in self.sinks.iter() {
            sink.set_caller(enabled);
        }
        debug!(sinks = self.sinks.len(), enabled, "Applied caller capture to sinks");

        Self {
            show_caller: enabled,
            ..self.clone()
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn show_caller(&self) -> bool {
        self.show_caller
    }

    pub fn sinks(&self) -> &[SharedSink] {
        &self.sinks
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    #[track_caller]
    pub fn trace(&self, message: &str, fields: &[Field]) {
        let caller = Location::caller();
        for sink in self.sinks.iter() {
            sink.trace(message, fields, caller);
        }
    }

    #[track_caller]
    pub fn debug(&self, message: &str, fields: &[Field]) {
        let caller = Location::caller();
        for sink in self.sinks.iter() {
            sink.debug(message, fields, caller);
        }
    }

    #[track_caller]
    pub fn info(&self, message: &str, fields: &[Field]) {
        let caller = Location::caller();
        for sink in self.sinks.iter() {
            sink.info(message, fields, caller);
        }
    }

    #[track_caller]
    pub fn warn(&self, message: &str, fields: &[Field]) {
        let caller = Location::caller();
        for sink in self.sinks.iter() {
            sink.warn(message, fields, caller);
        }
    }

    #[track_caller]
    pub fn error(&self, message: &str, fields: &[Field]) {
        let caller = Location::caller();
        for sink in self.sinks.iter() {
            sink.error(message, fields, caller);
        }
    }

    /// Records a fatal event on every sink and terminates through the primary
    /// sink.
    ///
    /// Secondary sinks receive the event at `Error` and are flushed; only
    /// then does the primary sink run its terminating operation. With no
    /// sinks attached nothing is recorded and the call returns.
    #[track_caller]
    pub fn fatal(&self, message: &str, fields: &[Field]) {
        let caller = Location::caller();
        let Some((primary, secondary)) = self.sinks.split_first() else {
            warn!(event = message, "Fatal event dropped: no sinks attached");
            return;
        };

        for sink in secondary {
            sink.error(message, fields, caller);
        }
        for sink in secondary {
            sink.flush();
        }

        primary.fatal(message, fields, caller)
    }

    /// Dispatches to the method matching `level`. `Fatal` terminates as
    /// [`FanOutLogger::fatal`] does.
    #[track_caller]
    pub fn log(&self, level: LogLevel, message: &str, fields: &[Field]) {
        match level {
            LogLevel::Trace => self.trace(message, fields),
            LogLevel::Debug => self.debug(message, fields),
            LogLevel::Info => self.info(message, fields),
            LogLevel::Warn => self.warn(message, fields),
            LogLevel::Error => self.error(message, fields),
            LogLevel::Fatal => self.fatal(message, fields),
        }
    }

    pub fn flush(&self) {
        for sink in self.sinks.iter() {
            sink.flush();
        }
    }
}

impl Default for FanOutLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FanOutLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FanOutLogger")
            .field("sinks", &self.sinks.len())
            .field("level", &self.level)
            .field("show_caller", &self.show_caller)
            .finish()
    }
}
