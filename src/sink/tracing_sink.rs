use super::{LogSink, SinkSettings};
use crate::domain::record::format_caller;
use crate::domain::{Field, Fields, LogLevel};
use std::panic::Location;
use tracing::{Level, event};

/// Re-emits events into the `tracing` ecosystem, so a fan-out can feed
/// whatever subscriber the host application installed.
///
/// Fields are rendered into a single `fields` value since `tracing` field
/// names must be known at compile time. Fatal events are emitted at ERROR
/// with `fatal = true`.
#[derive(Debug, Default)]
pub struct TracingSink {
    settings: SinkSettings,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_level(self, level: LogLevel) -> Self {
        self.settings.set_level(level);
        self
    }

    pub fn settings(&self) -> &SinkSettings {
        &self.settings
    }
}

impl LogSink for TracingSink {
    fn set_level(&self, level: LogLevel) {
        self.settings.set_level(level);
    }

    fn set_caller(&self, enabled: bool) {
        self.settings.set_caller(enabled);
    }

    fn log(
        &self,
        level: LogLevel,
        message: &str,
        fields: &[Field],
        caller: &'static Location<'static>,
    ) {
        if !self.settings.enabled(level) {
            return;
        }
        let fields = Fields(fields);
        let caller = self.settings.show_caller().then(|| format_caller(caller));
        let caller = caller.as_deref();

        match level {
            LogLevel::Trace => event!(Level::TRACE, fields = %fields, caller, "{message}"),
            LogLevel::Debug => event!(Level::DEBUG, fields = %fields, caller, "{message}"),
            LogLevel::Info => event!(Level::INFO, fields = %fields, caller, "{message}"),
            LogLevel::Warn => event!(Level::WARN, fields = %fields, caller, "{message}"),
            LogLevel::Error => event!(Level::ERROR, fields = %fields, caller, "{message}"),
            LogLevel::Fatal => {
                event!(Level::ERROR, fields = %fields, caller, fatal = true, "{message}");
            }
        }
    }
}
