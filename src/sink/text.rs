use super::{LogSink, SinkSettings};
use crate::domain::record::format_caller;
use crate::domain::{Field, Fields, LogLevel};
use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::panic::Location;
use tracing::error;

/// Human-readable sink writing one line per event:
///
/// `2026-01-10T12:00:00.000Z INFO  connected host=db1 retries=3 caller=src/main.rs:12`
pub struct TextSink<W: Write + Send> {
    settings: SinkSettings,
    writer: Mutex<W>,
}

impl TextSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl TextSink<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            settings: SinkSettings::default(),
            writer: Mutex::new(writer),
        }
    }

    #[must_use]
    pub fn with_level(self, level: LogLevel) -> Self {
        self.settings.set_level(level);
        self
    }

    pub fn settings(&self) -> &SinkSettings {
        &self.settings
    }

    /// Runs `f` with exclusive access to the underlying writer.
    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        let mut writer = self.writer.lock();
        f(&mut *writer)
    }

    fn render(
        &self,
        level: LogLevel,
        message: &str,
        fields: &[Field],
        caller: &'static Location<'static>,
    ) -> String {
        let mut line = format!(
            "{} {} {}",
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            level.label(),
            message
        );
        if !fields.is_empty() {
            line.push(' ');
            line.push_str(&Fields(fields).to_string());
        }
        if self.settings.show_caller() {
            line.push_str(" caller=");
            line.push_str(&format_caller(caller));
        }
        line.push('\n');
        line
    }
}

impl<W: Write + Send> LogSink for TextSink<W> {
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
        let line = self.render(level, message, fields, caller);
        if let Err(e) = self.writer.lock().write_all(line.as_bytes()) {
            error!("Failed to write log line to text sink: {e}");
        }
    }

    fn flush(&self) {
        if let Err(e) = self.writer.lock().flush() {
            error!("Failed to flush text sink: {e}");
        }
    }
}
