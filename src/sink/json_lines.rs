// Structured sink: every accepted event becomes one ND-JSON line
// {"timestamp":..,"level":..,"message":..,"fields":{..},"caller":..}.
// Output is buffered; `flush` (called by the fan-out logger before the
// primary sink terminates the process) pushes it to the destination.

use super::{LogSink, SinkSettings};
use crate::domain::{Field, LogLevel, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::panic::Location;
use std::path::{Path, PathBuf};
use tracing::error;

pub struct JsonLinesSink<W: Write + Send> {
    settings: SinkSettings,
    writer: Mutex<W>,
    path: Option<PathBuf>,
}

impl JsonLinesSink<BufWriter<File>> {
    /// Opens `path` for appending, creating the file and its parent
    /// directories if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            settings: SinkSettings::default(),
            writer: Mutex::new(BufWriter::new(file)),
            path: Some(path.to_path_buf()),
        })
    }
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            settings: SinkSettings::default(),
            writer: Mutex::new(writer),
            path: None,
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

    /// File backing this sink, when created with [`JsonLinesSink::create`].
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Runs `f` with exclusive access to the underlying writer.
    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        let mut writer = self.writer.lock();
        f(&mut *writer)
    }

    fn write_record(&self, record: &Record) -> io::Result<()> {
        let line = serde_json::to_string(record)?;
        let mut writer = self.writer.lock();
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")
    }
}

impl<W: Write + Send> LogSink for JsonLinesSink<W> {
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
        let record = Record::capture(level, message, fields, caller, self.settings.show_caller());
        if let Err(e) = self.write_record(&record) {
            error!("Failed to write record to JSON lines sink: {e}");
        }
    }

    fn flush(&self) {
        if let Err(e) = self.writer.lock().flush() {
            error!("Failed to flush JSON lines sink: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::TempDir;

    fn lines(sink: &JsonLinesSink<Vec<u8>>) -> Vec<Value> {
        sink.with_writer(|buf| {
            String::from_utf8(buf.clone())
                .unwrap()
                .lines()
                .map(|line| serde_json::from_str(line).unwrap())
                .collect()
        })
    }

    #[test]
    fn test_writes_one_json_object_per_event() {
        let sink = JsonLinesSink::new(Vec::new());
        sink.info("a", &[Field::new("retries", 3)], Location::caller());
        sink.error("b", &[Field::new("host", "db1")], Location::caller());

        let records = lines(&sink);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["level"], "info");
        assert_eq!(records[0]["fields"]["retries"], 3);
        assert_eq!(records[1]["message"], "b");
        assert_eq!(records[1]["fields"]["host"], "db1");
        assert!(records[1].get("caller").is_none());
    }

    #[test]
    fn test_caller_field_follows_flag() {
        let sink = JsonLinesSink::new(Vec::new()).with_level(LogLevel::Trace);
        sink.set_caller(true);
        sink.trace("t", &[], Location::caller());

        let records = lines(&sink);
        let caller = records[0]["caller"].as_str().unwrap();
        assert!(caller.contains("json_lines.rs:"), "got: {caller}");
    }

    #[test]
    fn test_create_makes_parent_dirs_and_flushes_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("app.jsonl");

        let sink = JsonLinesSink::create(&path).unwrap();
        assert_eq!(sink.path(), Some(path.as_path()));
        sink.warn("disk almost full", &[Field::new("pct", 91)], Location::caller());
        sink.flush();

        let content = std::fs::read_to_string(&path).unwrap();
        let record: Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(record["level"], "warn");
        assert_eq!(record["fields"]["pct"], 91);
    }

    #[test]
    fn test_create_appends_to_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.jsonl");
        std::fs::write(&path, "{\"existing\":true}\n").unwrap();

        let sink = JsonLinesSink::create(&path).unwrap();
        sink.info("next", &[], Location::caller());
        sink.flush();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
