use super::{LogSink, SinkSettings};
use crate::domain::{Field, LogLevel, Record};
use parking_lot::Mutex;
use std::panic::Location;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Panic payload raised by [`MemorySink::fatal`] in place of process exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatalExit {
    pub message: String,
}

/// Sink that keeps every accepted event in memory.
///
/// Its terminating operation records the event and unwinds with a
/// [`FatalExit`] payload instead of exiting, so a host (or a test) can
/// observe the fatal path with `std::panic::catch_unwind`.
#[derive(Debug, Default)]
pub struct MemorySink {
    settings: SinkSettings,
    records: Mutex<Vec<Record>>,
    flushes: AtomicUsize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(level: LogLevel) -> Self {
        Self {
            settings: SinkSettings::new(level, false),
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &SinkSettings {
        &self.settings
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|record| record.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl LogSink for MemorySink {
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
        self.records.lock().push(record);
    }

    fn flush(&self) {
        self.flushes.fetch_add(1, Ordering::SeqCst);
    }

    fn fatal(&self, message: &str, fields: &[Field], caller: &'static Location<'static>) -> ! {
        self.log(LogLevel::Fatal, message, fields, caller);
        self.flush();
        std::panic::panic_any(FatalExit {
            message: message.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[test]
    fn test_filters_below_threshold() {
        let sink = MemorySink::new();
        sink.debug("hidden", &[], Location::caller());
        sink.info("shown", &[], Location::caller());
        assert_eq!(sink.messages(), vec!["shown"]);
    }

    #[test]
    fn test_caller_recorded_only_when_enabled() {
        let sink = MemorySink::new();
        sink.info("a", &[], Location::caller());
        sink.set_caller(true);
        sink.info("b", &[], Location::caller());

        let records = sink.records();
        assert!(records[0].caller.is_none());
        assert!(records[1].caller.as_deref().unwrap().contains("memory.rs"));
    }

    #[test]
    fn test_fatal_unwinds_with_payload() {
        let sink = MemorySink::new();
        let result = catch_unwind(AssertUnwindSafe(|| {
            sink.fatal("boom", &[Field::new("code", 7)], Location::caller());
        }));

        let payload = result.unwrap_err();
        let exit = payload.downcast_ref::<FatalExit>().unwrap();
        assert_eq!(exit.message, "boom");

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, LogLevel::Fatal);
        assert_eq!(sink.flush_count(), 1);
    }

    #[test]
    fn test_clear() {
        let sink = MemorySink::new();
        sink.error("x", &[], Location::caller());
        assert_eq!(sink.len(), 1);
        sink.clear();
        assert!(sink.is_empty());
    }
}
