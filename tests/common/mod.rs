//! Shared test support: a sink that journals every call it receives, so
//! ordering across several sinks can be asserted.

#![allow(dead_code)]

use parking_lot::Mutex;
use rask_log_fanout::{Field, LogLevel, LogSink, SharedSink};
use std::panic::Location;
use std::sync::Arc;

/// One observed call on a sink.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetLevel(LogLevel),
    SetCaller(bool),
    Log {
        level: LogLevel,
        message: String,
        fields: Vec<Field>,
    },
    Flush,
    Fatal {
        message: String,
        fields: Vec<Field>,
    },
}

pub type Journal = Arc<Mutex<Vec<(String, Call)>>>;

/// Panic payload standing in for process termination.
#[derive(Debug)]
pub struct Terminated(pub String);

pub struct JournalSink {
    name: String,
    journal: Journal,
}

impl JournalSink {
    pub fn new(name: &str, journal: &Journal) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            journal: journal.clone(),
        })
    }

    fn record(&self, call: Call) {
        self.journal.lock().push((self.name.clone(), call));
    }
}

impl LogSink for JournalSink {
    fn set_level(&self, level: LogLevel) {
        self.record(Call::SetLevel(level));
    }

    fn set_caller(&self, enabled: bool) {
        self.record(Call::SetCaller(enabled));
    }

    fn log(
        &self,
        level: LogLevel,
        message: &str,
        fields: &[Field],
        _caller: &'static Location<'static>,
    ) {
        self.record(Call::Log {
            level,
            message: message.to_string(),
            fields: fields.to_vec(),
        });
    }

    fn flush(&self) {
        self.record(Call::Flush);
    }

    fn fatal(&self, message: &str, fields: &[Field], _caller: &'static Location<'static>) -> ! {
        self.record(Call::Fatal {
            message: message.to_string(),
            fields: fields.to_vec(),
        });
        std::panic::panic_any(Terminated(self.name.clone()))
    }
}

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

/// Journal-backed sinks named after `names`, in order.
pub fn journal_sinks(names: &[&str], journal: &Journal) -> Vec<SharedSink> {
    names
        .iter()
        .map(|name| JournalSink::new(name, journal) as SharedSink)
        .collect()
}

pub fn entries(journal: &Journal) -> Vec<(String, Call)> {
    journal.lock().clone()
}
