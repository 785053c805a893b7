mod common;

use common::{Call, Terminated, entries, journal, journal_sinks};
use rask_log_fanout::{FanOutLogger, FatalExit, LogLevel, MemorySink, fields};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

#[test]
fn test_fatal_records_secondaries_before_primary_terminates() {
    let journal = journal();
    let logger = FanOutLogger::from_sinks(journal_sinks(&["a", "b", "c"], &journal));
    let fields = fields!("dev", "sda", "free_mb", 0);

    let result = catch_unwind(AssertUnwindSafe(|| {
        logger.fatal("disk full", &fields);
    }));

    let payload = result.unwrap_err();
    assert_eq!(payload.downcast_ref::<Terminated>().unwrap().0, "a");

    let error_call = Call::Log {
        level: LogLevel::Error,
        message: "disk full".to_string(),
        fields: fields.clone(),
    };
    assert_eq!(
        entries(&journal),
        vec![
            ("b".to_string(), error_call.clone()),
            ("c".to_string(), error_call),
            ("b".to_string(), Call::Flush),
            ("c".to_string(), Call::Flush),
            (
                "a".to_string(),
                Call::Fatal {
                    message: "disk full".to_string(),
                    fields,
                }
            ),
        ]
    );
}

#[test]
fn test_fatal_with_single_sink_only_terminates() {
    let journal = journal();
    let logger = FanOutLogger::from_sinks(journal_sinks(&["only"], &journal));

    let result = catch_unwind(AssertUnwindSafe(|| {
        logger.fatal("bye", &[]);
    }));

    assert!(result.is_err());
    let entries = entries(&journal);
    assert_eq!(entries.len(), 1);
    assert!(matches!(entries[0].1, Call::Fatal { .. }));
}

#[test]
fn test_fatal_without_sinks_is_a_no_op() {
    let logger = FanOutLogger::new();
    let result = catch_unwind(AssertUnwindSafe(|| {
        logger.fatal("nobody listening", &fields!("k", 1));
    }));
    assert!(result.is_ok());
}

#[test]
fn test_log_at_fatal_level_uses_fatal_protocol() {
    let primary = Arc::new(MemorySink::new());
    let secondary = Arc::new(MemorySink::new());
    let logger = FanOutLogger::new()
        .with_sink(primary.clone())
        .with_sink(secondary.clone());

    let result = catch_unwind(AssertUnwindSafe(|| {
        logger.log(LogLevel::Fatal, "unrecoverable", &[]);
    }));

    let payload = result.unwrap_err();
    assert_eq!(
        payload.downcast_ref::<FatalExit>(),
        Some(&FatalExit {
            message: "unrecoverable".to_string()
        })
    );
    assert_eq!(primary.records()[0].level, LogLevel::Fatal);
    assert_eq!(secondary.records()[0].level, LogLevel::Error);
    assert_eq!(secondary.flush_count(), 1);
}

#[test]
fn test_secondaries_above_error_threshold_skip_fatal_event() {
    let primary = Arc::new(MemorySink::new());
    let secondary = Arc::new(MemorySink::with_level(LogLevel::Fatal));
    let logger = FanOutLogger::new()
        .with_sink(primary.clone())
        .with_sink(secondary.clone());

    let payload = catch_unwind(AssertUnwindSafe(|| {
        logger.fatal("down", &[]);
    }))
    .unwrap_err();
    assert_eq!(payload.downcast_ref::<FatalExit>().unwrap().message, "down");

    // The secondary only sees an error-level call, which its own threshold drops.
    assert!(secondary.is_empty());
    assert_eq!(primary.len(), 1);
}
