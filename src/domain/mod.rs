//! Domain layer for rask-log-fanout.
//!
//! Contains the canonical types shared across all modules:
//! - `LogLevel`: Severity (Trace/Debug/Info/Warn/Error/Fatal)
//! - `Field`: One structured key/value pair attached to an event
//! - `Record`: Owned snapshot of an event as rendered by a sink

pub mod field;
pub mod log_level;
pub mod record;

pub use field::{Field, Fields};
pub use log_level::{LogLevel, ParseLevelError};
pub use record::Record;
