#![warn(rust_2018_idioms)]
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
#![allow(
    clippy::missing_errors_doc,      // Errors are self-describing thiserror enums
    clippy::module_name_repetitions, // e.g. ConfigError in config module
    clippy::must_use_candidate       // Annotated selectively on mutators
)]

//! Multi-sink log fan-out.
//!
//! A [`FanOutLogger`] holds an ordered list of independently configured
//! [`LogSink`]s and replays every call on each of them. Fatal events are
//! recorded at error severity on the secondary sinks, which are flushed,
//! before the primary (first) sink terminates the process.
//!
//! ```
//! use rask_log_fanout::{FanOutLogger, LogLevel, MemorySink, fields};
//! use std::sync::Arc;
//!
//! let terminal = Arc::new(MemorySink::new());
//! let file = Arc::new(MemorySink::new());
//! let logger = FanOutLogger::new()
//!     .with_sink(terminal.clone())
//!     .with_sink(file.clone())
//!     .with_level(LogLevel::Debug);
//!
//! logger.debug("connected", &fields!("host", "db1", "retries", 3));
//! assert_eq!(terminal.len(), 1);
//! assert_eq!(file.len(), 1);
//! ```

pub mod app;
pub mod args;
pub mod config;
pub mod domain;
pub mod fanout;
pub mod sink;
pub mod telemetry;

// Used by the `fields!` macro.
pub use serde_json;

pub use args::{fields_from_map, fields_from_pairs};
pub use config::{ConfigError, FanOutConfig};
pub use domain::{Field, LogLevel, Record};
pub use fanout::FanOutLogger;
pub use sink::{
    FatalExit, JsonLinesSink, LogSink, MemorySink, SharedSink, SinkSettings, TextSink, TracingSink,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
