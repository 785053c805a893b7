use crate::domain::LogLevel;
use clap::Parser;
use std::path::PathBuf;

/// Emit one log event through a fan-out of sinks.
///
/// A stdout text sink is always attached and is the primary sink; the JSON
/// lines file and the tracing bridge are secondaries, in that order.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Minimum severity applied to every sink
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub level: LogLevel,

    /// Record the call-site origin on every sink
    #[arg(long, env = "LOG_SHOW_CALLER")]
    pub caller: bool,

    /// Severity of the emitted event (fatal exits with status 1)
    #[arg(long, default_value = "info")]
    pub event_level: LogLevel,

    /// Also append ND-JSON records to this file
    #[arg(long, env = "LOG_JSON_FILE")]
    pub json_file: Option<PathBuf>,

    /// Also forward events to the tracing subscriber on stderr
    #[arg(long)]
    pub tracing: bool,

    /// Event message
    pub message: String,

    /// Structured arguments as `key value key value ...`; values are parsed
    /// as JSON when possible
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Cli::try_parse_from(args)
    }
}
