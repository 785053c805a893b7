pub mod cli;

pub use cli::Cli;

use crate::args::fields_from_pairs;
use crate::config::FanOutConfig;
use crate::sink::{JsonLinesSink, SharedSink, TextSink, TracingSink};
use anyhow::Context;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Builds the fan-out described by `cli` and emits its event.
///
/// With `--event-level fatal` this does not return: the stdout sink ends the
/// process after the secondaries have recorded and flushed the event.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let mut sinks: Vec<SharedSink> = vec![Arc::new(TextSink::stdout())];

    if let Some(path) = &cli.json_file {
        let sink = JsonLinesSink::create(path)
            .with_context(|| format!("Failed to open JSON lines file {}", path.display()))?;
        sinks.push(Arc::new(sink));
    }
    if cli.tracing {
        sinks.push(Arc::new(TracingSink::new()));
    }

    let config = FanOutConfig {
        log_level: cli.level,
        show_caller: cli.caller,
    };
    let logger = config.build(sinks);
    info!(
        version = crate::VERSION,
        sinks = logger.len(),
        level = %logger.level(),
        show_caller = logger.show_caller(),
        "Fan-out logger ready"
    );

    let fields = fields_from_pairs(cli.args.iter().map(|arg| parse_value(arg)));
    logger.log(cli.event_level, &cli.message, &fields);
    logger.flush();

    Ok(())
}

/// Command-line values are JSON when they parse as such (`3`, `true`,
/// `[1,2]`), plain strings otherwise.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
