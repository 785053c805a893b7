use clap::Parser;
use rask_log_fanout::app::{self, Cli};
use rask_log_fanout::telemetry;

fn main() -> anyhow::Result<()> {
    if let Err(e) = telemetry::init_tracing() {
        eprintln!("Warning: tracing already initialized: {e}");
    }
    app::run(Cli::parse())
}
