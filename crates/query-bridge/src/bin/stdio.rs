//! Line-oriented stand-in for the host messenger: one JSON method call per
//! stdin line, one reply envelope per stdout line.

use query_bridge::logging::{init_logging, log_session_start};
use query_bridge::{BridgeConfig, MethodChannel, QueryBridge};
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> query_bridge::Result<()> {
    let config = BridgeConfig::from_env()?;
    init_logging(&config.log)?;
    log_session_start(&config.channel_name);

    let bridge = Arc::new(QueryBridge::for_current_host(&config)?);
    let channel = MethodChannel::from_config(&config, bridge);
    info!("Listening on channel {} (stdin)", channel.name());

    let answered = channel.serve_lines(io::stdin().lock(), io::stdout().lock())?;
    info!("stdin closed after {answered} calls, shutting down");
    Ok(())
}
