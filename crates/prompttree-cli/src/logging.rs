use std::io;

use tracing_subscriber::EnvFilter;

use crate::types::LogLevel;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `--log-level`. Logs go to stderr so stdout stays
/// parseable; the TUI owns the terminal, so there they are discarded.
pub fn init_logging(level: LogLevel, interactive: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.directive()));

    if interactive {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .try_init();
    }
}
