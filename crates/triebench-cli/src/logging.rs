use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Log to stderr so stdout stays free for the report.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks between info and debug.
pub fn setup_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}
