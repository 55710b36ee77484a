//! File logging for the terminal host.
//!
//! The terminal is in raw mode on the alternate screen, so log lines go to a
//! file. `RUST_LOG` filters as usual; the default keeps the rules at `debug`.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,candy_swap=debug,candy_swap_core=debug,candy_swap_engine=debug";

/// Install a global subscriber writing to `path`. Without a path nothing is
/// installed and every event is discarded. Returns whether logging is on.
pub fn init(path: Option<&str>) -> Result<bool> {
    let Some(path) = path else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {path}"))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))?;

    Ok(true)
}
