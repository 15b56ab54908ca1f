//! Tracing setup for the mission control binary.
//!
//! - **Console**: stderr, compact, filtered by `RUST_LOG` (defaults to `warn`).
//! - **Mission log**: optional append-only file recording `info` and above.
//!
//! Operator-facing text (events, status, errors) is written to stdout by the
//! mission loop and does not depend on either layer.

use std::{fs::OpenOptions, path::Path, sync::Mutex};

use anyhow::{Context, Result};
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// Installs the global subscriber. Must be called at most once.
pub(crate) fn init(log_file: Option<&Path>) -> Result<()> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .compact()
        .with_filter(console_filter);

    let file = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open mission log {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false)
                    .with_filter(LevelFilter::INFO),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()
        .context("install tracing subscriber")
}
