//! File-backed logging.
//!
//! The TUI owns stdout, so the tracing subscriber writes to a side file.
//! Logging is best-effort: if the file cannot be opened the app simply
//! runs without it.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "jamb-cbt.log";

/// Install the global tracing subscriber. Call once, before the TUI
/// starts. `RUST_LOG` overrides the default `info` filter.
pub fn init() {
    let Ok(file) = OpenOptions::new().create(true).append(true).open(LOG_FILE) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}
