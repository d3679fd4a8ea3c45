#![forbid(unsafe_code)]

//! File-backed tracing subscriber.
//!
//! The demo owns the alternate screen, so log lines never go to the
//! terminal. When a log file is configured, a `fmt` subscriber appends plain
//! (uncolored) lines to it, filtered by the `GLINT_LOG` directives.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "GLINT_LOG";

/// Filter used when `GLINT_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVES: &str = "info";

/// Build the event filter from optional directives.
#[must_use]
pub fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global subscriber, appending to `path`.
///
/// Fails if the file cannot be opened or a subscriber is already installed.
pub fn init(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let directives = std::env::var(LOG_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(filter_from(directives.as_deref()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(io::Error::other)?;

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(())
}
