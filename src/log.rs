// src/log.rs
// Subscriber setup for the `tracing` macros used across the crate.
// Lines look like `   1.234s DEBUG tab_scrape::specs::tab: ...`: uptime, level, target.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, EnvFilter};

use crate::config::consts::{LOG_FILE, STORE_DIR};
use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to `.store/debug.log`.
    File,
    Stderr,
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(target: LogTarget) -> Result<()> {
    let writer = match target {
        LogTarget::Stderr => BoxMakeWriter::new(std::io::stderr),
        LogTarget::File => {
            fs::create_dir_all(STORE_DIR)?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(Path::new(STORE_DIR).join(LOG_FILE))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_timer(fmt::time::uptime())
        .with_ansi(target == LogTarget::Stderr)
        .with_writer(writer)
        .try_init();
    Ok(())
}
