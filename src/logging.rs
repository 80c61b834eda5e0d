//! Tracing setup: an operational trace in a side file, optionally mirrored to stderr
//!
//! Nothing here ever writes to stdout, which carries command results.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::ui;

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "debug";

fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// `RUST_LOG` if set, [`DEFAULT_FILTER`] otherwise
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Build the layer stack without installing it.
///
/// An unwritable log file only costs the side trace: a warning is printed
/// and the returned subscriber still works.
pub fn subscriber(
    log_path: &Path,
    filter: EnvFilter,
    verbose: bool,
) -> impl Subscriber + Send + Sync + 'static {
    let file = match open_log_file(log_path) {
        Ok(file) => Some(file),
        Err(e) => {
            ui::warn(&format!("cannot open log file {}: {}", log_path.display(), e));
            None
        }
    };

    let file_layer = file.map(|file| {
        fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
    });

    let stderr_layer = verbose.then(|| {
        fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
}

/// Install the global subscriber
pub fn init(log_path: &Path, verbose: bool) -> anyhow::Result<()> {
    subscriber(log_path, env_filter(), verbose).try_init()?;
    Ok(())
}
