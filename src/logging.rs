use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::info;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "spellathon.log";

/// Start a fresh log for this run; the previous run's lines are dropped.
pub fn open_log_file(dir: &Path) -> io::Result<File> {
    fs::create_dir_all(dir)?;
    File::create(dir.join(LOG_FILE))
}

/// The terminal belongs to the UI, so log lines go to a file in `dir`.
/// Logging is skipped when the file cannot be opened.
pub fn init(dir: &Path) {
    let Ok(file) = open_log_file(dir) else {
        return;
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("spellathon=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    info!("spellathon {} starting", env!("CARGO_PKG_VERSION"));
}
