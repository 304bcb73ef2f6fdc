use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::{config_dir, log_path};

/// Initializes the tracing subscriber.
///
/// Batch commands log to stderr. The interactive screen owns the terminal, so
/// it logs to `tally.log` in the config directory instead, and only when
/// something would actually be written.
pub fn init_logger(level: LevelFilter, interactive: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = match rust_log {
        Some(_) => EnvFilter::from_default_env(),
        // RUST_LOG does not exist; use the requested level for this crate only.
        None => EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)),
    };

    if !interactive {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return;
    }

    if level == LevelFilter::OFF && rust_log.is_none() {
        return;
    }
    if std::fs::create_dir_all(config_dir()).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(log_path()) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
}
