//! Debug log bridge for the simulator binary.
//!
//! Routes every `log::info!()` etc. to `breakpoint_gutter_debug.log` in the
//! system temp directory, so scenario reports on stdout stay clean. When
//! `RUST_LOG` is set, records are mirrored to stderr as well.
//!
//! Level precedence, highest first:
//! 1. `--log-level` CLI flag
//! 2. `RUST_LOG` (a single level name such as `debug`)
//! 3. `DEBUG_LEVEL` (0 = off, 1 = error, 2 = info, 3 = debug, 4 = trace)
//! 4. `log_level` from the config file

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Location of the debug log file.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("breakpoint_gutter_debug.log")
}

fn level_from_debug_env() -> Option<LevelFilter> {
    let value = std::env::var("DEBUG_LEVEL").ok()?;
    match value.trim().parse::<u8>() {
        Ok(0) => Some(LevelFilter::Off),
        Ok(1) => Some(LevelFilter::Error),
        Ok(2) => Some(LevelFilter::Info),
        Ok(3) => Some(LevelFilter::Debug),
        Ok(4) => Some(LevelFilter::Trace),
        _ => None,
    }
}

fn level_from_rust_log() -> Option<LevelFilter> {
    std::env::var("RUST_LOG").ok()?.trim().parse().ok()
}

/// Resolve the effective level from the CLI flag, environment and config.
pub fn resolve_level(cli_level: Option<LevelFilter>, config_level: LevelFilter) -> LevelFilter {
    cli_level
        .or_else(level_from_rust_log)
        .or_else(level_from_debug_env)
        .unwrap_or(config_level)
}

struct FileLogger {
    level: LevelFilter,
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.write_all(line.as_bytes());
        }
        if self.mirror_stderr {
            eprint!("{}", line);
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Install the file logger as the global `log` backend.
///
/// Does nothing when the effective level is `Off`, and silently keeps an
/// already installed logger.
pub fn init_log_bridge(cli_level: Option<LevelFilter>, config_level: LevelFilter) {
    let level = resolve_level(cli_level, config_level);
    if level == LevelFilter::Off {
        return;
    }

    let file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(log_path())
        .ok();
    let logger = FileLogger {
        level,
        file: Mutex::new(file),
        mirror_stderr: std::env::var_os("RUST_LOG").is_some(),
    };

    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
        log::info!("breakpoint-gutter debug log started (level={})", level);
    }
}
