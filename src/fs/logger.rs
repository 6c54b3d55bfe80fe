//! File-based logger implementation.
//!
//! This module implements the [`log`] crate's logging facade, writing
//! log messages to both the console and a `log.txt` file.
//!
//! # Usage
//!
//! Initialize the logger once at the start of your program:
//!
//! ```ignore
//! use ekho::fs::logger;
//! use log::{info, warn, error, LevelFilter};
//!
//! fn main() {
//!     logger::init(LevelFilter::Debug).expect("Logger init failed");
//!
//!     info!("Program started");
//!     warn!("This is a warning");
//!     error!("This is an error");
//! }
//! ```
//!
//! # Log Output
//!
//! Logs are written to `log.txt` in the working directory. Each log
//! entry includes:
//! - Log level (TRACE, DEBUG, INFO, WARN, ERROR)
//! - Timestamp (time since the logger was initialized)
//! - Target (module path)
//! - Message
//!
//! Example output:
//! ```text
//! INFO [2m 5s 123ms] ekho::replay::recorder - Recording 750 samples...
//! WARN [2m 5s 456ms] ekho::store - Nothing to load for slot 3.
//! ```

use std::{
    fs::OpenOptions,
    io::{BufWriter, Write},
    sync::Mutex,
    time::Instant,
};

use humantime::{format_duration, FormattedDuration};
use log::{LevelFilter, Metadata, Record, SetLoggerError};

/// A dual-output logger.
///
/// Writes log messages to both the console and a file (`log.txt`).
/// The file is created/truncated when the logger is initialized.
pub struct EkhoLogger {
    /// Buffered file writer for log output.
    ///
    /// Wrapped in a mutex for thread-safe access. May be `None` if
    /// the file could not be opened (e.g. read-only media).
    file_writer: Mutex<Option<BufWriter<std::fs::File>>>,
    /// Reference point for log timestamps.
    started:     Instant,
}

impl EkhoLogger {
    fn new() -> Self {
        let file_writer = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open("log.txt")
            .ok()
            .map(BufWriter::new);

        Self {
            file_writer: Mutex::new(file_writer),
            started:     Instant::now(),
        }
    }

    fn uptime(&self) -> FormattedDuration {
        // Truncate to millisecond precision to keep lines readable.
        let elapsed = self.started.elapsed();
        format_duration(std::time::Duration::from_millis(elapsed.as_millis() as u64))
    }
}

impl log::Log for EkhoLogger {
    fn enabled(&self, metadata: &Metadata) -> bool { metadata.level() <= log::max_level() }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let log_line = format!(
                "{} [{}] {} - {}\n",
                record.level(),
                self.uptime(),
                record.target(),
                record.args()
            );

            // Print to console
            print!("{}", log_line);

            if let Ok(mut writer_guard) = self.file_writer.lock() {
                if let Some(ref mut writer) = *writer_guard {
                    let _ = writer.write_all(log_line.as_bytes());
                }
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut writer_guard) = self.file_writer.lock() {
            if let Some(ref mut writer) = *writer_guard {
                let _ = writer.flush();
            }
        }
    }
}

static LOGGER: std::sync::OnceLock<EkhoLogger> = std::sync::OnceLock::new();

/// Initializes the logger.
///
/// This function must be called once before any logging macros are used.
/// It sets up the global logger to write to both the console and `log.txt`.
///
/// # Arguments
///
/// * `level` - The minimum log level to record. Messages below this level
///   will be ignored. Use [`LevelFilter::Trace`] for maximum verbosity or
///   [`LevelFilter::Error`] for critical messages only.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
///
/// # Example
///
/// ```ignore
/// use ekho::fs::logger;
/// use log::LevelFilter;
///
/// // Initialize with debug level logging
/// logger::init(LevelFilter::Debug)?;
/// ```
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(EkhoLogger::new);
    log::set_logger(logger).map(|()| log::set_max_level(level))
}
