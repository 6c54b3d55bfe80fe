//! Filesystem utilities.
//!
//! This module provides utilities around the robot's storage,
//! including logging functionality for recording telemetry and debug
//! information. (The slot channels themselves live in
//! [`store`](crate::store).)
//!
//! # Logging
//!
//! The `logger` submodule provides a file-based logger that writes to
//! `log.txt` next to the program. This is useful for debugging issues
//! that only occur on the robot, where console output is gone by the
//! time anyone looks.
//!
//! # Example
//!
//! ```ignore
//! use ekho::fs::logger;
//! use log::{info, LevelFilter};
//!
//! // Initialize the logger at program start
//! logger::init(LevelFilter::Debug).expect("Failed to initialize logger");
//!
//! // Now you can use standard logging macros
//! info!("Replay session initialized");
//! ```

/// File-based logging.
///
/// Provides a logger implementation that writes to both the console
/// and a file.
pub mod logger;
