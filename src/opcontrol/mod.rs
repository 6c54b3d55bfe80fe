//! Operator control utilities for driver control periods.
//!
//! The replay collaborators only see button *levels* once per tick;
//! the pieces that care about moments — "start recording when the
//! button goes down", "cancel on release" — need edges. This module
//! provides the level-to-edge bookkeeping the host control loop runs
//! each tick.
//!
//! # Example
//!
//! ```ignore
//! use ekho::opcontrol::buttons::{ButtonEvent, ButtonTracker};
//!
//! let mut record_btn = ButtonTracker::new();
//! loop {
//!     if record_btn.update(controller_button_is_down()) == Some(ButtonEvent::Pressed) {
//!         // kick off a recording
//!     }
//!     // ... tick the rest of the loop at 20 ms
//! }
//! ```

/// Button level-to-edge tracking.
///
/// Provides [`ButtonTracker`](buttons::ButtonTracker) for turning
/// per-tick button levels into press/release events.
pub mod buttons;
