//! # Ekho
//!
//! Ekho is a record-and-replay autonomous framework for competition
//! robots. It captures a driver's manual control session as a
//! time-quantized sample stream, persists it in named slots, and plays
//! it back later without a driver present:
//!
//! - **Recording**: capture live driver input at a fixed 50 Hz cadence
//!   while the robot keeps responding to the driver, with a countdown
//!   and per-tick cancellation.
//! - **Slot Storage**: persist routines as fixed-length channels
//!   (`a1..a10` for regular slots, `p0..p3` for skills segments) in a
//!   headerless five-bytes-per-sample layout.
//! - **Playback**: replay a loaded routine tick by tick, including
//!   four-segment programming-skills runs stitched through a single
//!   shared buffer with consume-then-refill prefetch.
//! - **Transfer**: move stored routines to and from a host computer
//!   over a plain byte stream.
//! - **Logging**: a file-based logger for debugging and telemetry.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ekho::{
//!     peripherals::SleepPacer,
//!     replay::{player, recorder, session::ReplaySession, slot::Slot},
//!     store::SlotStore,
//! };
//!
//! let store = SlotStore::open("autons")?;
//! let mut session = ReplaySession::new();
//! let mut pacer = SleepPacer::at_sample_rate();
//!
//! // Record a take, then persist it.
//! recorder::record(&mut session, &mut sticks, &mut motors, &mut cancel, &mut pacer);
//! session.save(&store, Slot::Regular(1))?;
//!
//! // Later, during the autonomous period:
//! session.load(&store, Slot::Regular(1))?;
//! player::play(&mut session, &store, &mut motors, &mut cancel, &field, &mut pacer)?;
//! ```
//!
//! ## Modules
//!
//! - [`replay`]: the capture/playback core — buffer, slots, recorder,
//!   player.
//! - [`store`]: slot channel persistence and host transfer.
//! - [`peripherals`]: the hardware boundary traits (input, motors,
//!   cancel, field link, tick pacing).
//! - [`opcontrol`]: operator-control utilities (button edge tracking).
//! - [`fs`]: filesystem utilities including logging.

/// The capture/playback core.
///
/// Provides the [`SampleBuffer`](replay::buffer::SampleBuffer) shared
/// working set, the [`recorder`](replay::recorder) and
/// [`player`](replay::player) tick loops, and
/// [`ReplaySession`](replay::session::ReplaySession) bookkeeping.
pub mod replay;

/// Persistent slot storage and host transfer.
///
/// Provides [`SlotStore`](store::SlotStore) for saving and loading
/// routines and the [`transfer`](store::transfer) bridge for moving
/// them over a byte stream.
pub mod store;

/// Hardware boundary traits.
///
/// The seams where the replay core meets the robot: live input, motor
/// output, the cancel switch, the field link, and the tick
/// [`Pacer`](peripherals::Pacer).
pub mod peripherals;

/// Operator control utilities module.
///
/// Provides [`ButtonTracker`](opcontrol::buttons::ButtonTracker) for
/// turning per-tick button levels into press/release events.
pub mod opcontrol;

/// Filesystem utilities module.
///
/// Contains logging functionality for recording robot telemetry and
/// debug information to files.
pub mod fs;
