//! The capture/playback core.
//!
//! Everything in this module works on one shared [`SampleBuffer`]:
//!
//! 1. The [`recorder`] fills it with live driver input at the sample
//!    rate while the robot keeps responding to the driver.
//! 2. A [`session`](session::ReplaySession) persists it to a named
//!    slot channel and loads channels back.
//! 3. The [`player`] streams it back out tick by tick — and for
//!    programming skills, chains four stored segments through the
//!    *same* buffer with a consume-then-refill prefetch.
//!
//! # Timing model
//!
//! Single cooperative thread. One tick = one sample period
//! ([`TICK_PERIOD`], 20 ms at 50 Hz), paced by a
//! [`Pacer`](crate::peripherals::Pacer) that free-runs with no drift
//! correction. Cancellation is checked once per tick and is always
//! synchronous — nothing can interrupt a tick halfway.

/// The five-channel command tuple captured each tick.
pub mod sample;

/// The fixed-length sample buffer shared by record/playback/prefetch.
pub mod buffer;

/// Slot identifiers and channel-name resolution.
pub mod slot;

/// Session state: the buffer, the loaded-slot marker, load/save.
pub mod session;

/// Captures live input into the buffer at the sample rate.
pub mod recorder;

/// Replays the buffer, chaining skills segments with prefetch.
pub mod player;

use std::time::Duration;

/// Length of one recorded routine in seconds.
pub const RECORD_SECONDS: usize = 15;

/// Samples captured per second.
pub const SAMPLE_RATE_HZ: usize = 50;

/// Samples in one routine: the fixed buffer and channel length.
pub const CAPACITY: usize = RECORD_SECONDS * SAMPLE_RATE_HZ;

/// One tick of the record/playback loops.
pub const TICK_PERIOD: Duration = Duration::from_millis((1000 / SAMPLE_RATE_HZ) as u64);

/// Number of regular autonomous slots (`a1..a10`).
pub const MAX_SLOTS: u8 = 10;

/// Segments in a programming-skills run (`p0..p3`).
pub const SEGMENT_COUNT: u8 = 4;

/// One-second beats counted down before a recording starts.
pub const COUNTDOWN_BEATS: u32 = 3;
