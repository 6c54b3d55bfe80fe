//! Hardware boundary traits.
//!
//! The replay core never talks to hardware directly. Everything it
//! needs from the outside world — live driver input, motor output, the
//! cancel button, the field controller, and the passage of time — comes
//! in through the traits in this module. On the brain these are thin
//! wrappers over the controller and motor APIs; on a desk they are
//! mocks, which is how the whole engine stays testable without a robot.
//!
//! # Example
//!
//! ```ignore
//! use ekho::peripherals::{LiveInput, MotorSink};
//! use ekho::replay::sample::Sample;
//!
//! struct Sticks(/* controller handle */);
//!
//! impl LiveInput for Sticks {
//!     fn poll(&mut self) -> Sample {
//!         let state = self.0.state().unwrap_or_default();
//!         Sample::new(
//!             state.left_stick.y(),
//!             state.left_stick.x(),
//!             state.right_stick.x(),
//!             0,
//!             0,
//!         )
//!     }
//! }
//! ```

use std::{thread, time::Duration};

use crate::replay::{sample::Sample, TICK_PERIOD};

/// Source of live driver commands, polled once per tick.
///
/// Must not block: a slow poll eats into the tick period and shows up
/// as recording jitter.
pub trait LiveInput {
    /// Returns the current command tuple.
    fn poll(&mut self) -> Sample;
}

impl<F: FnMut() -> Sample> LiveInput for F {
    fn poll(&mut self) -> Sample { self() }
}

/// Consumer of command tuples: the motor-translation layer.
///
/// Receives one sample per tick during recording and playback. Must
/// tolerate being driven with [`Sample::NEUTRAL`] repeatedly.
pub trait MotorSink {
    /// Applies one command tuple to the actuators.
    fn drive(&mut self, sample: Sample);

    /// Commands every actuator to rest.
    fn stop(&mut self) { self.drive(Sample::NEUTRAL); }
}

impl<F: FnMut(Sample)> MotorSink for F {
    fn drive(&mut self, sample: Sample) { self(sample); }
}

/// The designated cancel input, checked once per tick.
pub trait CancelSwitch {
    /// Whether the cancel input is currently held.
    fn cancel_pressed(&mut self) -> bool;
}

impl<F: FnMut() -> bool> CancelSwitch for F {
    fn cancel_pressed(&mut self) -> bool { self() }
}

/// Link to the tournament field controller.
///
/// While the field has the robot (`is_online`), playback ignores the
/// cancel switch so a stray button press cannot abort a match run.
pub trait FieldLink {
    fn is_online(&self) -> bool;
}

impl FieldLink for bool {
    fn is_online(&self) -> bool { *self }
}

/// The tick clock. One `tick()` per sample period, free-running.
///
/// There is deliberately no drift correction: the engine free-runs
/// tick to tick, exactly like the original `delay()`-paced loops. A
/// storage read that overruns the period shows up as playback jitter,
/// not an error.
pub trait Pacer {
    /// Waits out one sample period.
    fn tick(&mut self);

    /// Waits out an arbitrary span (countdown beats, post-run settle).
    fn pause(&mut self, duration: Duration);
}

/// [`Pacer`] backed by `thread::sleep`.
#[derive(Debug, Clone, Copy)]
pub struct SleepPacer {
    period: Duration,
}

impl SleepPacer {
    /// A pacer ticking at the recorder/player sample rate.
    pub fn at_sample_rate() -> Self {
        SleepPacer {
            period: TICK_PERIOD,
        }
    }

    pub fn new(period: Duration) -> Self { SleepPacer { period } }
}

impl Pacer for SleepPacer {
    fn tick(&mut self) { thread::sleep(self.period); }

    fn pause(&mut self, duration: Duration) { thread::sleep(duration); }
}
