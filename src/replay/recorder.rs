//! Capturing a live driving session into the buffer.
//!
//! The recorder runs `Countdown → Capturing → Completed | Cancelled`:
//! a few one-second beats so the driver can get their hands set, then
//! one sample per tick until the buffer is full or the cancel switch
//! fires. On every tick the freshly captured sample is also driven
//! straight back out to the motors, so the robot keeps responding to
//! the driver while being recorded.
//!
//! Cancelling at tick `i` zero-fills the buffer from `i` onward: a
//! cancelled take is indistinguishable from one whose tail was all
//! neutral commands. Saving (or discarding) the take is the caller's
//! job — see [`ReplaySession::save`](super::session::ReplaySession::save).

use std::time::Duration;

use log::info;

use crate::{
    peripherals::{CancelSwitch, LiveInput, MotorSink, Pacer},
    replay::{session::ReplaySession, COUNTDOWN_BEATS},
};

/// How a recording session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The buffer was filled to capacity.
    Completed,
    /// The cancel switch fired at `tick`; entries from `tick` onward
    /// are zeroed.
    Cancelled {
        tick: usize,
    },
}

/// Records one full take into the session buffer.
///
/// Blocks for the countdown plus up to one buffer worth of ticks. On
/// either outcome the motors are commanded to neutral and the session's
/// loaded-slot marker is cleared: the buffer now holds an unsaved take.
pub fn record(
    session: &mut ReplaySession,
    input: &mut impl LiveInput,
    motors: &mut impl MotorSink,
    cancel: &mut impl CancelSwitch,
    pacer: &mut impl Pacer,
) -> RecordOutcome {
    for beat in (1..=COUNTDOWN_BEATS).rev() {
        info!("Recording in {}...", beat);
        pacer.pause(Duration::from_secs(1));
    }
    let len = session.buffer().len();
    info!("Recording {} samples...", len);

    let mut outcome = RecordOutcome::Completed;
    for tick in 0..len {
        if cancel.cancel_pressed() {
            info!("Recording cancelled at tick {}.", tick);
            session.buffer_mut().zero_from(tick);
            outcome = RecordOutcome::Cancelled { tick };
            break;
        }
        let sample = input.poll();
        session.buffer_mut().write(tick, sample);
        // The robot stays under driver control while recording.
        motors.drive(sample);
        pacer.tick();
    }

    motors.stop();
    session.unload();
    if outcome == RecordOutcome::Completed {
        info!("Recording complete.");
    }
    outcome
}
