//! Replaying a loaded routine through the motors.
//!
//! Regular playback ticks through the buffer once, handing each sample
//! to the motor sink at the sample cadence. A programming-skills
//! playback chains [`SEGMENT_COUNT`] stored segments into one
//! continuous run — and it does so through the *same* buffer it is
//! playing from, because the target doesn't have room for two.
//!
//! # The consume-then-refill pipeline
//!
//! While segment `k` plays, each tick does two phases in a fixed
//! order: the sample at the current index is driven to the motors,
//! and only then is that index overwritten with segment `k + 1`'s
//! sample streamed from the store. Every buffer slot is read exactly
//! once before it is clobbered, so by the time segment `k` finishes
//! the buffer already *is* segment `k + 1`, and the index simply
//! wraps to 0. The ordering is enforced by
//! [`consume_then_refill`] rather than by statement order in the loop.
//!
//! The refill is temporal interleaving on one thread, not
//! parallelism: a slow storage read stretches the tick (playback
//! jitter), it cannot reorder the phases.

use log::{info, warn};

use crate::{
    peripherals::{CancelSwitch, FieldLink, MotorSink, Pacer},
    replay::{
        session::ReplaySession,
        slot::{segment_channel, Slot},
        SEGMENT_COUNT,
    },
    store::{ChannelReader, SlotStore, StoreError},
};

/// How a playback session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Every segment played to the end.
    Completed,
    /// The cancel switch fired (and the field link was offline).
    Cancelled {
        segment: u8,
        tick:    usize,
    },
    /// No slot is loaded; nothing was driven. Not an error.
    NothingLoaded,
    /// [`Slot::Hardcoded`] is loaded: the caller should run its
    /// built-in routine instead.
    Hardcoded,
}

/// Plays back the loaded routine.
///
/// Preconditions: a slot must have been loaded via
/// [`ReplaySession::load`]; playing with nothing loaded is a logged
/// no-op. The session buffer is exclusively owned by the playback
/// until it returns.
///
/// Cancellation is checked once per tick and ignored while
/// `field.is_online()` — a stray button press cannot abort a
/// tournament run. On completion, cancellation, or error the motors
/// are commanded to neutral.
///
/// A store failure while prefetching the next skills segment aborts
/// the whole run: the player never keeps looping on stale buffer
/// contents.
///
/// Skills prefetch consumes the buffer as it plays: once any refill
/// has landed, the buffer no longer mirrors the loaded slot, so the
/// session's loaded marker is cleared on every exit path — completed,
/// cancelled, or aborted. A later skills playback therefore re-loads
/// segment 0 from the store instead of replaying leftovers.
pub fn play(
    session: &mut ReplaySession,
    store: &SlotStore,
    motors: &mut impl MotorSink,
    cancel: &mut impl CancelSwitch,
    field: &impl FieldLink,
    pacer: &mut impl Pacer,
) -> Result<PlayOutcome, StoreError> {
    let Some(slot) = session.loaded() else {
        info!("Nothing loaded; not playing back.");
        return Ok(PlayOutcome::NothingLoaded);
    };
    if slot == Slot::Hardcoded {
        info!("Hardcoded skills selected; deferring to the built-in routine.");
        return Ok(PlayOutcome::Hardcoded);
    }

    let segments = if slot == Slot::Skills { SEGMENT_COUNT } else { 1 };
    let mut refilled = false;
    let len = session.buffer().len();
    info!("Playing back {} ({} segment(s))...", slot, segments);

    for segment in 0..segments {
        // The buffer holds segment `segment`; stream the next one in
        // behind the read head, if there is a next one.
        let mut prefetch = if segment + 1 < segments {
            match store.reader(&segment_channel(segment + 1)) {
                Ok(reader) => Some(reader),
                Err(e) => {
                    warn!("Cannot open skills segment {}: {}.", segment + 1, e);
                    motors.stop();
                    if refilled {
                        session.unload();
                    }
                    return Err(e);
                }
            }
        } else {
            None
        };

        for tick in 0..len {
            if cancel.cancel_pressed() && !field.is_online() {
                info!("Playback cancelled at segment {}, tick {}.", segment, tick);
                motors.stop();
                if refilled {
                    session.unload();
                }
                return Ok(PlayOutcome::Cancelled { segment, tick });
            }
            match consume_then_refill(session, motors, tick, &mut prefetch) {
                Ok(wrote) => refilled |= wrote,
                Err(e) => {
                    warn!("Prefetch of segment {} failed: {}; aborting run.", segment + 1, e);
                    motors.stop();
                    if refilled {
                        session.unload();
                    }
                    return Err(e);
                }
            }
            pacer.tick();
        }
        if segments > 1 {
            info!("Finished skills segment {}.", segment);
        }
    }

    motors.stop();
    if refilled {
        session.unload();
    }
    info!("Playback complete.");
    Ok(PlayOutcome::Completed)
}

/// One playback tick, phases in fixed order: the sample at `tick` is
/// driven to the motors *before* that index is overwritten with the
/// next segment's sample. Reordering these corrupts the run.
///
/// Returns whether a refill write landed, so the caller knows the
/// buffer has diverged from the loaded slot.
fn consume_then_refill(
    session: &mut ReplaySession,
    motors: &mut impl MotorSink,
    tick: usize,
    prefetch: &mut Option<ChannelReader>,
) -> Result<bool, StoreError> {
    let sample = session.buffer().read(tick);
    motors.drive(sample);

    if let Some(reader) = prefetch.as_mut() {
        let next = reader.next_sample()?;
        session.buffer_mut().write(tick, next);
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::replay::{buffer::SampleBuffer, sample::Sample};

    struct NoopPacer;

    impl Pacer for NoopPacer {
        fn tick(&mut self) {}

        fn pause(&mut self, _: Duration) {}
    }

    fn sample(v: i8) -> Sample { Sample::new(v, v, v, v, v) }

    fn store() -> (tempfile::TempDir, SlotStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SlotStore::open(dir.path()).unwrap();
        (dir, store)
    }

    /// Saves a 3-sample segment whose values are `base`, `base+1`, `base+2`.
    fn save_segment(store: &SlotStore, slot: Slot, base: i8) {
        let mut session = ReplaySession::with_buffer(SampleBuffer::with_len(3));
        for i in 0..3 {
            session.buffer_mut().write(i, sample(base + i as i8));
        }
        session.save(store, slot).unwrap();
    }

    #[test]
    fn nothing_loaded_is_a_noop() {
        let (_dir, store) = store();
        let mut session = ReplaySession::with_buffer(SampleBuffer::with_len(3));
        let mut driven = Vec::new();

        let outcome = play(
            &mut session,
            &store,
            &mut |s: Sample| driven.push(s),
            &mut || false,
            &false,
            &mut NoopPacer,
        )
        .unwrap();

        assert_eq!(outcome, PlayOutcome::NothingLoaded);
        assert!(driven.is_empty());
    }

    #[test]
    fn regular_playback_drives_every_sample_then_neutral() {
        let (_dir, store) = store();
        save_segment(&store, Slot::Regular(1), 10);
        let mut session = ReplaySession::with_buffer(SampleBuffer::with_len(3));
        session.load(&store, Slot::Regular(1)).unwrap();

        let mut driven = Vec::new();
        let outcome = play(
            &mut session,
            &store,
            &mut |s: Sample| driven.push(s),
            &mut || false,
            &false,
            &mut NoopPacer,
        )
        .unwrap();

        assert_eq!(outcome, PlayOutcome::Completed);
        assert_eq!(driven, vec![sample(10), sample(11), sample(12), Sample::NEUTRAL]);
        // No prefetch touched the buffer, so it still mirrors the slot.
        assert_eq!(session.loaded(), Some(Slot::Regular(1)));
    }

    #[test]
    fn skills_playback_chains_segments_in_order() {
        let (_dir, store) = store();
        for k in 0..SEGMENT_COUNT {
            save_segment(&store, Slot::SkillsSegment(k), (k as i8 + 1) * 10);
        }
        let mut session = ReplaySession::with_buffer(SampleBuffer::with_len(3));
        session.load(&store, Slot::Skills).unwrap();

        let mut driven = Vec::new();
        let outcome = play(
            &mut session,
            &store,
            &mut |s: Sample| driven.push(s),
            &mut || false,
            &false,
            &mut NoopPacer,
        )
        .unwrap();

        assert_eq!(outcome, PlayOutcome::Completed);
        // Segment k plays in full before any of segment k+1 appears.
        let mut expected = Vec::new();
        for k in 0..SEGMENT_COUNT as i8 {
            for i in 0..3 {
                expected.push(sample((k + 1) * 10 + i));
            }
        }
        expected.push(Sample::NEUTRAL);
        assert_eq!(driven, expected);
    }

    #[test]
    fn second_skills_run_starts_again_at_the_first_segment() {
        let (_dir, store) = store();
        for k in 0..SEGMENT_COUNT {
            save_segment(&store, Slot::SkillsSegment(k), (k as i8 + 1) * 10);
        }
        let mut session = ReplaySession::with_buffer(SampleBuffer::with_len(3));

        let mut first = Vec::new();
        session.load(&store, Slot::Skills).unwrap();
        play(
            &mut session,
            &store,
            &mut |s: Sample| first.push(s),
            &mut || false,
            &false,
            &mut NoopPacer,
        )
        .unwrap();

        // The buffer now holds the last segment, not the loaded slot,
        // so the marker must be gone and a fresh load must hit the
        // store again rather than short-circuiting.
        assert_eq!(session.loaded(), None);

        let mut second = Vec::new();
        session.load(&store, Slot::Skills).unwrap();
        play(
            &mut session,
            &store,
            &mut |s: Sample| second.push(s),
            &mut || false,
            &false,
            &mut NoopPacer,
        )
        .unwrap();

        assert_eq!(second[0], sample(10));
        assert_eq!(second, first);
    }

    #[test]
    fn cancelled_skills_run_drops_the_loaded_marker() {
        let (_dir, store) = store();
        for k in 0..SEGMENT_COUNT {
            save_segment(&store, Slot::SkillsSegment(k), (k as i8 + 1) * 10);
        }
        let mut session = ReplaySession::with_buffer(SampleBuffer::with_len(3));
        session.load(&store, Slot::Skills).unwrap();

        // Cancel on the second tick: one refill has already landed, so
        // the buffer is part segment 0, part segment 1.
        let mut checks = 0u32;
        let outcome = play(
            &mut session,
            &store,
            &mut |_: Sample| {},
            &mut || {
                checks += 1;
                checks > 1
            },
            &false,
            &mut NoopPacer,
        )
        .unwrap();

        assert_eq!(outcome, PlayOutcome::Cancelled { segment: 0, tick: 1 });
        assert_eq!(session.loaded(), None);
    }

    #[test]
    fn refill_never_precedes_consumption() {
        let (_dir, store) = store();
        // Segment 0 and 1 hold disjoint value ranges; if any slot were
        // refilled before being consumed, a segment-1 value would leak
        // into the first pass of outputs.
        save_segment(&store, Slot::SkillsSegment(0), 1);
        save_segment(&store, Slot::SkillsSegment(1), 101);
        save_segment(&store, Slot::SkillsSegment(2), 1);
        save_segment(&store, Slot::SkillsSegment(3), 1);

        let mut session = ReplaySession::with_buffer(SampleBuffer::with_len(3));
        session.load(&store, Slot::Skills).unwrap();

        let mut driven = Vec::new();
        play(
            &mut session,
            &store,
            &mut |s: Sample| driven.push(s),
            &mut || false,
            &false,
            &mut NoopPacer,
        )
        .unwrap();

        assert!(driven[..3].iter().all(|s| s.forward < 100));
        assert!(driven[3..6].iter().all(|s| s.forward > 100));
    }

    #[test]
    fn cancel_is_masked_while_field_controlled() {
        let (_dir, store) = store();
        save_segment(&store, Slot::Regular(2), 1);
        let mut session = ReplaySession::with_buffer(SampleBuffer::with_len(3));
        session.load(&store, Slot::Regular(2)).unwrap();

        let outcome = play(
            &mut session,
            &store,
            &mut |_: Sample| {},
            &mut || true,
            &true, // tournament network has the robot
            &mut NoopPacer,
        )
        .unwrap();
        assert_eq!(outcome, PlayOutcome::Completed);
    }

    #[test]
    fn cancel_stops_the_run_offline() {
        let (_dir, store) = store();
        save_segment(&store, Slot::Regular(2), 1);
        let mut session = ReplaySession::with_buffer(SampleBuffer::with_len(3));
        session.load(&store, Slot::Regular(2)).unwrap();

        let mut driven = Vec::new();
        let mut checks = 0u32;
        let outcome = play(
            &mut session,
            &store,
            &mut |s: Sample| driven.push(s),
            &mut || {
                checks += 1;
                checks > 1
            },
            &false,
            &mut NoopPacer,
        )
        .unwrap();

        assert_eq!(outcome, PlayOutcome::Cancelled { segment: 0, tick: 1 });
        // One live sample, then the neutral stop.
        assert_eq!(driven, vec![sample(1), Sample::NEUTRAL]);
    }

    #[test]
    fn missing_next_segment_aborts_the_run_with_neutral_motors() {
        let (_dir, store) = store();
        save_segment(&store, Slot::SkillsSegment(0), 1);
        // p1..p3 never saved.
        let mut session = ReplaySession::with_buffer(SampleBuffer::with_len(3));
        session.load(&store, Slot::Skills).unwrap();

        let mut driven = Vec::new();
        let result = play(
            &mut session,
            &store,
            &mut |s: Sample| driven.push(s),
            &mut || false,
            &false,
            &mut NoopPacer,
        );

        assert!(matches!(result, Err(StoreError::NotFound(_))));
        assert_eq!(driven.last().copied(), Some(Sample::NEUTRAL));
    }
}
