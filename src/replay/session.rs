//! Replay session state.
//!
//! A [`ReplaySession`] owns the working [`SampleBuffer`] together with
//! the bookkeeping that used to float around the original firmware as
//! globals: which slot the buffer currently mirrors, and — while a
//! skills run is being recorded — which segment the next save lands
//! in. Making it one explicit object keeps cancellation and restart
//! testable without resetting a process.
//!
//! While a recorder or player is running it holds `&mut ReplaySession`,
//! so the buffer is exclusively owned by that session until it reaches
//! a terminal state.

use log::{info, warn};
use thiserror::Error;

use crate::{
    replay::{
        buffer::SampleBuffer,
        slot::{SelectionError, Slot},
        SEGMENT_COUNT,
    },
    store::{SlotStore, StoreError},
};

/// Failures from session load/save operations.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The buffer plus its transient bookkeeping.
#[derive(Debug)]
pub struct ReplaySession {
    buffer:       SampleBuffer,
    loaded:       Option<Slot>,
    next_segment: u8,
}

impl ReplaySession {
    /// A fresh session with a zeroed full-capacity buffer, nothing
    /// loaded, and the skills cursor at segment 0.
    ///
    /// This is the one-shot init entry point: call it once at program
    /// start (and nowhere else — the buffer is the largest single
    /// allocation in the program).
    pub fn new() -> Self {
        info!("Initializing replay session...");
        ReplaySession {
            buffer:       SampleBuffer::new(),
            loaded:       None,
            next_segment: 0,
        }
    }

    /// A session over an explicit buffer. Tests use short buffers.
    pub fn with_buffer(buffer: SampleBuffer) -> Self {
        ReplaySession {
            buffer,
            loaded: None,
            next_segment: 0,
        }
    }

    pub fn buffer(&self) -> &SampleBuffer { &self.buffer }

    pub fn buffer_mut(&mut self) -> &mut SampleBuffer { &mut self.buffer }

    /// The slot the buffer currently mirrors, if any.
    pub fn loaded(&self) -> Option<Slot> { self.loaded }

    /// The segment the next skills save lands in.
    pub fn skills_cursor(&self) -> u8 { self.next_segment }

    /// Clears the loaded marker without touching the buffer.
    pub fn unload(&mut self) {
        if self.loaded.take().is_some() {
            info!("Unloaded; buffer no longer mirrors a stored slot.");
        }
    }

    /// Loads `slot` from the store into the buffer.
    ///
    /// Re-loading the currently loaded slot is a no-op. Loading
    /// [`Slot::Skills`] pulls segment 0; the player chains the rest,
    /// and clears the marker once its prefetch has overwritten the
    /// buffer, so a repeat skills load always re-reads segment 0
    /// rather than short-circuiting here.
    /// Loading [`Slot::Hardcoded`] only sets the marker — there is no
    /// stored data behind it.
    ///
    /// On [`StoreError::NotFound`] nothing was read and the previous
    /// marker survives. On an I/O fault mid-read the buffer is partly
    /// overwritten, so the marker is cleared instead.
    pub fn load(&mut self, store: &SlotStore, slot: Slot) -> Result<(), ReplayError> {
        slot.validate()?;
        if self.loaded == Some(slot) {
            info!("{} is already loaded.", slot);
            return Ok(());
        }
        let Some(channel) = slot.load_channel() else {
            info!("Loaded {}: built-in routine, no stored data.", slot);
            self.loaded = Some(slot);
            return Ok(());
        };
        match store.load_into(&channel, &mut self.buffer) {
            Ok(()) => {
                info!("Loaded {}.", slot);
                self.loaded = Some(slot);
                Ok(())
            }
            Err(e @ StoreError::NotFound(_)) => {
                warn!("Nothing to load for {}.", slot);
                Err(e.into())
            }
            Err(e) => {
                warn!("Load of {} failed mid-read; buffer is stale.", slot);
                self.loaded = None;
                Err(e.into())
            }
        }
    }

    /// Saves the buffer to `slot`'s channel, rewriting it whole.
    ///
    /// Saving to [`Slot::Skills`] records the *next* segment of the
    /// run: the first save lands in `p0`, the next in `p1`, and the
    /// cursor wraps back to 0 after the last segment so a driver can
    /// record all four back-to-back without re-selecting.
    ///
    /// On failure the store channel may or may not exist, but the
    /// session state (marker, cursor) is unchanged.
    pub fn save(&mut self, store: &SlotStore, slot: Slot) -> Result<(), ReplayError> {
        slot.validate()?;
        let target = match slot {
            Slot::Skills => Slot::SkillsSegment(self.next_segment),
            other => other,
        };
        let Some(channel) = target.save_channel() else {
            return Err(SelectionError::NoChannel.into());
        };
        store.save(&channel, &self.buffer)?;
        if slot == Slot::Skills {
            self.next_segment += 1;
            if self.next_segment == SEGMENT_COUNT {
                info!("Finished recording programming skills (all segments).");
                self.next_segment = 0;
            } else {
                info!(
                    "Proceeding to programming skills segment {}.",
                    self.next_segment
                );
            }
        }
        self.loaded = Some(target);
        Ok(())
    }
}

impl Default for ReplaySession {
    fn default() -> Self { Self::new() }
}
