//! The shared fixed-length sample buffer.
//!
//! A [`SampleBuffer`] holds one full session worth of samples — by
//! default [`CAPACITY`](crate::replay::CAPACITY) of them — and is the
//! single working set shared by recording, playback and skills
//! prefetch. It is never duplicated: the V5 user partition is small,
//! and the skills player relies on overwriting each slot *after* it
//! has been consumed for output (see
//! [`player`](crate::replay::player)).
//!
//! The buffer has no notion of "valid length". A cancelled recording
//! zero-fills its tail, so a short take is indistinguishable from one
//! whose trailing commands were all neutral.

use crate::replay::{sample::Sample, CAPACITY};

/// Fixed-length ordered sequence of [`Sample`]s.
///
/// The length is fixed at construction and every entry is always
/// initialized; there is no push/pop. Indexing past the end is a
/// programming error and panics rather than returning a result — the
/// tick loops that touch the buffer own the index and never derive it
/// from external data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    samples: Box<[Sample]>,
}

impl SampleBuffer {
    /// Creates a zeroed buffer of the default [`CAPACITY`].
    pub fn new() -> Self { Self::with_len(CAPACITY) }

    /// Creates a zeroed buffer of an explicit length.
    ///
    /// Everything downstream (store, player, recorder) works off
    /// `len()`, so short buffers are handy in tests.
    pub fn with_len(len: usize) -> Self {
        SampleBuffer {
            samples: vec![Sample::NEUTRAL; len].into_boxed_slice(),
        }
    }

    /// Number of samples this buffer holds. Fixed for its lifetime.
    pub fn len(&self) -> usize { self.samples.len() }

    pub fn is_empty(&self) -> bool { self.samples.is_empty() }

    /// Returns the sample at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn read(&self, index: usize) -> Sample { self.samples[index] }

    /// Overwrites the sample at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn write(&mut self, index: usize, sample: Sample) { self.samples[index] = sample; }

    /// Resets every entry to [`Sample::NEUTRAL`].
    pub fn clear(&mut self) { self.samples.fill(Sample::NEUTRAL); }

    /// Zero-fills every entry from `index` to the end.
    ///
    /// Used when a recording is cancelled at tick `index`: the tail
    /// becomes all-neutral commands, as if the driver had let go of
    /// the sticks for the rest of the take.
    pub fn zero_from(&mut self, index: usize) {
        if index < self.samples.len() {
            self.samples[index..].fill(Sample::NEUTRAL);
        }
    }

    /// Iterates the samples in tick order.
    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ { self.samples.iter().copied() }
}

impl Default for SampleBuffer {
    fn default() -> Self { Self::new() }
}
