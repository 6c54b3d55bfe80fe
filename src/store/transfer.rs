//! Moving stored routines to and from a host computer.
//!
//! Routines are exchanged over a plain byte stream (on the brain, the
//! serial monitor): exactly `capacity * SAMPLE_WIDTH` bytes per
//! routine, the same headerless fixed-width layout the channels use on
//! disk. [`download`] pulls a routine from the stream into a slot's
//! channel; [`upload`] streams a stored channel back out verbatim.
//!
//! A download writes the channel incrementally as bytes arrive. If the
//! stream ends early the transfer fails with
//! [`TransferError::Truncated`] and the partial bytes are *kept* — the
//! channel is left short, which a later load rejects, so stale partial
//! data can never reach playback.

use std::io::{self, Read, Write};

use log::{info, warn};

use thiserror::Error;

use crate::{
    replay::{
        sample::SAMPLE_WIDTH,
        slot::{SelectionError, Slot},
        CAPACITY,
    },
    store::{SlotStore, StoreError},
};

/// Failures from routine transfers.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The slot cannot be transferred (out of range, or no channel).
    #[error(transparent)]
    Selection(#[from] SelectionError),
    /// Upload of a channel that was never saved. No stream writes
    /// happen in this case.
    #[error("no routine saved in channel `{0}`")]
    NotFound(String),
    /// The byte stream ended before a full routine arrived. The
    /// partial channel bytes are left in place.
    #[error("transfer truncated after {got} of {expected} samples")]
    Truncated {
        got:      usize,
        expected: usize,
    },
    /// Underlying stream or storage fault.
    #[error("transfer I/O failure")]
    Io(#[from] io::Error),
}

impl From<StoreError> for TransferError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(name) => TransferError::NotFound(name),
            StoreError::Io(e) => TransferError::Io(e),
        }
    }
}

/// Reads one full-capacity routine from `source` into `slot`'s channel.
pub fn download(
    store: &SlotStore,
    slot: Slot,
    source: &mut impl Read,
) -> Result<(), TransferError> {
    download_samples(store, slot, source, CAPACITY)
}

/// Reads a routine of `expected` samples from `source` into `slot`'s
/// channel, sample by sample.
///
/// The channel is rewritten incrementally; an early end of stream
/// aborts with [`TransferError::Truncated`] without rolling back what
/// already landed.
pub fn download_samples(
    store: &SlotStore,
    slot: Slot,
    source: &mut impl Read,
    expected: usize,
) -> Result<(), TransferError> {
    slot.validate()?;
    let channel = slot.save_channel().ok_or(SelectionError::NoChannel)?;
    info!("Downloading {} samples into channel {}...", expected, channel);

    let mut writer = store.create(&channel)?;
    for got in 0..expected {
        let mut bytes = [0u8; SAMPLE_WIDTH];
        match source.read_exact(&mut bytes) {
            Ok(()) => writer.write_all(&bytes)?,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                writer.flush()?;
                warn!(
                    "Transfer ended after {} of {} samples; channel {} left partial.",
                    got, expected, channel
                );
                return Err(TransferError::Truncated { got, expected });
            }
            Err(e) => return Err(e.into()),
        }
    }
    writer.flush()?;
    info!("Downloaded channel {}.", channel);
    Ok(())
}

/// Streams `slot`'s stored channel to `sink` verbatim.
///
/// Fails with [`TransferError::NotFound`] — before writing anything to
/// the sink — if the channel was never saved.
pub fn upload(store: &SlotStore, slot: Slot, sink: &mut impl Write) -> Result<(), TransferError> {
    slot.validate()?;
    let channel = slot.save_channel().ok_or(SelectionError::NoChannel)?;
    let mut reader = store.open_raw(&channel)?;
    info!("Uploading channel {}...", channel);
    let bytes = io::copy(&mut reader, sink)?;
    info!("Uploaded {} bytes from channel {}.", bytes, channel);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::{buffer::SampleBuffer, sample::Sample};

    fn store() -> (tempfile::TempDir, SlotStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SlotStore::open(dir.path()).unwrap();
        (dir, store)
    }

    fn ramp_bytes(samples: usize) -> Vec<u8> {
        (0..samples)
            .flat_map(|i| Sample::new(i as i8, 0, 0, 0, 0).to_bytes())
            .collect()
    }

    #[test]
    fn download_then_load_reproduces_the_stream() {
        let (_dir, store) = store();
        let bytes = ramp_bytes(4);
        download_samples(&store, Slot::Regular(1), &mut bytes.as_slice(), 4).unwrap();

        let mut buf = SampleBuffer::with_len(4);
        store.load_into("a1", &mut buf).unwrap();
        for i in 0..4 {
            assert_eq!(buf.read(i), Sample::new(i as i8, 0, 0, 0, 0));
        }
    }

    #[test]
    fn truncated_download_keeps_partial_bytes() {
        let (_dir, store) = store();
        // Two full samples plus a torn third one.
        let bytes = ramp_bytes(2)
            .into_iter()
            .chain([1, 2, 3])
            .collect::<Vec<_>>();

        let err = download_samples(&store, Slot::Regular(1), &mut bytes.as_slice(), 4)
            .unwrap_err();
        assert!(matches!(
            err,
            TransferError::Truncated { got: 2, expected: 4 }
        ));

        // Partial channel kept, but a full-length load now rejects it.
        assert!(store.contains("a1"));
        let mut buf = SampleBuffer::with_len(4);
        assert!(store.load_into("a1", &mut buf).is_err());
    }

    #[test]
    fn upload_round_trips_the_stored_bytes() {
        let (_dir, store) = store();
        let mut buf = SampleBuffer::with_len(4);
        for i in 0..4 {
            buf.write(i, Sample::new(i as i8, 1, 2, 3, 4));
        }
        store.save("p2", &buf).unwrap();

        let mut out = Vec::new();
        upload(&store, Slot::SkillsSegment(2), &mut out).unwrap();
        let expected: Vec<u8> = buf.iter().flat_map(Sample::to_bytes).collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn upload_of_missing_slot_writes_nothing() {
        let (_dir, store) = store();
        let mut out = Vec::new();
        let err = upload(&store, Slot::Regular(7), &mut out).unwrap_err();
        assert!(matches!(err, TransferError::NotFound(name) if name == "a7"));
        assert!(out.is_empty());
    }

    #[test]
    fn slots_without_channels_are_rejected_before_io() {
        let (dir, store) = store();
        let mut bytes: &[u8] = &[];
        assert!(matches!(
            download_samples(&store, Slot::Skills, &mut bytes, 4),
            Err(TransferError::Selection(SelectionError::NoChannel))
        ));
        assert!(matches!(
            download_samples(&store, Slot::Regular(0), &mut bytes, 4),
            Err(TransferError::Selection(_))
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
