//! Persistent slot storage.
//!
//! Recorded sessions are persisted as *channels*: fixed-length byte
//! regions named after their slot (`a1..a10` for regular autons,
//! `p0..p3` for skills segments). On the brain each channel is a file
//! on the user partition; this module backs them with files under a
//! root directory so the exact same layout works on a desk.
//!
//! A channel is always written whole — `capacity * SAMPLE_WIDTH` bytes,
//! five signed bytes per sample in buffer order, no header or checksum.
//! Reads either consume the whole channel ([`SlotStore::load_into`]) or
//! stream one sample at a time ([`ChannelReader`]), which is how the
//! skills player refills the live buffer mid-playback.
//!
//! # Example
//!
//! ```ignore
//! use ekho::store::SlotStore;
//! use ekho::replay::buffer::SampleBuffer;
//!
//! let store = SlotStore::open("autons")?;
//! let mut buffer = SampleBuffer::new();
//! store.load_into("a1", &mut buffer)?;
//! ```

/// Serial transfer of stored channels to and from a host computer.
pub mod transfer;

use std::{
    fs::{File, OpenOptions},
    io::{self, BufReader, BufWriter, Read, Write},
    path::PathBuf,
};

use log::{debug, info};
use thiserror::Error;

use crate::replay::{
    buffer::SampleBuffer,
    sample::{Sample, SAMPLE_WIDTH},
};

/// Failures surfaced by slot storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The named channel has never been saved. Expected and
    /// user-recoverable: the UI reports "nothing to load".
    #[error("no routine saved in channel `{0}`")]
    NotFound(String),
    /// Underlying storage fault. Fatal to the current operation; no
    /// retries anywhere in the crate.
    #[error("storage I/O failure")]
    Io(#[from] io::Error),
}

/// Directory-backed channel storage.
///
/// One file per channel name under `root`. Saves truncate and rewrite
/// the full channel; loads never create anything.
#[derive(Debug, Clone)]
pub struct SlotStore {
    root: PathBuf,
}

impl SlotStore {
    /// Opens a store rooted at `root`, creating the directory if it
    /// does not exist yet.
    pub fn open(root: impl Into<PathBuf>) -> Result<SlotStore, StoreError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(SlotStore { root })
    }

    /// Writes the whole buffer to `channel`, creating or overwriting it.
    pub fn save(&self, channel: &str, buffer: &SampleBuffer) -> Result<(), StoreError> {
        info!("Saving {} samples to channel {}...", buffer.len(), channel);
        let file = File::create(self.root.join(channel))?;
        let mut writer = BufWriter::new(file);
        for sample in buffer.iter() {
            writer.write_all(&sample.to_bytes())?;
        }
        writer.flush()?;
        info!("Saved channel {}.", channel);
        Ok(())
    }

    /// Reads `channel` into `buffer`, which must be the same length the
    /// channel was saved with.
    ///
    /// Returns [`StoreError::NotFound`] if the channel was never saved
    /// (the channel is *not* created), or [`StoreError::Io`] if it is
    /// shorter than the buffer — e.g. the leftovers of a truncated
    /// transfer.
    pub fn load_into(&self, channel: &str, buffer: &mut SampleBuffer) -> Result<(), StoreError> {
        info!("Loading channel {}...", channel);
        let mut reader = self.reader(channel)?;
        for i in 0..buffer.len() {
            buffer.write(i, reader.next_sample()?);
        }
        info!("Loaded {} samples from channel {}.", buffer.len(), channel);
        Ok(())
    }

    /// Opens a streaming sample reader over `channel`.
    ///
    /// The skills player uses this to pull the next segment into the
    /// live buffer one sample per tick.
    pub fn reader(&self, channel: &str) -> Result<ChannelReader, StoreError> {
        let file = File::open(self.root.join(channel)).map_err(|e| not_found(e, channel))?;
        debug!("Opened channel {} for streaming reads.", channel);
        Ok(ChannelReader {
            reader: BufReader::new(file),
        })
    }

    /// Whether `channel` has ever been saved.
    ///
    /// The selection UI uses this to mark empty slots.
    pub fn contains(&self, channel: &str) -> bool { self.root.join(channel).exists() }

    /// Opens `channel` for a full rewrite, returning a raw byte sink.
    ///
    /// Only the transfer bridge writes channels incrementally; a failed
    /// transfer deliberately leaves whatever bytes it got to (see
    /// [`transfer`]).
    pub(crate) fn create(&self, channel: &str) -> Result<BufWriter<File>, StoreError> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.root.join(channel))?;
        Ok(BufWriter::new(file))
    }

    /// Opens `channel` for raw byte reads (used by uploads).
    pub(crate) fn open_raw(&self, channel: &str) -> Result<BufReader<File>, StoreError> {
        let file = File::open(self.root.join(channel)).map_err(|e| not_found(e, channel))?;
        Ok(BufReader::new(file))
    }
}

fn not_found(err: io::Error, channel: &str) -> StoreError {
    if err.kind() == io::ErrorKind::NotFound {
        StoreError::NotFound(channel.to_string())
    } else {
        StoreError::Io(err)
    }
}

/// Streaming one-sample-at-a-time reader over a stored channel.
pub struct ChannelReader {
    reader: BufReader<File>,
}

impl ChannelReader {
    /// Reads the next sample from the channel.
    ///
    /// Running off the end of the channel is an [`StoreError::Io`]
    /// (unexpected EOF): callers always know the channel length.
    pub fn next_sample(&mut self) -> Result<Sample, StoreError> {
        let mut bytes = [0u8; SAMPLE_WIDTH];
        self.reader.read_exact(&mut bytes)?;
        Ok(Sample::from_bytes(bytes))
    }
}
