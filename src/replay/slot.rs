//! Slot identifiers and channel-name resolution.
//!
//! A [`Slot`] is what the driver picks on the selection UI: a numbered
//! autonomous slot, the four-segment programming-skills run, one
//! specific skills segment (as a save target), or the built-in
//! hard-coded routine. Resolution from a slot to the stored channel
//! name(s) is a pure computation — nothing here touches storage.
//!
//! Channel naming follows the on-brain file layout: regular slots live
//! in `a1..a10`, skills segments in `p0..p3`. The two namespaces are
//! disjoint, so a skills save can never clobber a regular slot.

use core::fmt::{self, Write};

use thiserror::Error;

use crate::replay::{MAX_SLOTS, SEGMENT_COUNT};

/// A stored channel name (`a{n}` or `p{k}`).
///
/// Bounded, stack-allocated: channel names never exceed three bytes
/// plus room to spare.
pub type ChannelName = heapless::String<8>;

/// A selection with an out-of-range payload, rejected before any I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Regular slot numbers run 1..=[`MAX_SLOTS`].
    #[error("slot {0} is out of range (valid: 1..={MAX_SLOTS})")]
    SlotOutOfRange(u8),
    /// Skills segment indices run 0..[`SEGMENT_COUNT`].
    #[error("skills segment {0} is out of range (valid: 0..{SEGMENT_COUNT})")]
    SegmentOutOfRange(u8),
    /// The selection has no stored channel to save to.
    #[error("the selection has no stored channel")]
    NoChannel,
}

/// A user-facing slot selection.
///
/// "Nothing selected" is represented as `Option::<Slot>::None` at the
/// API boundary rather than a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Numbered autonomous slot, 1..=[`MAX_SLOTS`].
    Regular(u8),
    /// The full programming-skills run: segments `p0..p3` chained
    /// back-to-back at playback time.
    Skills,
    /// One skills segment, 0..[`SEGMENT_COUNT`]. Only meaningful as a
    /// save/transfer target; a skills *playback* always starts at
    /// segment 0 and chains through all of them.
    SkillsSegment(u8),
    /// The built-in routine. No stored data; the player reports it
    /// back to the caller instead of replaying anything.
    Hardcoded,
}

impl Slot {
    /// Checked constructor for a regular slot.
    pub fn regular(n: u8) -> Result<Slot, SelectionError> {
        if (1..=MAX_SLOTS).contains(&n) {
            Ok(Slot::Regular(n))
        } else {
            Err(SelectionError::SlotOutOfRange(n))
        }
    }

    /// Checked constructor for a skills segment.
    pub fn skills_segment(k: u8) -> Result<Slot, SelectionError> {
        if k < SEGMENT_COUNT {
            Ok(Slot::SkillsSegment(k))
        } else {
            Err(SelectionError::SegmentOutOfRange(k))
        }
    }

    /// Validates the payload range. The enum is open for construction,
    /// so session operations re-check before touching the store.
    pub fn validate(self) -> Result<(), SelectionError> {
        match self {
            Slot::Regular(n) if !(1..=MAX_SLOTS).contains(&n) => {
                Err(SelectionError::SlotOutOfRange(n))
            }
            Slot::SkillsSegment(k) if k >= SEGMENT_COUNT => {
                Err(SelectionError::SegmentOutOfRange(k))
            }
            _ => Ok(()),
        }
    }

    /// The single channel this slot persists to, if it has one.
    ///
    /// [`Slot::Skills`] and [`Slot::Hardcoded`] have no save target:
    /// a skills recording is saved one [`Slot::SkillsSegment`] at a
    /// time, and the hard-coded routine stores nothing.
    pub fn save_channel(self) -> Option<ChannelName> {
        match self {
            Slot::Regular(n) => Some(channel_name('a', n)),
            Slot::SkillsSegment(k) => Some(channel_name('p', k)),
            Slot::Skills | Slot::Hardcoded => None,
        }
    }

    /// The channel a load starts from, if any.
    ///
    /// A skills playback begins at segment 0; the player pulls the
    /// remaining segments itself via [`segment_channel`].
    pub fn load_channel(self) -> Option<ChannelName> {
        match self {
            Slot::Regular(n) => Some(channel_name('a', n)),
            Slot::SkillsSegment(k) => Some(channel_name('p', k)),
            Slot::Skills => Some(segment_channel(0)),
            Slot::Hardcoded => None,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Regular(n) => write!(f, "slot {n}"),
            Slot::Skills => write!(f, "programming skills"),
            Slot::SkillsSegment(k) => write!(f, "skills segment {k}"),
            Slot::Hardcoded => write!(f, "hardcoded skills"),
        }
    }
}

/// Channel name for skills segment `k` (`p0`, `p1`, ...).
pub fn segment_channel(k: u8) -> ChannelName { channel_name('p', k) }

fn channel_name(prefix: char, n: u8) -> ChannelName {
    let mut name = ChannelName::new();
    // Cannot overflow: "a255" is four bytes, capacity is eight.
    let _ = write!(name, "{prefix}{n}");
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_slots_resolve_to_a_names() {
        assert_eq!(
            Slot::regular(1).unwrap().save_channel().unwrap().as_str(),
            "a1"
        );
        assert_eq!(
            Slot::regular(MAX_SLOTS).unwrap().load_channel().unwrap().as_str(),
            "a10"
        );
    }

    #[test]
    fn skills_segments_resolve_to_p_names() {
        for k in 0..SEGMENT_COUNT {
            let name = Slot::skills_segment(k).unwrap().save_channel().unwrap();
            assert_eq!(name.as_str(), format!("p{k}"));
        }
    }

    #[test]
    fn skills_playback_starts_at_segment_zero() {
        assert_eq!(Slot::Skills.load_channel().unwrap().as_str(), "p0");
        assert_eq!(Slot::Skills.save_channel(), None);
    }

    #[test]
    fn hardcoded_has_no_channel() {
        assert_eq!(Slot::Hardcoded.save_channel(), None);
        assert_eq!(Slot::Hardcoded.load_channel(), None);
    }

    #[test]
    fn out_of_range_selections_are_rejected() {
        assert!(Slot::regular(0).is_err());
        assert!(Slot::regular(MAX_SLOTS + 1).is_err());
        assert!(Slot::skills_segment(SEGMENT_COUNT).is_err());
        assert!(Slot::Regular(0).validate().is_err());
        assert!(Slot::SkillsSegment(9).validate().is_err());
        assert!(Slot::Skills.validate().is_ok());
    }
}
