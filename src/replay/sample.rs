//! The time-quantized control command tuple.
//!
//! A [`Sample`] is one tick's worth of driver input: five signed byte
//! channels captured together at the sample rate. The replay core treats
//! a sample as an opaque fixed-width tuple; what each channel actually
//! drives (arcade mixing, a shooter, a lift) is decided by the
//! [`MotorSink`](crate::peripherals::MotorSink) implementation.

/// One tick's five-channel command tuple.
///
/// Channel values span the full signed byte range (-128..=127), matching
/// raw joystick axes. [`Sample::NEUTRAL`] is the all-zero sample; driving
/// a motor sink with it repeatedly must be safe and idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sample {
    /// Forward/backward translation.
    pub forward:  i8,
    /// Left/right strafe translation.
    pub lateral:  i8,
    /// Rotation about the vertical axis.
    pub rotation: i8,
    /// First auxiliary mechanism (e.g. shooter or dumper).
    pub aux1:     i8,
    /// Second auxiliary mechanism (e.g. lift).
    pub aux2:     i8,
}

/// Number of bytes a sample occupies in a stored channel.
pub const SAMPLE_WIDTH: usize = 5;

impl Sample {
    /// The all-zero sample. Playback ends by commanding this.
    pub const NEUTRAL: Sample = Sample {
        forward:  0,
        lateral:  0,
        rotation: 0,
        aux1:     0,
        aux2:     0,
    };

    pub fn new(forward: i8, lateral: i8, rotation: i8, aux1: i8, aux2: i8) -> Self {
        Sample {
            forward,
            lateral,
            rotation,
            aux1,
            aux2,
        }
    }

    /// Encodes the sample as five signed bytes in channel order.
    ///
    /// This is the persisted wire format: no header, no padding. Stored
    /// channels are exactly `capacity * SAMPLE_WIDTH` bytes.
    pub fn to_bytes(self) -> [u8; SAMPLE_WIDTH] {
        [
            self.forward as u8,
            self.lateral as u8,
            self.rotation as u8,
            self.aux1 as u8,
            self.aux2 as u8,
        ]
    }

    /// Decodes a sample from five signed bytes in channel order.
    pub fn from_bytes(bytes: [u8; SAMPLE_WIDTH]) -> Self {
        Sample {
            forward:  bytes[0] as i8,
            lateral:  bytes[1] as i8,
            rotation: bytes[2] as i8,
            aux1:     bytes[3] as i8,
            aux2:     bytes[4] as i8,
        }
    }

    /// Whether every channel is at rest.
    pub fn is_neutral(self) -> bool { self == Sample::NEUTRAL }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_is_default() {
        assert_eq!(Sample::default(), Sample::NEUTRAL);
        assert!(Sample::NEUTRAL.is_neutral());
    }

    #[test]
    fn byte_codec_preserves_sign() {
        let s = Sample::new(-128, -1, 0, 1, 127);
        assert_eq!(Sample::from_bytes(s.to_bytes()), s);
        assert_eq!(s.to_bytes(), [0x80, 0xFF, 0x00, 0x01, 0x7F]);
    }
}
