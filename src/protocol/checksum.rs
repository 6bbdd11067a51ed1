//! Additive frame checksum with escape-byte width selection
//!
//! AMInet guards each frame with a plain byte sum rather than a CRC. The sum
//! covers every frame byte except the first, and the encoded field widens as
//! the value grows:
//!
//! ```text
//! value < 250:    [value]                      (1 byte)
//! value < 65536:  [0xFF, hi, lo]               (3 bytes, big-endian)
//! otherwise:      [0xFE, b23..16, b15..8, b7..0] (4 bytes, low 24 bits)
//! ```
//!
//! The escape markers 0xFE/0xFF can never be confused with an inline value
//! because inline values stop at 249.

/// Escape marker for the 16-bit checksum form
pub const WIDE_MARKER: u8 = 0xFF;

/// Escape marker for the 24-bit checksum form
pub const EXTENDED_MARKER: u8 = 0xFE;

/// Largest checksum value encoded as a single inline byte
pub const INLINE_MAX: u32 = 249;

/// Sum of every frame byte except the first
///
/// The accumulator is never allowed to wrap: a UDP-sized frame of 0xFF bytes
/// sums far below `u32::MAX`.
#[must_use]
pub fn sum(frame: &[u8]) -> u32 {
    frame.iter().skip(1).map(|&b| u32::from(b)).sum()
}

/// Checksum field encoded for the wire (1, 3, or 4 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checksum {
    bytes: [u8; 4],
    width: u8,
}

impl Checksum {
    /// Encode a checksum value, selecting the field width by magnitude
    #[must_use]
    pub fn encode(value: u32) -> Self {
        let be = value.to_be_bytes();
        if value > 0xFFFF {
            // Escape form keeps only the low 24 bits
            Self {
                bytes: [EXTENDED_MARKER, be[1], be[2], be[3]],
                width: 4,
            }
        } else if value > INLINE_MAX {
            Self {
                bytes: [WIDE_MARKER, be[2], be[3], 0],
                width: 3,
            }
        } else {
            Self {
                bytes: [be[3], 0, 0, 0],
                width: 1,
            }
        }
    }

    /// Compute and encode the checksum over a frame head (preamble + payload)
    #[must_use]
    pub fn over(frame: &[u8]) -> Self {
        Self::encode(sum(frame))
    }

    /// Encoded wire bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.width)]
    }

    /// Width of the encoded field in bytes (1, 3, or 4)
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_skips_first_byte() {
        assert_eq!(sum(&[0xF1, 0x01, 0x04]), 0x05);
        assert_eq!(sum(&[0x00, 0x01, 0x04]), 0x05);
        assert_eq!(sum(&[0xFF]), 0);
        assert_eq!(sum(&[]), 0);
    }

    #[test]
    fn test_inline_boundary() {
        assert_eq!(Checksum::encode(0).as_bytes(), &[0x00]);
        assert_eq!(Checksum::encode(249).as_bytes(), &[0xF9]);
        assert_eq!(Checksum::encode(250).as_bytes(), &[0xFF, 0x00, 0xFA]);
    }

    #[test]
    fn test_wide_boundary() {
        assert_eq!(Checksum::encode(65535).as_bytes(), &[0xFF, 0xFF, 0xFF]);
        assert_eq!(
            Checksum::encode(65536).as_bytes(),
            &[0xFE, 0x01, 0x00, 0x00]
        );
    }

    #[test]
    fn test_extended_keeps_low_24_bits() {
        assert_eq!(
            Checksum::encode(0x01AB_CDEF).as_bytes(),
            &[0xFE, 0xAB, 0xCD, 0xEF]
        );
    }

    #[test]
    fn test_widths() {
        assert_eq!(Checksum::encode(7).width(), 1);
        assert_eq!(Checksum::encode(300).width(), 3);
        assert_eq!(Checksum::encode(70_000).width(), 4);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_inline_values_encode_as_themselves(value in 0u32..=INLINE_MAX) {
                let field = Checksum::encode(value);
                prop_assert_eq!(field.as_bytes(), &[value as u8]);
            }

            #[test]
            fn prop_wide_values_are_big_endian(value in (INLINE_MAX + 1)..=0xFFFFu32) {
                let field = Checksum::encode(value);
                prop_assert_eq!(
                    field.as_bytes(),
                    &[WIDE_MARKER, (value >> 8) as u8, value as u8]
                );
            }

            #[test]
            fn prop_extended_values_carry_low_24_bits(value in 0x1_0000u32..=u32::MAX) {
                let field = Checksum::encode(value);
                let low = value & 0x00FF_FFFF;
                prop_assert_eq!(
                    field.as_bytes(),
                    &[
                        EXTENDED_MARKER,
                        (low >> 16) as u8,
                        (low >> 8) as u8,
                        low as u8
                    ]
                );
            }

            #[test]
            fn prop_first_byte_never_affects_sum(
                first in any::<u8>(),
                rest in proptest::collection::vec(any::<u8>(), 0..128)
            ) {
                let mut frame = vec![first];
                frame.extend_from_slice(&rest);
                let mut flipped = frame.clone();
                flipped[0] = first.wrapping_add(1);
                prop_assert_eq!(sum(&frame), sum(&flipped));
            }

            #[test]
            fn prop_later_bytes_always_affect_sum(
                first in any::<u8>(),
                rest in proptest::collection::vec(any::<u8>(), 1..128),
                pick in any::<proptest::sample::Index>(),
                delta in 1u8..=255
            ) {
                let mut frame = vec![first];
                frame.extend_from_slice(&rest);
                let mut flipped = frame.clone();
                let at = 1 + pick.index(rest.len());
                flipped[at] = flipped[at].wrapping_add(delta);
                prop_assert_ne!(sum(&frame), sum(&flipped));
            }
        }
    }
}
