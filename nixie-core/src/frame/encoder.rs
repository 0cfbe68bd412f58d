//! Tube frame encoding
//!
//! The driver boards chain 64 shift-register outputs. Six 10-bit one-hot
//! fields (one per tube) sit between two 2-bit groups of unconnected
//! outputs. Frame bit `n` is bit `n % 8` of wire byte `n / 8`; bytes go out
//! in order, each least significant bit first.
//!
//! ```text
//! bit  63        54 53        44 43        34 33 32 31        22 21        12 11         2 1 0
//!     ┌────────────┬────────────┬────────────┬─────┬────────────┬────────────┬────────────┬───┐
//!     │   tube 1   │   tube 2   │   tube 3   │ pad │   tube 4   │   tube 5   │   tube 6   │pad│
//!     └────────────┴────────────┴────────────┴─────┴────────────┴────────────┴────────────┴───┘
//! ```
//!
//! Inside a field, digit `d` is wired to field bit `9 - d`.

use super::digit::{DigitSet, TUBE_COUNT};

/// Bits per tube field
pub const FIELD_WIDTH: u8 = 10;

/// Bytes on the wire per frame
pub const FRAME_BYTES: usize = 8;

/// Lowest frame bit of each tube field, position 1 first
const FIELD_BASE: [u8; TUBE_COUNT] = [54, 44, 34, 22, 12, 2];

/// Unconnected outputs: bits 0-1 and 32-33
pub const PADDING_MASK: u64 = 0b11 | (0b11 << 32);

/// Every cathode output
pub const DATA_MASK: u64 = !PADDING_MASK;

const FIELD_ONES: u64 = (1 << FIELD_WIDTH) - 1;

/// Output level that lights a cathode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Lit = 0, off = 1; an empty frame is all ones
    ActiveLow,
    /// Lit = 1, off = 0; an empty frame is all zeros
    ActiveHigh,
}

/// Frame bit that lights `digit` on the tube at 0-based `tube` index
///
/// Returns `None` for a tube index above 5 or a digit above 9.
pub const fn cathode_bit(tube: usize, digit: u8) -> Option<u8> {
    if tube >= TUBE_COUNT || digit > 9 {
        return None;
    }
    Some(FIELD_BASE[tube] + (FIELD_WIDTH - 1 - digit))
}

/// All ten cathode bits of the tube at 0-based `tube` index
pub const fn field_mask(tube: usize) -> Option<u64> {
    if tube >= TUBE_COUNT {
        return None;
    }
    Some(FIELD_ONES << FIELD_BASE[tube])
}

/// A complete 64-bit frame for the shift-register chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TubeFrame(u64);

impl TubeFrame {
    /// Wrap raw frame bits
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Raw frame bits, bit 0 first on the wire
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Bytes in transmit order
    pub const fn to_bytes(self) -> [u8; FRAME_BYTES] {
        self.0.to_le_bytes()
    }

    /// Rebuild a frame from bytes in transmit order
    pub const fn from_bytes(bytes: [u8; FRAME_BYTES]) -> Self {
        Self(u64::from_le_bytes(bytes))
    }

    /// State of a single frame bit
    pub const fn bit(self, index: u8) -> bool {
        index < 64 && (self.0 >> index) & 1 == 1
    }

    /// The 10 raw bits of one tube field, field bit 0 in bit 0
    pub fn field(self, tube: usize) -> Option<u16> {
        let base = *FIELD_BASE.get(tube)?;
        Some(((self.0 >> base) & FIELD_ONES) as u16)
    }

    /// Padding bits, in place
    pub const fn padding(self) -> u64 {
        self.0 & PADDING_MASK
    }
}

/// Converts digits to frames for one wiring polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameEncoder {
    polarity: Polarity,
}

impl FrameEncoder {
    /// Create an encoder for the given polarity
    pub const fn new(polarity: Polarity) -> Self {
        Self { polarity }
    }

    /// Polarity this encoder produces
    pub const fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Encode six digits into a frame
    ///
    /// Blank tubes get every cathode off; lit tubes get exactly their digit's
    /// cathode on. Padding is always zero.
    pub fn encode(&self, digits: &DigitSet) -> TubeFrame {
        let mut lit = 0u64;
        for (tube, digit) in digits.iter().enumerate() {
            if let Some(bit) = digit.value().and_then(|d| cathode_bit(tube, d)) {
                lit |= 1 << bit;
            }
        }

        match self.polarity {
            Polarity::ActiveHigh => TubeFrame(lit),
            Polarity::ActiveLow => TubeFrame(!lit & DATA_MASK),
        }
    }

    /// Frame with every tube dark
    pub fn blank(&self) -> TubeFrame {
        self.encode(&DigitSet::BLANK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::digit::Digit;
    use proptest::prelude::*;

    const LOW: FrameEncoder = FrameEncoder::new(Polarity::ActiveLow);
    const HIGH: FrameEncoder = FrameEncoder::new(Polarity::ActiveHigh);

    fn digit_strategy() -> impl Strategy<Value = Digit> {
        prop_oneof![
            1 => Just(Digit::BLANK),
            5 => (0u8..=9).prop_map(Digit::units),
        ]
    }

    fn digit_set_strategy() -> impl Strategy<Value = DigitSet> {
        proptest::array::uniform6(digit_strategy()).prop_map(DigitSet::new)
    }

    #[test]
    fn test_fields_cover_data_bits() {
        let mut all = 0u64;
        for tube in 0..TUBE_COUNT {
            let mask = field_mask(tube).unwrap();
            assert_eq!(mask.count_ones(), 10);
            assert_eq!(all & mask, 0, "tube {} overlaps another field", tube);
            all |= mask;
        }
        assert_eq!(all, DATA_MASK);
        assert_eq!(field_mask(6), None);
    }

    #[test]
    fn test_cathode_bit_table() {
        assert_eq!(cathode_bit(0, 0), Some(63));
        assert_eq!(cathode_bit(0, 9), Some(54));
        assert_eq!(cathode_bit(3, 9), Some(22));
        assert_eq!(cathode_bit(5, 0), Some(11));
        assert_eq!(cathode_bit(5, 9), Some(2));
        assert_eq!(cathode_bit(6, 0), None);
        assert_eq!(cathode_bit(0, 10), None);

        // Same digit, same offset inside every field
        for digit in 0..=9 {
            for tube in 0..TUBE_COUNT {
                let bit = cathode_bit(tube, digit).unwrap();
                assert_ne!(field_mask(tube).unwrap() & (1u64 << bit), 0);
                assert_eq!(bit - FIELD_BASE[tube], 9 - digit);
            }
        }
    }

    #[test]
    fn test_active_low_123456() {
        let digits = DigitSet::from_values([1, 2, 3, 4, 5, 6]).unwrap();
        let frame = LOW.encode(&digits);

        for (tube, digit) in [1u16, 2, 3, 4, 5, 6].iter().enumerate() {
            let field = frame.field(tube).unwrap();
            assert_eq!(field, 0x3FF & !(1 << (9 - digit)), "tube {}", tube + 1);
            assert_eq!(field.count_ones(), 9);
        }
        assert_eq!(frame.padding(), 0);
    }

    #[test]
    fn test_blank_frames() {
        assert_eq!(LOW.blank().bits(), DATA_MASK);
        assert_eq!(HIGH.blank().bits(), 0);
    }

    #[test]
    fn test_wire_bytes() {
        // Tube 6 showing 9 is frame bit 2: first byte, third bit out
        let digits = DigitSet::single(5, Digit::units(9));
        let bytes = HIGH.encode(&digits).to_bytes();
        assert_eq!(bytes, [0b0000_0100, 0, 0, 0, 0, 0, 0, 0]);

        // Tube 1 showing 0 is frame bit 63: last byte, last bit out
        let digits = DigitSet::single(0, Digit::units(0));
        let bytes = HIGH.encode(&digits).to_bytes();
        assert_eq!(bytes, [0, 0, 0, 0, 0, 0, 0, 0b1000_0000]);

        let frame = LOW.encode(&digits);
        assert_eq!(TubeFrame::from_bytes(frame.to_bytes()), frame);
    }

    proptest! {
        #[test]
        fn prop_one_hot_per_lit_tube(digits in digit_set_strategy()) {
            let frame = HIGH.encode(&digits);
            prop_assert_eq!(frame.padding(), 0);

            for (tube, digit) in digits.iter().enumerate() {
                let field = frame.field(tube).unwrap();
                match digit.value() {
                    Some(d) => {
                        prop_assert_eq!(field.count_ones(), 1);
                        prop_assert!(frame.bit(cathode_bit(tube, d).unwrap()));
                    }
                    None => prop_assert_eq!(field, 0),
                }
            }
        }

        #[test]
        fn prop_active_low_mirrors_active_high(digits in digit_set_strategy()) {
            let low = LOW.encode(&digits);
            let high = HIGH.encode(&digits);

            prop_assert_eq!(low.padding(), 0);
            prop_assert_eq!(low.bits() ^ high.bits(), DATA_MASK);
        }

        #[test]
        fn prop_encode_is_pure(digits in digit_set_strategy(), other in digit_set_strategy()) {
            let first = LOW.encode(&digits);
            let _ = LOW.encode(&other);
            prop_assert_eq!(LOW.encode(&digits), first);
        }
    }
}
