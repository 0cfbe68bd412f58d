//! BCD register codec for the DS1307/DS3231 family
//!
//! The seven time-keeping registers hold one BCD field each. A few high bits
//! carry control flags that must be masked off before the digits are read:
//!
//! | reg | field   | digits | flags                                  |
//! |-----|---------|--------|----------------------------------------|
//! | 0   | second  | 0x7F   | bit 7 oscillator halt (DS1307)         |
//! | 1   | minute  | 0x7F   |                                        |
//! | 2   | hour    | 0x3F   | bit 6 12-hour mode, bit 5 PM (12h)     |
//! | 3   | weekday | 0x07   |                                        |
//! | 4   | day     | 0x3F   |                                        |
//! | 5   | month   | 0x1F   | bit 7 century (DS3231)                 |
//! | 6   | year    | 0xFF   |                                        |

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::sample::{ClockSample, Field};
use crate::traits::CLOCK_REGISTER_COUNT;

/// Register offsets and flag bits
pub mod regs {
    pub const SECONDS: usize = 0;
    pub const MINUTES: usize = 1;
    pub const HOURS: usize = 2;
    pub const WEEKDAY: usize = 3;
    pub const DAY: usize = 4;
    pub const MONTH: usize = 5;
    pub const YEAR: usize = 6;

    /// Oscillator halt flag in the seconds register
    pub const CLOCK_HALT: u8 = 0x80;
    /// 12-hour mode flag in the hours register
    pub const HOUR_12: u8 = 0x40;
    /// PM flag in the hours register, 12-hour mode only
    pub const PM: u8 = 0x20;
    /// Century flag in the month register
    pub const CENTURY: u8 = 0x80;

    pub const SECONDS_MASK: u8 = 0x7F;
    pub const MINUTES_MASK: u8 = 0x7F;
    pub const HOURS_24_MASK: u8 = 0x3F;
    pub const HOURS_12_MASK: u8 = 0x1F;
    pub const WEEKDAY_MASK: u8 = 0x07;
    pub const DAY_MASK: u8 = 0x3F;
    pub const MONTH_MASK: u8 = 0x1F;
}

/// Hour register format written by [`ClockCodec::encode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HourMode {
    #[default]
    TwentyFourHour,
    TwelveHour,
}

/// Codec errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodecError {
    /// Field out of range, or register digits that are not valid BCD
    InvalidField(Field),
}

/// Packed BCD of a value in 0-99
const fn to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

/// Binary value of a BCD byte, rejecting nibbles above 9
fn from_bcd(raw: u8, field: Field) -> Result<u8, CodecError> {
    let tens = raw >> 4;
    let units = raw & 0x0F;
    if tens > 9 || units > 9 {
        return Err(CodecError::InvalidField(field));
    }
    Ok(tens * 10 + units)
}

/// Converts between [`ClockSample`] and raw register bytes
///
/// Stateless apart from the hour format used when encoding. Decoding
/// follows the mode bit stored in the hour register, so a chip left in
/// either mode reads back correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockCodec {
    hour_mode: HourMode,
}

impl ClockCodec {
    pub const fn new(hour_mode: HourMode) -> Self {
        Self { hour_mode }
    }

    pub const fn hour_mode(&self) -> HourMode {
        self.hour_mode
    }

    /// Decode the seven time-keeping registers
    pub fn decode(&self, raw: &[u8; CLOCK_REGISTER_COUNT]) -> Result<ClockSample, CodecError> {
        let sample = ClockSample {
            second: from_bcd(raw[regs::SECONDS] & regs::SECONDS_MASK, Field::Second)?,
            minute: from_bcd(raw[regs::MINUTES] & regs::MINUTES_MASK, Field::Minute)?,
            hour: decode_hour(raw[regs::HOURS])?,
            weekday: raw[regs::WEEKDAY] & regs::WEEKDAY_MASK,
            day: from_bcd(raw[regs::DAY] & regs::DAY_MASK, Field::Day)?,
            month: from_bcd(raw[regs::MONTH] & regs::MONTH_MASK, Field::Month)?,
            year: from_bcd(raw[regs::YEAR], Field::Year)?,
        };

        match sample.invalid_field() {
            Some(field) => Err(CodecError::InvalidField(field)),
            None => Ok(sample),
        }
    }

    /// Encode a sample into the seven time-keeping registers
    ///
    /// Clears the oscillator-halt and century flags.
    pub fn encode(&self, sample: &ClockSample) -> Result<[u8; CLOCK_REGISTER_COUNT], CodecError> {
        if let Some(field) = sample.invalid_field() {
            return Err(CodecError::InvalidField(field));
        }

        let mut raw = [0u8; CLOCK_REGISTER_COUNT];
        raw[regs::SECONDS] = to_bcd(sample.second);
        raw[regs::MINUTES] = to_bcd(sample.minute);
        raw[regs::HOURS] = self.encode_hour(sample.hour);
        raw[regs::WEEKDAY] = sample.weekday;
        raw[regs::DAY] = to_bcd(sample.day);
        raw[regs::MONTH] = to_bcd(sample.month);
        raw[regs::YEAR] = to_bcd(sample.year);
        Ok(raw)
    }

    fn encode_hour(&self, hour: u8) -> u8 {
        match self.hour_mode {
            HourMode::TwentyFourHour => to_bcd(hour),
            HourMode::TwelveHour => {
                let pm = if hour >= 12 { regs::PM } else { 0 };
                let h12 = match hour % 12 {
                    0 => 12,
                    h => h,
                };
                regs::HOUR_12 | pm | to_bcd(h12)
            }
        }
    }
}

fn decode_hour(raw: u8) -> Result<u8, CodecError> {
    if raw & regs::HOUR_12 == 0 {
        return from_bcd(raw & regs::HOURS_24_MASK, Field::Hour);
    }

    let h12 = from_bcd(raw & regs::HOURS_12_MASK, Field::Hour)?;
    if !(1..=12).contains(&h12) {
        return Err(CodecError::InvalidField(Field::Hour));
    }
    let pm_offset = if raw & regs::PM != 0 { 12 } else { 0 };
    Ok(h12 % 12 + pm_offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const H24: ClockCodec = ClockCodec::new(HourMode::TwentyFourHour);
    const H12: ClockCodec = ClockCodec::new(HourMode::TwelveHour);

    fn reference_sample() -> ClockSample {
        ClockSample {
            second: 45,
            minute: 30,
            hour: 23,
            weekday: 2,
            day: 13,
            month: 4,
            year: 24,
        }
    }

    fn sample_strategy() -> impl Strategy<Value = ClockSample> {
        (0u8..60, 0u8..60, 0u8..24, 0u8..7, 1u8..=31, 1u8..=12, 0u8..100).prop_map(
            |(second, minute, hour, weekday, day, month, year)| ClockSample {
                second,
                minute,
                hour,
                weekday,
                day,
                month,
                year,
            },
        )
    }

    #[test]
    fn test_encode_reference_24h() {
        let raw = H24.encode(&reference_sample()).unwrap();
        assert_eq!(raw, [0x45, 0x30, 0x23, 0x02, 0x13, 0x04, 0x24]);
        assert_eq!(H24.decode(&raw).unwrap(), reference_sample());
    }

    #[test]
    fn test_encode_reference_12h() {
        let raw = H12.encode(&reference_sample()).unwrap();
        assert_eq!(raw[regs::HOURS], 0x71);
        assert_eq!(H12.decode(&raw).unwrap(), reference_sample());
    }

    #[test]
    fn test_12h_midnight_and_noon() {
        let mut sample = reference_sample();

        sample.hour = 0;
        let raw = H12.encode(&sample).unwrap();
        assert_eq!(raw[regs::HOURS], regs::HOUR_12 | 0x12);
        assert_eq!(H12.decode(&raw).unwrap().hour, 0);

        sample.hour = 12;
        let raw = H12.encode(&sample).unwrap();
        assert_eq!(raw[regs::HOURS], regs::HOUR_12 | regs::PM | 0x12);
        assert_eq!(H12.decode(&raw).unwrap().hour, 12);
    }

    #[test]
    fn test_decode_masks_control_bits() {
        let raw = [
            0x45 | regs::CLOCK_HALT,
            0x30,
            0x23,
            0x02,
            0x13,
            0x04 | regs::CENTURY,
            0x24,
        ];
        assert_eq!(H24.decode(&raw).unwrap(), reference_sample());
    }

    #[test]
    fn test_decode_follows_chip_hour_mode() {
        // 24h codec reading a chip left in 12h mode
        let raw = [0x45, 0x30, 0x71, 0x02, 0x13, 0x04, 0x24];
        assert_eq!(H24.decode(&raw).unwrap().hour, 23);
    }

    #[test]
    fn test_decode_rejects_bad_registers() {
        let good = H24.encode(&reference_sample()).unwrap();

        let mut raw = good;
        raw[regs::SECONDS] = 0x5A;
        assert_eq!(H24.decode(&raw), Err(CodecError::InvalidField(Field::Second)));

        let mut raw = good;
        raw[regs::MINUTES] = 0x60;
        assert_eq!(H24.decode(&raw), Err(CodecError::InvalidField(Field::Minute)));

        let mut raw = good;
        raw[regs::HOURS] = 0x24;
        assert_eq!(H24.decode(&raw), Err(CodecError::InvalidField(Field::Hour)));

        let mut raw = good;
        raw[regs::HOURS] = regs::HOUR_12 | 0x13;
        assert_eq!(H24.decode(&raw), Err(CodecError::InvalidField(Field::Hour)));

        let mut raw = good;
        raw[regs::WEEKDAY] = 7;
        assert_eq!(H24.decode(&raw), Err(CodecError::InvalidField(Field::Weekday)));

        let mut raw = good;
        raw[regs::DAY] = 0x00;
        assert_eq!(H24.decode(&raw), Err(CodecError::InvalidField(Field::Day)));

        let mut raw = good;
        raw[regs::MONTH] = 0x13;
        assert_eq!(H24.decode(&raw), Err(CodecError::InvalidField(Field::Month)));

        let mut raw = good;
        raw[regs::YEAR] = 0xA0;
        assert_eq!(H24.decode(&raw), Err(CodecError::InvalidField(Field::Year)));
    }

    #[test]
    fn test_encode_rejects_invalid_sample() {
        let mut sample = reference_sample();
        sample.minute = 60;
        assert_eq!(H24.encode(&sample), Err(CodecError::InvalidField(Field::Minute)));

        let mut sample = reference_sample();
        sample.weekday = 7;
        assert_eq!(H12.encode(&sample), Err(CodecError::InvalidField(Field::Weekday)));
    }

    proptest! {
        #[test]
        fn prop_round_trip_24h(sample in sample_strategy()) {
            let raw = H24.encode(&sample).unwrap();
            prop_assert_eq!(raw[regs::HOURS] & regs::HOUR_12, 0);
            prop_assert_eq!(H24.decode(&raw).unwrap(), sample);
        }

        #[test]
        fn prop_round_trip_12h(sample in sample_strategy()) {
            let raw = H12.encode(&sample).unwrap();
            prop_assert_ne!(raw[regs::HOURS] & regs::HOUR_12, 0);
            prop_assert_eq!(H12.decode(&raw).unwrap(), sample);
        }
    }
}
