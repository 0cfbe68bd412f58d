//! Digit values for the six tubes

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of tubes on the display
pub const TUBE_COUNT: usize = 6;

/// Raw value callers use for a blank tube
pub const RAW_BLANK: i8 = -1;

/// Errors from building digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitError {
    /// Value is neither 0-9 nor blank
    InvalidDigit(i16),
    /// Hour, minute or second outside a clock face
    TimeOutOfRange,
}

/// A single tube value: one of the ten cathodes, or nothing lit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Digit(Option<u8>);

impl Digit {
    /// No cathode lit
    pub const BLANK: Digit = Digit(None);

    /// Create a digit from a value in 0-9
    pub fn new(value: u8) -> Result<Self, DigitError> {
        if value <= 9 {
            Ok(Digit(Some(value)))
        } else {
            Err(DigitError::InvalidDigit(value as i16))
        }
    }

    /// Create a digit from the raw form, where [`RAW_BLANK`] means blank
    pub fn from_raw(raw: i8) -> Result<Self, DigitError> {
        match raw {
            RAW_BLANK => Ok(Self::BLANK),
            0..=9 => Ok(Digit(Some(raw as u8))),
            _ => Err(DigitError::InvalidDigit(raw as i16)),
        }
    }

    /// The units digit of `value`
    ///
    /// Always valid, used where the value is computed rather than supplied.
    pub const fn units(value: u8) -> Self {
        Digit(Some(value % 10))
    }

    /// Lit digit, or `None` when blank
    pub const fn value(self) -> Option<u8> {
        self.0
    }

    /// Check if no cathode is lit
    pub const fn is_blank(self) -> bool {
        self.0.is_none()
    }
}

/// How the hour pair is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimeFormat {
    /// 00-23, leading zero shown
    #[default]
    TwentyFourHour,
    /// 1-12, leading zero blanked
    TwelveHour,
}

/// The six tube values, left (position 1) to right (position 6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitSet([Digit; TUBE_COUNT]);

impl DigitSet {
    /// All tubes blank
    pub const BLANK: DigitSet = DigitSet([Digit::BLANK; TUBE_COUNT]);

    /// Create from already validated digits
    pub const fn new(digits: [Digit; TUBE_COUNT]) -> Self {
        Self(digits)
    }

    /// Create from six values in 0-9
    pub fn from_values(values: [u8; TUBE_COUNT]) -> Result<Self, DigitError> {
        let mut digits = [Digit::BLANK; TUBE_COUNT];
        for (slot, &value) in digits.iter_mut().zip(values.iter()) {
            *slot = Digit::new(value)?;
        }
        Ok(Self(digits))
    }

    /// Create from the raw form, `-1` meaning blank
    pub fn from_raw(raw: [i8; TUBE_COUNT]) -> Result<Self, DigitError> {
        let mut digits = [Digit::BLANK; TUBE_COUNT];
        for (slot, &value) in digits.iter_mut().zip(raw.iter()) {
            *slot = Digit::from_raw(value)?;
        }
        Ok(Self(digits))
    }

    /// HH MM SS in 24-hour form
    pub fn from_time(hour: u8, minute: u8, second: u8) -> Result<Self, DigitError> {
        Self::from_time_with(TimeFormat::TwentyFourHour, hour, minute, second)
    }

    /// HH MM SS in the given format
    ///
    /// `hour` is always 0-23; the 12-hour face maps 0 to 12 and blanks the
    /// tens tube for single-digit hours.
    pub fn from_time_with(
        format: TimeFormat,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, DigitError> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(DigitError::TimeOutOfRange);
        }

        let (hour_tens, hour_units) = match format {
            TimeFormat::TwentyFourHour => (Digit::units(hour / 10), Digit::units(hour)),
            TimeFormat::TwelveHour => {
                let h12 = match hour % 12 {
                    0 => 12,
                    h => h,
                };
                let tens = if h12 >= 10 {
                    Digit::units(h12 / 10)
                } else {
                    Digit::BLANK
                };
                (tens, Digit::units(h12))
            }
        };

        Ok(Self([
            hour_tens,
            hour_units,
            Digit::units(minute / 10),
            Digit::units(minute),
            Digit::units(second / 10),
            Digit::units(second),
        ]))
    }

    /// A single digit at one position, every other tube blank
    ///
    /// `index` is 0-based (0 = position 1). Out-of-range indexes give an
    /// all-blank set.
    pub fn single(index: usize, digit: Digit) -> Self {
        let mut digits = [Digit::BLANK; TUBE_COUNT];
        if let Some(slot) = digits.get_mut(index) {
            *slot = digit;
        }
        Self(digits)
    }

    /// Digit at a 0-based index
    pub fn get(&self, index: usize) -> Option<Digit> {
        self.0.get(index).copied()
    }

    /// Iterate digits left to right
    pub fn iter(&self) -> impl Iterator<Item = Digit> + '_ {
        self.0.iter().copied()
    }

    /// Digits as an array
    pub const fn as_array(&self) -> &[Digit; TUBE_COUNT] {
        &self.0
    }

    /// Raw form, `-1` for blank tubes
    pub fn to_raw(&self) -> [i8; TUBE_COUNT] {
        let mut raw = [RAW_BLANK; TUBE_COUNT];
        for (slot, digit) in raw.iter_mut().zip(self.0.iter()) {
            if let Some(value) = digit.value() {
                *slot = value as i8;
            }
        }
        raw
    }
}

impl From<[Digit; TUBE_COUNT]> for DigitSet {
    fn from(digits: [Digit; TUBE_COUNT]) -> Self {
        Self(digits)
    }
}
