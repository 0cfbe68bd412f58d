//! Calendar time samples

use chrono::{NaiveDate, NaiveDateTime};

use crate::frame::{DigitError, DigitSet, TimeFormat};

/// Century the two-digit year counts from
const CENTURY_BASE: i32 = 2000;

/// Fields of a clock sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    Second,
    Minute,
    Hour,
    Weekday,
    Day,
    Month,
    Year,
}

/// A wall-clock reading, no timezone
///
/// Valid ranges: second/minute 0-59, hour 0-23, weekday 0-6,
/// day 1-31, month 1-12, year 0-99 (within the century).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockSample {
    pub second: u8,
    pub minute: u8,
    pub hour: u8,
    pub weekday: u8,
    pub day: u8,
    pub month: u8,
    pub year: u8,
}

impl ClockSample {
    /// First field that is out of range, if any
    pub fn invalid_field(&self) -> Option<Field> {
        if self.second > 59 {
            Some(Field::Second)
        } else if self.minute > 59 {
            Some(Field::Minute)
        } else if self.hour > 23 {
            Some(Field::Hour)
        } else if self.weekday > 6 {
            Some(Field::Weekday)
        } else if !(1..=31).contains(&self.day) {
            Some(Field::Day)
        } else if !(1..=12).contains(&self.month) {
            Some(Field::Month)
        } else if self.year > 99 {
            Some(Field::Year)
        } else {
            None
        }
    }

    /// Check if every field is in range
    pub fn is_valid(&self) -> bool {
        self.invalid_field().is_none()
    }

    /// Seconds since midnight
    pub fn seconds_of_day(&self) -> u32 {
        self.hour as u32 * 3600 + self.minute as u32 * 60 + self.second as u32
    }

    /// Calendar date and time, or the first field that cannot form one
    ///
    /// A day past the end of its month (Feb 30, Apr 31) is reported as
    /// [`Field::Day`].
    pub fn to_datetime(&self) -> Result<NaiveDateTime, Field> {
        if let Some(field) = self.invalid_field() {
            return Err(field);
        }

        NaiveDate::from_ymd_opt(
            CENTURY_BASE + self.year as i32,
            self.month as u32,
            self.day as u32,
        )
        .ok_or(Field::Day)?
        .and_hms_opt(self.hour as u32, self.minute as u32, self.second as u32)
        .ok_or(Field::Second)
    }

    /// Seconds since 2000-01-01 00:00:00
    ///
    /// Monotonic across midnight and month ends, so interval timing can use
    /// plain subtraction.
    pub fn seconds_since_2000(&self) -> Result<u32, Field> {
        let epoch = NaiveDate::from_ymd_opt(CENTURY_BASE, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or(Field::Year)?;
        let seconds = self.to_datetime()?.signed_duration_since(epoch).num_seconds();
        u32::try_from(seconds).map_err(|_| Field::Year)
    }

    /// Time of day as tube digits
    pub fn digits(&self, format: TimeFormat) -> Result<DigitSet, DigitError> {
        DigitSet::from_time_with(format, self.hour, self.minute, self.second)
    }
}
