//! Configuration type definitions
//!
//! These types represent the clock configuration. The firmware builds them
//! from the compiled-in `clock.toml`; anything not given there falls back to
//! the defaults below.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::frame::{ProtocolVariant, TimeFormat};
use crate::rtc::HourMode;

/// Seconds between the start of one cathode sweep and the next
pub const DEFAULT_SWEEP_INTERVAL_S: u32 = 30;

/// Seconds a cathode sweep lasts
pub const DEFAULT_SWEEP_DURATION_S: u32 = 10;

/// Ticks between sweep cursor steps
pub const DEFAULT_ADVANCE_TICKS: u32 = 1;

/// Display tick period
pub const TICK_INTERVAL_MS: u64 = 10;

/// RTC poll period
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 100;

/// Longest RTC poll period; slower polls skip displayed seconds
pub const MAX_POLL_INTERVAL_MS: u32 = 1000;

/// Tube chain SPI clock
pub const DEFAULT_SPI_FREQUENCY_HZ: u32 = 1_000_000;

/// Fastest clock the shift-register chain runs reliably at
pub const MAX_SPI_FREQUENCY_HZ: u32 = 1_000_000;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Sweep duration is zero
    ZeroDuration,
    /// Sweep interval is not longer than the sweep duration
    IntervalTooShort,
    /// Cursor advance rate is zero
    ZeroAdvance,
    /// RTC poll interval is zero or above [`MAX_POLL_INTERVAL_MS`]
    PollIntervalOutOfRange,
    /// SPI frequency is zero or above [`MAX_SPI_FREQUENCY_HZ`]
    FrequencyOutOfRange,
}

/// Cathode-poisoning sweep timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SweepConfig {
    /// Seconds between sweep starts
    pub interval_s: u32,
    /// Seconds each sweep lasts
    pub duration_s: u32,
    /// Display ticks per cursor step
    pub advance_ticks: u32,
}

impl SweepConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.duration_s == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if self.interval_s <= self.duration_s {
            return Err(ConfigError::IntervalTooShort);
        }
        if self.advance_ticks == 0 {
            return Err(ConfigError::ZeroAdvance);
        }
        Ok(())
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval_s: DEFAULT_SWEEP_INTERVAL_S,
            duration_s: DEFAULT_SWEEP_DURATION_S,
            advance_ticks: DEFAULT_ADVANCE_TICKS,
        }
    }
}

/// RTC and time presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockConfig {
    /// Hour format written to the chip
    pub hour_mode: HourMode,
    /// Hour format shown on the tubes
    pub time_format: TimeFormat,
    /// Milliseconds between RTC reads
    pub poll_interval_ms: u32,
}

impl ClockConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_POLL_INTERVAL_MS).contains(&self.poll_interval_ms) {
            return Err(ConfigError::PollIntervalOutOfRange);
        }
        Ok(())
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            hour_mode: HourMode::TwentyFourHour,
            time_format: TimeFormat::TwentyFourHour,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

/// Tube driver board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Board revision
    pub variant: ProtocolVariant,
    /// SPI clock for the shift-register chain
    pub spi_frequency_hz: u32,
    /// Switch the high voltage on once the first frame is out
    pub high_voltage_on_boot: bool,
}

impl DisplayConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_SPI_FREQUENCY_HZ).contains(&self.spi_frequency_hz) {
            return Err(ConfigError::FrequencyOutOfRange);
        }
        Ok(())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            variant: ProtocolVariant::LegacyActiveLow,
            spi_frequency_hz: DEFAULT_SPI_FREQUENCY_HZ,
            high_voltage_on_boot: true,
        }
    }
}

/// Complete clock configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NixieConfig {
    pub sweep: SweepConfig,
    pub clock: ClockConfig,
    pub display: DisplayConfig,
}

impl NixieConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sweep.validate()?;
        self.clock.validate()?;
        self.display.validate()
    }
}
