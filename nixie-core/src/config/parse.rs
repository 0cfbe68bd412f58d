//! Minimal TOML parser for the clock configuration
//!
//! Handles only the subset `clock.toml` uses. It does NOT support the full
//! TOML spec.
//!
//! Supported:
//! - `[sweep]`, `[clock]` and `[display]` section headers
//! - Key = value pairs (string, integer, boolean)
//! - Comments (# ...), including after a value
//!
//! Keys outside a section are rejected. Missing keys keep their defaults.

use super::types::{ConfigError, NixieConfig};
use crate::frame::{ProtocolVariant, TimeFormat};
use crate::rtc::HourMode;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not known in its section
    UnknownKey,
    /// Line is not a `key = value` pair
    InvalidLine,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Parsed configuration does not validate
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Sweep,
    Clock,
    Display,
}

/// Parse TOML text into a validated configuration
pub fn parse_config(input: &str) -> Result<NixieConfig, ParseError> {
    let mut config = NixieConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        match section {
            Section::Root => return Err(ParseError::UnknownKey),
            Section::Sweep => apply_sweep_key(&mut config, key, value)?,
            Section::Clock => apply_clock_key(&mut config, key, value)?,
            Section::Display => apply_display_key(&mut config, key, value)?,
        }
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let name = line
        .strip_prefix('[')
        .and_then(|rest| rest.split('#').next())
        .map(str::trim)
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection)?;

    match name.trim() {
        "sweep" => Ok(Section::Sweep),
        "clock" => Ok(Section::Clock),
        "display" => Ok(Section::Display),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_sweep_key(config: &mut NixieConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "interval_s" => config.sweep.interval_s = parse_int(value)?,
        "duration_s" => config.sweep.duration_s = parse_int(value)?,
        "advance_ticks" => config.sweep.advance_ticks = parse_int(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn apply_clock_key(config: &mut NixieConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "hour_mode" => {
            config.clock.hour_mode = match parse_string(value)? {
                "24h" => HourMode::TwentyFourHour,
                "12h" => HourMode::TwelveHour,
                _ => return Err(ParseError::InvalidValue),
            }
        }
        "time_format" => {
            config.clock.time_format = match parse_string(value)? {
                "24h" => TimeFormat::TwentyFourHour,
                "12h" => TimeFormat::TwelveHour,
                _ => return Err(ParseError::InvalidValue),
            }
        }
        "poll_interval_ms" => config.clock.poll_interval_ms = parse_int(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn apply_display_key(config: &mut NixieConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "variant" => {
            config.display.variant =
                ProtocolVariant::from_name(parse_string(value)?).ok_or(ParseError::InvalidValue)?
        }
        "spi_frequency_hz" => config.display.spi_frequency_hz = parse_int(value)?,
        "high_voltage_on_boot" => config.display.high_voltage_on_boot = parse_bool(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

/// Split a `key = value` line, dropping any trailing comment
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    let value = match value.find('#') {
        // Only a comment if the # is outside a string
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        Ok(&value[1..value.len() - 1])
    } else {
        Err(ParseError::InvalidValue)
    }
}

/// Parse an integer value, allowing `_` separators
fn parse_int(value: &str) -> Result<u32, ParseError> {
    let mut result: u32 = 0;
    let mut seen_digit = false;
    for c in value.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(10).ok_or(ParseError::InvalidValue)?;
        result = result
            .checked_mul(10)
            .and_then(|r| r.checked_add(digit))
            .ok_or(ParseError::InvalidValue)?;
        seen_digit = true;
    }
    if seen_digit {
        Ok(result)
    } else {
        Err(ParseError::InvalidValue)
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}
