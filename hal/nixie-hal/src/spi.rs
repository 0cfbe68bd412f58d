//! SPI bus abstractions
//!
//! Provides the write-only SPI master operations needed to clock data into
//! a shift-register chain.

use crate::error::BusError;

/// SPI bus master
pub trait SpiBus {
    /// Error type for SPI operations
    type Error: BusError;

    /// Write data without reading
    ///
    /// Must not return until every byte has left the shift register, so the
    /// caller can strobe a latch line right afterwards.
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

/// Bit order on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    /// Most significant bit of each byte first
    MsbFirst,
    /// Least significant bit of each byte first
    LsbFirst,
}

/// SPI configuration
///
/// Wire bit order is left to the driver, which knows what the bus can shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity
    pub polarity: Polarity,
    /// Clock phase
    pub phase: Phase,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self::TUBE_CHAIN
    }
}

impl SpiConfig {
    /// Settings for the tube driver chain: mode 0 at 1 MHz
    ///
    /// 1 MHz is the highest clock the first board revision tolerates.
    pub const TUBE_CHAIN: Self = Self {
        frequency: 1_000_000,
        polarity: Polarity::IdleLow,
        phase: Phase::CaptureOnFirstTransition,
    };

    /// Same settings at another clock frequency
    pub const fn with_frequency(self, frequency: u32) -> Self {
        Self { frequency, ..self }
    }
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

/// Reverse the bit order of every byte in place
///
/// For SPI peripherals that only shift MSB first: reversing each byte
/// before a MSB-first write puts the same bits on the wire as a LSB-first
/// write of the original bytes.
pub fn reverse_bits_in_place(data: &mut [u8]) {
    for byte in data.iter_mut() {
        *byte = byte.reverse_bits();
    }
}
