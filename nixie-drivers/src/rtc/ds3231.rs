//! DS3231 / DS1307 real-time clock (I2C)
//!
//! Both chips share the 7-bit address 0x68 and the time-keeping register
//! layout at 0x00-0x06. Access is a register pointer write followed by a
//! burst read or write; the pointer auto-increments.
//!
//! # Bus transactions
//!
//! - Read: `S 0x68+W reg Sr 0x68+R data.. P`
//! - Write: `S 0x68+W reg data.. P`

use heapless::Vec;
use nixie_core::traits::{ClockTransport, TransportError};
use nixie_hal::I2cBus;

use crate::bus::transport_error;

/// 7-bit bus address
pub const DS3231_ADDRESS: u8 = 0x68;

/// Register addresses
pub mod reg {
    /// Seconds, first time-keeping register
    pub const SECONDS: u8 = 0x00;
    /// Year, last time-keeping register
    pub const YEAR: u8 = 0x06;
    /// Control register (DS3231)
    pub const CONTROL: u8 = 0x0E;
    /// Status register (DS3231)
    pub const STATUS: u8 = 0x0F;
    /// Last register of the DS3231 map
    pub const LAST: u8 = 0x12;
}

/// Largest burst write: the full DS3231 register map
const MAX_WRITE_LEN: usize = reg::LAST as usize + 1;

/// RTC chip on an I2C bus
pub struct Ds3231<I> {
    i2c: I,
    address: u8,
}

impl<I: I2cBus> Ds3231<I> {
    /// Create a driver at the default address
    pub fn new(i2c: I) -> Self {
        Self::with_address(i2c, DS3231_ADDRESS)
    }

    /// Create a driver at a non-default address
    pub fn with_address(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the bus
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2cBus> ClockTransport for Ds3231<I> {
    fn read_registers(&mut self, start: u8, buf: &mut [u8]) -> Result<(), TransportError> {
        self.i2c
            .write_read(self.address, &[start], buf)
            .map_err(transport_error)
    }

    fn write_registers(&mut self, start: u8, data: &[u8]) -> Result<(), TransportError> {
        let mut frame: Vec<u8, { MAX_WRITE_LEN + 1 }> = Vec::new();
        frame.push(start).map_err(|_| TransportError::Other)?;
        frame
            .extend_from_slice(data)
            .map_err(|_| TransportError::Other)?;

        self.i2c
            .write(self.address, &frame)
            .map_err(transport_error)
    }
}
