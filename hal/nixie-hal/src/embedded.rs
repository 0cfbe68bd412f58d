//! Adapters from `embedded-hal` 1.0 peripherals
//!
//! Chip HALs (embassy-rp, esp-hal, rp2040-hal, ...) already implement the
//! `embedded-hal` traits. Wrapping a peripheral in one of these newtypes
//! makes it usable wherever the drivers expect a `nixie-hal` trait.

use core::convert::Infallible;

use embedded_hal::digital;
use embedded_hal::i2c::{self, Error as _};
use embedded_hal::spi::{self, Error as _};

use crate::error::BusErrorKind;
use crate::gpio::OutputPin;
use crate::i2c::I2cBus;
use crate::spi::SpiBus;

/// Output pin backed by an infallible `embedded-hal` output
///
/// `embedded-hal` only exposes the set level through `&mut self`, so the
/// commanded level is mirrored here.
pub struct EhOutput<P> {
    pin: P,
    high: bool,
}

impl<P> EhOutput<P>
where
    P: digital::OutputPin<Error = Infallible>,
{
    /// Wrap a pin, driving it to `initial_high`
    pub fn new(pin: P, initial_high: bool) -> Self {
        let mut out = Self {
            pin,
            high: !initial_high,
        };
        out.set_state(initial_high);
        out
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P> OutputPin for EhOutput<P>
where
    P: digital::OutputPin<Error = Infallible>,
{
    fn set_high(&mut self) {
        match self.pin.set_high() {
            Ok(()) => self.high = true,
            Err(never) => match never {},
        }
    }

    fn set_low(&mut self) {
        match self.pin.set_low() {
            Ok(()) => self.high = false,
            Err(never) => match never {},
        }
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// SPI bus backed by an `embedded-hal` SPI bus
pub struct EhSpi<S> {
    spi: S,
}

impl<S: spi::SpiBus<u8>> EhSpi<S> {
    /// Wrap an SPI bus
    pub fn new(spi: S) -> Self {
        Self { spi }
    }
}

impl From<spi::ErrorKind> for BusErrorKind {
    fn from(kind: spi::ErrorKind) -> Self {
        match kind {
            spi::ErrorKind::Overrun => BusErrorKind::Overrun,
            spi::ErrorKind::ModeFault => BusErrorKind::Bus,
            _ => BusErrorKind::Other,
        }
    }
}

impl<S: spi::SpiBus<u8>> SpiBus for EhSpi<S> {
    type Error = BusErrorKind;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.spi.write(data).map_err(|e| e.kind())?;
        // Every byte must be out before the caller latches
        self.spi.flush().map_err(|e| e.kind().into())
    }
}

/// I2C bus backed by an `embedded-hal` I2C master
pub struct EhI2c<I> {
    i2c: I,
}

impl<I: i2c::I2c> EhI2c<I> {
    /// Wrap an I2C master
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }
}

impl From<i2c::ErrorKind> for BusErrorKind {
    fn from(kind: i2c::ErrorKind) -> Self {
        match kind {
            i2c::ErrorKind::Bus => BusErrorKind::Bus,
            i2c::ErrorKind::ArbitrationLoss => BusErrorKind::ArbitrationLost,
            i2c::ErrorKind::NoAcknowledge(_) => BusErrorKind::Nack,
            i2c::ErrorKind::Overrun => BusErrorKind::Overrun,
            _ => BusErrorKind::Other,
        }
    }
}

impl<I: i2c::I2c> I2cBus for EhI2c<I> {
    type Error = BusErrorKind;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(address, data).map_err(|e| e.kind().into())
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c
            .write_read(address, write_data, read_buf)
            .map_err(|e| e.kind().into())
    }
}
