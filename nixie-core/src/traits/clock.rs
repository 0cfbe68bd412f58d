//! RTC chip transport trait

use super::display::TransportError;

/// Number of time-keeping registers
pub const CLOCK_REGISTER_COUNT: usize = 7;

/// First time-keeping register
pub const CLOCK_REGISTER_START: u8 = 0x00;

/// Trait for raw register access to the clock chip
///
/// Implementations address the chip and move bytes; all format logic lives
/// in [`crate::rtc::ClockCodec`].
pub trait ClockTransport {
    /// Read consecutive registers starting at `start`
    fn read_registers(&mut self, start: u8, buf: &mut [u8]) -> Result<(), TransportError>;

    /// Write consecutive registers starting at `start`
    fn write_registers(&mut self, start: u8, data: &[u8]) -> Result<(), TransportError>;

    /// Read the seven time-keeping registers in one burst
    fn read_clock(&mut self) -> Result<[u8; CLOCK_REGISTER_COUNT], TransportError> {
        let mut raw = [0u8; CLOCK_REGISTER_COUNT];
        self.read_registers(CLOCK_REGISTER_START, &mut raw)?;
        Ok(raw)
    }

    /// Write the seven time-keeping registers in one burst
    fn write_clock(&mut self, raw: &[u8; CLOCK_REGISTER_COUNT]) -> Result<(), TransportError> {
        self.write_registers(CLOCK_REGISTER_START, raw)
    }
}
