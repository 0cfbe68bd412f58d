//! Tube chain transport trait

use crate::frame::TubeFrame;

/// Errors reported by transports
///
/// Transports never retry; the caller decides what a failure means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Bus error
    Bus,
    /// Device did not acknowledge
    Nack,
    /// Transaction did not complete in time
    Timeout,
    /// Arbitration lost on a shared bus
    ArbitrationLost,
    /// Receive overrun
    Overrun,
    /// Unclassified failure
    Other,
}

/// Trait for the tube driver chain
///
/// The chain shifts a frame in, then a latch makes it drive the tubes.
/// A separate output gates the high-voltage supply.
pub trait DisplayTransport {
    /// Clock a frame out, byte 0 first, each byte LSB first
    ///
    /// Must not change what the tubes show on boards that latch; on boards
    /// with a transparent latch the frame shows as soon as it lands.
    fn transmit(&mut self, frame: &TubeFrame) -> Result<(), TransportError>;

    /// Make the last transmitted frame visible
    ///
    /// A no-op on boards without a strobe input.
    fn latch(&mut self);

    /// Enable or disable the high-voltage supply
    ///
    /// Idempotent; does not touch frame data.
    fn set_high_voltage(&mut self, enabled: bool);

    /// Check if the high-voltage supply is enabled
    fn high_voltage_enabled(&self) -> bool;
}
