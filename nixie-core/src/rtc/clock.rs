//! Real-time clock access

use super::codec::{ClockCodec, CodecError};
use super::sample::ClockSample;
use crate::traits::{ClockTransport, TransportError};

/// Errors from reading or setting the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcError {
    /// Register transfer failed
    Transport(TransportError),
    /// Registers held, or the caller passed, an invalid time
    Codec(CodecError),
}

impl From<TransportError> for RtcError {
    fn from(e: TransportError) -> Self {
        RtcError::Transport(e)
    }
}

impl From<CodecError> for RtcError {
    fn from(e: CodecError) -> Self {
        RtcError::Codec(e)
    }
}

/// A clock chip behind a register transport
pub struct Rtc<T: ClockTransport> {
    transport: T,
    codec: ClockCodec,
}

impl<T: ClockTransport> Rtc<T> {
    pub fn new(transport: T, codec: ClockCodec) -> Self {
        Self { transport, codec }
    }

    /// Read the current time
    pub fn sync(&mut self) -> Result<ClockSample, RtcError> {
        let raw = self.transport.read_clock()?;
        Ok(self.codec.decode(&raw)?)
    }

    /// Set the chip's time
    ///
    /// The sample is validated before anything is written.
    pub fn set_clock(&mut self, sample: &ClockSample) -> Result<(), RtcError> {
        let raw = self.codec.encode(sample)?;
        self.transport.write_clock(&raw)?;
        Ok(())
    }

    pub fn codec(&self) -> &ClockCodec {
        &self.codec
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Release the transport
    pub fn into_inner(self) -> T {
        self.transport
    }
}
