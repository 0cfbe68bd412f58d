//! Real-time clock
//!
//! Register codec, calendar samples and the chip wrapper that ties the
//! codec to a [`crate::traits::ClockTransport`].

mod clock;
mod codec;
mod sample;

pub use clock::{Rtc, RtcError};
pub use codec::{regs, ClockCodec, CodecError, HourMode};
pub use sample::{ClockSample, Field};
