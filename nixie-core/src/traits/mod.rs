//! Hardware abstraction traits
//!
//! These traits define the interface between the display/clock logic
//! and hardware-specific implementations.

pub mod clock;
pub mod display;

pub use clock::{ClockTransport, CLOCK_REGISTER_COUNT, CLOCK_REGISTER_START};
pub use display::{DisplayTransport, TransportError};
