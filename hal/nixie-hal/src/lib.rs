//! Nixie Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the clock needs:
//! push-pull outputs for the latch and high-voltage gate, an SPI master for
//! the shift-register chain and an I2C master for the RTC chip.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  nixie-drivers (tube chain, RTC)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nixie-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  embedded-hal 1.0 peripherals           │
//! │  (embassy-rp, esp-hal, ...)             │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output
//! - [`spi::SpiBus`] - SPI bus operations
//! - [`i2c::I2cBus`] - I2C bus operations
//!
//! [`embedded`] wraps any `embedded-hal` 1.0 peripheral so it can be handed
//! to the drivers.

#![no_std]
#![deny(unsafe_code)]

pub mod embedded;
pub mod error;
pub mod gpio;
pub mod i2c;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use error::{BusError, BusErrorKind};
pub use gpio::OutputPin;
pub use i2c::I2cBus;
pub use spi::SpiBus;
