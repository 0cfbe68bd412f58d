//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the transport traits
//! defined in nixie-core, built on the bus traits from nixie-hal:
//!
//! - Tube driver chain (shift registers over SPI, latch and HV gate pins)
//! - RTC chips of the DS1307/DS3231 family over I2C

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod rtc;
pub mod tube;
