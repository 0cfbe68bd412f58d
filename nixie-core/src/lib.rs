//! Board-agnostic core logic for the Nixie clock firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Digit model and the 64-bit tube frame encoder
//! - Real-time-clock register codec
//! - Display scheduler (boot scan, time display, cathode-poisoning sweep)
//! - Transport contracts for the tube chain and the RTC chip
//! - Configuration type definitions and the embedded config parser

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod display;
pub mod frame;
pub mod rtc;
pub mod scheduler;
pub mod traits;
