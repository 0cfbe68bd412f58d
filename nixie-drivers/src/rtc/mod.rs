//! RTC chip drivers

pub mod ds3231;

pub use ds3231::{Ds3231, DS3231_ADDRESS};
