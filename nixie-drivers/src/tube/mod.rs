//! Tube driver chain

pub mod hv;
pub mod shift_register;

pub use hv::HvGate;
pub use shift_register::ShiftRegisterChain;
