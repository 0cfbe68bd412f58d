//! Digits and tube frames
//!
//! A [`DigitSet`] is what the clock wants to show; a [`TubeFrame`] is the
//! exact bit pattern the shift-register chain must receive to show it.

pub mod digit;
pub mod encoder;
pub mod variant;

pub use digit::{Digit, DigitError, DigitSet, TimeFormat, TUBE_COUNT};
pub use encoder::{
    cathode_bit, field_mask, FrameEncoder, Polarity, TubeFrame, DATA_MASK, FIELD_WIDTH,
    FRAME_BYTES, PADDING_MASK,
};
pub use variant::ProtocolVariant;
