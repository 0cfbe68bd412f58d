//! Driver board revisions
//!
//! Two board revisions exist. Both use the same 64-bit field layout; they
//! differ in output polarity and in whether the chain needs a latch strobe
//! before new data reaches the tubes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::encoder::{FrameEncoder, Polarity};

/// Wire protocol of a driver board revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProtocolVariant {
    /// First revision: active-low outputs, transparent latch
    #[default]
    LegacyActiveLow,
    /// Second revision: active-high outputs, explicit latch strobe
    LatchedActiveHigh,
}

impl ProtocolVariant {
    /// Output polarity of this revision
    pub const fn polarity(self) -> Polarity {
        match self {
            ProtocolVariant::LegacyActiveLow => Polarity::ActiveLow,
            ProtocolVariant::LatchedActiveHigh => Polarity::ActiveHigh,
        }
    }

    /// Check if a latch pulse is needed to show a transmitted frame
    pub const fn requires_latch(self) -> bool {
        matches!(self, ProtocolVariant::LatchedActiveHigh)
    }

    /// Frame encoder for this revision
    pub const fn encoder(self) -> FrameEncoder {
        FrameEncoder::new(self.polarity())
    }

    /// Parse the config-file name of a variant
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "legacy" => Some(ProtocolVariant::LegacyActiveLow),
            "latched" => Some(ProtocolVariant::LatchedActiveHigh),
            _ => None,
        }
    }
}
