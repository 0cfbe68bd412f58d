//! Bus error classification
//!
//! Chip HALs report their own error types. Drivers only need to know what
//! kind of failure happened, so every bus error is reduced to a
//! [`BusErrorKind`].

/// Coarse classification of a bus failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusErrorKind {
    /// Bus error (misplaced start/stop, mode fault)
    Bus,
    /// Arbitration lost to another master
    ArbitrationLost,
    /// Address or data byte not acknowledged
    Nack,
    /// Transaction did not finish within the HAL deadline
    Timeout,
    /// Receive overrun
    Overrun,
    /// Anything the HAL could not classify
    Other,
}

/// Error type returned by bus implementations
pub trait BusError: core::fmt::Debug {
    /// Classify this error
    fn kind(&self) -> BusErrorKind;
}

impl BusError for BusErrorKind {
    fn kind(&self) -> BusErrorKind {
        *self
    }
}

impl BusError for core::convert::Infallible {
    fn kind(&self) -> BusErrorKind {
        match *self {}
    }
}
