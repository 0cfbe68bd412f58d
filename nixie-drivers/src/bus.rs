//! Bus error mapping

use nixie_core::traits::TransportError;
use nixie_hal::{BusError, BusErrorKind};

/// Map a HAL bus error onto the transport error the core understands
pub fn transport_error<E: BusError>(error: E) -> TransportError {
    match error.kind() {
        BusErrorKind::Bus => TransportError::Bus,
        BusErrorKind::ArbitrationLost => TransportError::ArbitrationLost,
        BusErrorKind::Nack => TransportError::Nack,
        BusErrorKind::Timeout => TransportError::Timeout,
        BusErrorKind::Overrun => TransportError::Overrun,
        BusErrorKind::Other => TransportError::Other,
    }
}
