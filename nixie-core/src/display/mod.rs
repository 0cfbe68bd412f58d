//! Tube display renderer
//!
//! Pairs a [`FrameEncoder`] with a [`DisplayTransport`]: every frame is
//! encoded, transmitted, then latched.

use crate::frame::{DigitSet, FrameEncoder, ProtocolVariant, TubeFrame};
use crate::traits::{DisplayTransport, TransportError};

/// Six-tube display on a shift-register chain
pub struct TubeDisplay<T: DisplayTransport> {
    transport: T,
    encoder: FrameEncoder,
    /// Last frame that went out successfully
    last_frame: Option<TubeFrame>,
}

impl<T: DisplayTransport> TubeDisplay<T> {
    /// Create a display for a board revision
    pub fn new(transport: T, variant: ProtocolVariant) -> Self {
        Self::with_encoder(transport, variant.encoder())
    }

    pub fn with_encoder(transport: T, encoder: FrameEncoder) -> Self {
        Self {
            transport,
            encoder,
            last_frame: None,
        }
    }

    /// Show digits on the tubes
    ///
    /// The latch is not pulsed when the transmit fails, so the tubes keep
    /// the previous frame.
    pub fn show(&mut self, digits: &DigitSet) -> Result<(), TransportError> {
        let frame = self.encoder.encode(digits);
        self.transport.transmit(&frame)?;
        self.transport.latch();
        self.last_frame = Some(frame);
        Ok(())
    }

    /// Turn every cathode off
    pub fn clear(&mut self) -> Result<(), TransportError> {
        self.show(&DigitSet::BLANK)
    }

    pub fn set_high_voltage(&mut self, enabled: bool) {
        self.transport.set_high_voltage(enabled);
    }

    pub fn high_voltage_enabled(&self) -> bool {
        self.transport.high_voltage_enabled()
    }

    /// Last frame that was transmitted and latched
    pub fn last_frame(&self) -> Option<TubeFrame> {
        self.last_frame
    }

    pub fn encoder(&self) -> &FrameEncoder {
        &self.encoder
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Polarity, DATA_MASK};
    use crate::scheduler::DisplayScheduler;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Transmit(u64),
        Latch,
    }

    /// Records transport calls, optionally failing transmits
    struct MockChain {
        calls: [Option<Call>; 8],
        len: usize,
        fail: bool,
        hv: bool,
    }

    impl MockChain {
        fn new() -> Self {
            Self {
                calls: [None; 8],
                len: 0,
                fail: false,
                hv: false,
            }
        }

        fn record(&mut self, call: Call) {
            if self.len < self.calls.len() {
                self.calls[self.len] = Some(call);
                self.len += 1;
            }
        }

        fn calls(&self) -> &[Option<Call>] {
            &self.calls[..self.len]
        }
    }

    impl DisplayTransport for MockChain {
        fn transmit(&mut self, frame: &TubeFrame) -> Result<(), TransportError> {
            if self.fail {
                return Err(TransportError::Bus);
            }
            self.record(Call::Transmit(frame.bits()));
            Ok(())
        }

        fn latch(&mut self) {
            self.record(Call::Latch);
        }

        fn set_high_voltage(&mut self, enabled: bool) {
            self.hv = enabled;
        }

        fn high_voltage_enabled(&self) -> bool {
            self.hv
        }
    }

    #[test]
    fn test_show_transmits_then_latches() {
        let mut display = TubeDisplay::new(MockChain::new(), ProtocolVariant::LatchedActiveHigh);
        let digits = DigitSet::from_values([1, 2, 3, 4, 5, 6]).unwrap();

        display.show(&digits).unwrap();

        let expected = FrameEncoder::new(Polarity::ActiveHigh).encode(&digits);
        assert_eq!(
            display.transport().calls(),
            &[Some(Call::Transmit(expected.bits())), Some(Call::Latch)]
        );
        assert_eq!(display.last_frame(), Some(expected));
    }

    #[test]
    fn test_clear_legacy() {
        let mut display = TubeDisplay::new(MockChain::new(), ProtocolVariant::LegacyActiveLow);
        display.clear().unwrap();
        assert_eq!(display.last_frame().unwrap().bits(), DATA_MASK);
    }

    #[test]
    fn test_failed_transmit_skips_latch() {
        let mut chain = MockChain::new();
        chain.fail = true;
        let mut display = TubeDisplay::new(chain, ProtocolVariant::LatchedActiveHigh);

        assert_eq!(display.show(&DigitSet::BLANK), Err(TransportError::Bus));
        assert!(display.transport().calls().is_empty());
        assert_eq!(display.last_frame(), None);
    }

    #[test]
    fn test_high_voltage_independent_of_frames() {
        let mut display = TubeDisplay::new(MockChain::new(), ProtocolVariant::LegacyActiveLow);
        assert!(!display.high_voltage_enabled());

        display.set_high_voltage(true);
        display.set_high_voltage(true);
        assert!(display.high_voltage_enabled());
        assert!(display.transport().calls().is_empty());

        display.set_high_voltage(false);
        assert!(!display.high_voltage_enabled());
    }

    #[test]
    fn test_transport_failure_leaves_scheduler_untouched() {
        let mut chain = MockChain::new();
        chain.fail = true;
        let mut display = TubeDisplay::new(chain, ProtocolVariant::LegacyActiveLow);

        let mut scheduler = DisplayScheduler::default();
        let mut reference = DisplayScheduler::default();
        for _ in 0..25 {
            let digits = scheduler.tick();
            assert!(display.show(&digits).is_err());
            reference.tick();
        }

        assert_eq!(scheduler.mode(), reference.mode());
        assert_eq!(scheduler.ticks(), reference.ticks());
    }
}
