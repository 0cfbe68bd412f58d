//! Shift-register tube driver chain
//!
//! Eight cascaded 8-bit shift registers drive the 60 cathodes. A frame goes
//! out as eight SPI bytes, byte 0 first, each least significant bit first.
//! On latched boards a strobe on the latch line then copies the shifted
//! bits to the outputs; on legacy boards the outputs follow the shift
//! register directly and the latch line is left alone.

use nixie_core::frame::{ProtocolVariant, TubeFrame};
use nixie_core::traits::{DisplayTransport, TransportError};
use nixie_hal::spi::{reverse_bits_in_place, BitOrder};
use nixie_hal::{OutputPin, SpiBus};
#[cfg(feature = "defmt")]
use nixie_hal::BusError;

use super::hv::HvGate;
use crate::bus::transport_error;

/// Tube driver chain on SPI with latch and high-voltage lines
pub struct ShiftRegisterChain<S, L, H> {
    spi: S,
    /// Order the SPI peripheral shifts bits in
    bus_order: BitOrder,
    latch: L,
    hv: HvGate<H>,
    variant: ProtocolVariant,
}

impl<S, L, H> ShiftRegisterChain<S, L, H>
where
    S: SpiBus,
    L: OutputPin,
    H: OutputPin,
{
    /// Create a chain driver
    ///
    /// `bus_order` is what the SPI peripheral is configured for. Peripherals
    /// that can only shift MSB first get each byte mirrored before the
    /// write. The latch line is parked low.
    pub fn new(
        spi: S,
        bus_order: BitOrder,
        mut latch: L,
        hv: HvGate<H>,
        variant: ProtocolVariant,
    ) -> Self {
        latch.set_low();
        Self {
            spi,
            bus_order,
            latch,
            hv,
            variant,
        }
    }

    pub fn variant(&self) -> ProtocolVariant {
        self.variant
    }

    /// Release the bus and pins
    pub fn release(self) -> (S, L, HvGate<H>) {
        (self.spi, self.latch, self.hv)
    }
}

impl<S, L, H> DisplayTransport for ShiftRegisterChain<S, L, H>
where
    S: SpiBus,
    L: OutputPin,
    H: OutputPin,
{
    fn transmit(&mut self, frame: &TubeFrame) -> Result<(), TransportError> {
        let mut bytes = frame.to_bytes();
        if self.bus_order == BitOrder::MsbFirst {
            reverse_bits_in_place(&mut bytes);
        }

        self.spi.write(&bytes).map_err(|e| {
            #[cfg(feature = "defmt")]
            defmt::trace!("Tube chain write failed: {}", e.kind());
            transport_error(e)
        })
    }

    fn latch(&mut self) {
        if self.variant.requires_latch() {
            self.latch.pulse_high();
        }
    }

    fn set_high_voltage(&mut self, enabled: bool) {
        self.hv.set_enabled(enabled);
    }

    fn high_voltage_enabled(&self) -> bool {
        self.hv.is_enabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tube::hv::tests::MockPin;
    use heapless::Vec;
    use nixie_core::display::TubeDisplay;
    use nixie_core::frame::DigitSet;
    use nixie_hal::BusErrorKind;

    /// Mock SPI bus capturing written bytes
    #[derive(Default)]
    struct MockSpi {
        written: Vec<u8, 64>,
        fail: Option<BusErrorKind>,
    }

    impl SpiBus for MockSpi {
        type Error = BusErrorKind;

        fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            if let Some(e) = self.fail {
                return Err(e);
            }
            self.written
                .extend_from_slice(data)
                .map_err(|_| BusErrorKind::Overrun)
        }
    }

    fn chain(
        bus_order: BitOrder,
        variant: ProtocolVariant,
    ) -> ShiftRegisterChain<MockSpi, MockPin, MockPin> {
        ShiftRegisterChain::new(
            MockSpi::default(),
            bus_order,
            MockPin::default(),
            HvGate::new_shutdown(MockPin::default()),
            variant,
        )
    }

    #[test]
    fn test_lsb_first_bus_sends_frame_bytes() {
        let mut chain = chain(BitOrder::LsbFirst, ProtocolVariant::LatchedActiveHigh);
        let frame = TubeFrame::from_bits(0x8000_0000_0000_0004);

        chain.transmit(&frame).unwrap();
        assert_eq!(&chain.spi.written[..], &[0x04, 0, 0, 0, 0, 0, 0, 0x80]);
    }

    #[test]
    fn test_msb_first_bus_mirrors_bytes() {
        let mut chain = chain(BitOrder::MsbFirst, ProtocolVariant::LatchedActiveHigh);
        let frame = TubeFrame::from_bits(0x8000_0000_0000_0004);

        chain.transmit(&frame).unwrap();
        assert_eq!(&chain.spi.written[..], &[0x20, 0, 0, 0, 0, 0, 0, 0x01]);
    }

    #[test]
    fn test_latch_only_on_latched_boards() {
        let mut latched = chain(BitOrder::LsbFirst, ProtocolVariant::LatchedActiveHigh);
        latched.latch();
        latched.latch();
        assert_eq!(latched.latch.rising_edges, 2);
        assert!(latched.latch.is_set_low());

        let mut legacy = chain(BitOrder::LsbFirst, ProtocolVariant::LegacyActiveLow);
        legacy.latch();
        assert_eq!(legacy.latch.rising_edges, 0);
    }

    #[test]
    fn test_bus_error_mapped() {
        let mut chain = chain(BitOrder::LsbFirst, ProtocolVariant::LegacyActiveLow);
        chain.spi.fail = Some(BusErrorKind::Timeout);

        assert_eq!(
            chain.transmit(&TubeFrame::from_bits(0)),
            Err(TransportError::Timeout)
        );
    }

    #[test]
    fn test_high_voltage_leaves_frames_alone() {
        let mut chain = chain(BitOrder::LsbFirst, ProtocolVariant::LegacyActiveLow);
        assert!(!chain.high_voltage_enabled());

        chain.set_high_voltage(true);
        assert!(chain.high_voltage_enabled());
        assert!(chain.spi.written.is_empty());

        let (_, _, hv) = chain.release();
        assert!(hv.pin().is_set_low());
    }

    #[test]
    fn test_display_on_legacy_chain() {
        let chain = chain(BitOrder::LsbFirst, ProtocolVariant::LegacyActiveLow);
        let mut display = TubeDisplay::new(chain, ProtocolVariant::LegacyActiveLow);

        display
            .show(&DigitSet::from_values([1, 2, 3, 4, 5, 6]).unwrap())
            .unwrap();

        let written = &display.transport().spi.written;
        assert_eq!(written.len(), 8);
        // Padding bits 0-1 are zero, everything but the lit cathodes is set
        assert_eq!(written[0] & 0b11, 0);
        let bits = TubeFrame::from_bytes([
            written[0], written[1], written[2], written[3], written[4], written[5], written[6],
            written[7],
        ])
        .bits();
        assert_eq!(bits.count_ones(), 60 - 6);
    }
}
