//! High-voltage supply gate
//!
//! The tube boost converter has a single control line. On the boards
//! shipped so far it is a shutdown input (high = supply off).

use nixie_hal::OutputPin;

/// High-voltage supply control
pub struct HvGate<P> {
    pin: P,
    /// If true, supply ON = pin LOW
    inverted: bool,
    /// Current logical state (true = supply on)
    enabled: bool,
}

impl<P: OutputPin> HvGate<P> {
    /// Create a gate, with the supply off
    ///
    /// # Arguments
    /// - `pin`: The control line
    /// - `inverted`: If true, the supply is ON when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut gate = Self {
            pin,
            inverted,
            enabled: false,
        };
        gate.set_enabled(false);
        gate
    }

    /// Gate driven through a shutdown line (high = off)
    pub fn new_shutdown(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Gate driven through an enable line (high = on)
    pub fn new_enable(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Switch the supply; repeated calls with the same state are harmless
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.pin.set_state(enabled != self.inverted);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Mock GPIO pin counting rising edges
    #[derive(Debug, Default)]
    pub(crate) struct MockPin {
        pub high: bool,
        pub rising_edges: u32,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            if !self.high {
                self.rising_edges += 1;
            }
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_shutdown_line() {
        let mut gate = HvGate::new_shutdown(MockPin::default());

        // Off at start: shutdown asserted
        assert!(!gate.is_enabled());
        assert!(gate.pin().is_set_high());

        gate.set_enabled(true);
        assert!(gate.is_enabled());
        assert!(gate.pin().is_set_low());

        gate.set_enabled(false);
        assert!(gate.pin().is_set_high());
    }

    #[test]
    fn test_enable_line() {
        let mut gate = HvGate::new_enable(MockPin::default());
        assert!(gate.pin().is_set_low());

        gate.set_enabled(true);
        assert!(gate.pin().is_set_high());
    }

    #[test]
    fn test_idempotent() {
        let mut gate = HvGate::new_enable(MockPin::default());
        gate.set_enabled(true);
        gate.set_enabled(true);
        gate.set_enabled(true);
        assert!(gate.is_enabled());
        assert_eq!(gate.pin().rising_edges, 1);
    }
}
