//! GPIO pin abstractions
//!
//! Output pins are treated as infallible: every MCU the clock targets drives
//! push-pull outputs through a register write that cannot fail.

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }

    /// Drive a high-then-low strobe
    fn pulse_high(&mut self) {
        self.set_high();
        self.set_low();
    }
}
