//! Status LED
//!
//! Lit while the node holds (demander) or gives (granter) the resource.
//! Boards differ in wiring: some drive the LED from the pin (active-high),
//! others sink it into the pin (active-low).

use handoff_hal::gpio::OutputPin;

/// Single status LED
pub struct StatusLed<P> {
    pin: P,
    /// If true, LED ON = pin LOW
    inverted: bool,
    /// Current logical state (true = lit)
    lit: bool,
}

impl<P: OutputPin> StatusLed<P> {
    /// Create a status LED, initially off
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin driving the LED
    /// - `inverted`: If true, the LED is lit when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut led = Self {
            pin,
            inverted,
            lit: false,
        };
        led.set(false);
        led
    }

    /// Create an LED wired pin-to-LED-to-ground
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create an LED wired supply-to-LED-to-pin
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Light or extinguish the LED
    pub fn set(&mut self, lit: bool) {
        self.lit = lit;
        self.pin.set_state(lit != self.inverted);
    }

    /// Flip the LED
    pub fn toggle(&mut self) {
        self.set(!self.lit);
    }

    /// Check if the LED is lit
    pub fn is_lit(&self) -> bool {
        self.lit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
    }

    impl MockPin {
        fn new() -> Self {
            // Start high so an initial write is observable on active-high
            Self { high: true }
        }
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
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
    fn test_active_high_led() {
        let mut led = StatusLed::new_active_high(MockPin::new());

        // Initially off
        assert!(!led.is_lit());
        assert!(led.pin.is_set_low());

        led.set(true);
        assert!(led.is_lit());
        assert!(led.pin.is_set_high());

        led.toggle();
        assert!(!led.is_lit());
        assert!(led.pin.is_set_low());
    }

    #[test]
    fn test_active_low_led() {
        let mut led = StatusLed::new_active_low(MockPin::new());

        // Initially off (pin is high for active-low)
        assert!(!led.is_lit());
        assert!(led.pin.is_set_high());

        // Lit (pin goes low for active-low)
        led.set(true);
        assert!(led.is_lit());
        assert!(led.pin.is_set_low());

        led.toggle();
        assert!(led.pin.is_set_high());
    }
}
