//! GPIO adapters
//!
//! Wrap embassy-rp pins in the `handoff-hal` traits.

use embassy_rp::gpio::{AnyPin, Flex, Input, Level, Output, Pull};
use embassy_rp::Peri;
use handoff_hal::gpio::{FlexPin, InputPin, OutputPin, PinMode};

/// Pin whose direction changes at runtime (handshake lines)
pub struct RpFlex<'d>(Flex<'d>);

impl<'d> RpFlex<'d> {
    /// Wrap a pin; it starts as a plain input
    pub fn new(pin: Peri<'d, AnyPin>) -> Self {
        let mut flex = Flex::new(pin);
        flex.set_as_input();
        Self(flex)
    }
}

impl FlexPin for RpFlex<'_> {
    fn set_mode(&mut self, mode: PinMode) {
        let pull = if mode.pull_up() { Pull::Up } else { Pull::None };
        if mode.is_driven() {
            // Pull-up off before the pin starts sinking
            self.0.set_pull(pull);
            self.0.set_as_output();
        } else {
            self.0.set_as_input();
            self.0.set_pull(pull);
        }
    }

    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Push-pull output (display lines, LED)
pub struct RpOutput<'d>(Output<'d>);

impl<'d> RpOutput<'d> {
    /// Wrap a pin, driven low
    pub fn new(pin: Peri<'d, AnyPin>) -> Self {
        Self(Output::new(pin, Level::Low))
    }
}

impl OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Digital input (GRANTED on the demander)
pub struct RpInput<'d>(Input<'d>);

impl<'d> RpInput<'d> {
    /// Wrap a pin as an input
    pub fn new(pin: Peri<'d, AnyPin>, pull_up: bool) -> Self {
        let pull = if pull_up { Pull::Up } else { Pull::None };
        Self(Input::new(pin, pull))
    }
}

impl InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}
