//! GPIO abstractions
//!
//! Three kinds of pin appear on a node: push-pull outputs (display lines,
//! status LED), plain inputs (GRANTED on the demander) and pins that flip
//! between input and output at runtime (the handshake lines).

/// Push-pull output
pub trait OutputPin {
    /// Drive high
    fn set_high(&mut self);

    /// Drive low
    fn set_low(&mut self);

    /// Drive `high`
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Level last written
    fn is_set_high(&self) -> bool;

    /// Level last written, inverted
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input
pub trait InputPin {
    /// Sample the pin; true when it reads high
    fn is_high(&self) -> bool;

    /// Sample the pin; true when it reads low
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Pin direction and pull configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Actively driven to the output latch level
    Output,
    /// High impedance, no pull resistor
    Input,
    /// High impedance with the internal pull-up enabled
    InputPullUp,
}

impl PinMode {
    /// Check if this mode actively drives the pin
    pub fn is_driven(&self) -> bool {
        matches!(self, PinMode::Output)
    }

    /// Check if the internal pull-up should be on in this mode
    ///
    /// Off while driven, so an asserted low line does not sink current
    /// through the pull-up left over from a released state.
    pub fn pull_up(&self) -> bool {
        matches!(self, PinMode::InputPullUp)
    }
}

/// Pin whose direction can be switched at runtime
///
/// The output latch and the direction are separate pieces of state, as on
/// every common MCU: writing a level while the pin is an input only
/// changes what the pin will drive once it becomes an output.
pub trait FlexPin {
    /// Change direction and pull configuration
    fn set_mode(&mut self, mode: PinMode);

    /// Set the output latch high
    fn set_high(&mut self);

    /// Set the output latch low
    fn set_low(&mut self);

    /// Sample the pin level
    fn is_high(&self) -> bool;

    /// Sample the pin level
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_drops_pull_up() {
        assert!(PinMode::Output.is_driven());
        assert!(!PinMode::Output.pull_up());
    }

    #[test]
    fn test_input_modes() {
        assert!(!PinMode::Input.is_driven());
        assert!(!PinMode::Input.pull_up());
        assert!(!PinMode::InputPullUp.is_driven());
        assert!(PinMode::InputPullUp.pull_up());
    }
}
