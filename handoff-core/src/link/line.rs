//! Contention-safe line driving
//!
//! A handshake line is never driven high. Logic 1 is produced by turning
//! the pin into an input and letting the pull-up win; logic 0 is produced
//! by loading a low level into the output latch and only then switching
//! the pin to output. Doing it the other way round would briefly drive the
//! stale latch level onto the wire.

use handoff_hal::gpio::{FlexPin, PinMode};

/// One handshake line owned by the local node
pub struct SafeLine<P> {
    pin: P,
    /// Mode used when the line is released (never `Output`)
    release_mode: PinMode,
    asserted: bool,
}

impl<P: FlexPin> SafeLine<P> {
    /// Take ownership of a pin and release the line
    ///
    /// # Arguments
    /// - `pin`: The pin wired to the handshake line
    /// - `pull_up`: Use the internal pull-up while released. Boards with an
    ///   external pull-up on the line pass `false`.
    pub fn new(pin: P, pull_up: bool) -> Self {
        let release_mode = if pull_up {
            PinMode::InputPullUp
        } else {
            PinMode::Input
        };

        let mut line = Self {
            pin,
            release_mode,
            asserted: false,
        };
        line.release();
        line
    }

    /// Drive the line to logic 0
    pub fn assert_low(&mut self) {
        self.pin.set_low();
        self.pin.set_mode(PinMode::Output);
        self.asserted = true;
    }

    /// Let the line return to logic 1
    ///
    /// Only the direction changes; the output latch is left alone.
    pub fn release(&mut self) {
        self.pin.set_mode(self.release_mode);
        self.asserted = false;
    }

    /// Check if this node is currently pulling the line low
    pub fn is_asserted(&self) -> bool {
        self.asserted
    }

    /// Sample the wire
    pub fn reads_low(&self) -> bool {
        self.pin.is_low()
    }

    /// Mode the pin is left in while released
    pub fn release_mode(&self) -> PinMode {
        self.release_mode
    }

    /// Release the line and hand the pin back
    pub fn free(mut self) -> P {
        self.release();
        self.pin
    }
}


#[cfg(test)]
mod tests {
    use super::mock::{MockFlexPin, OpLog, PinOp};
    use super::*;

    #[test]
    fn test_new_line_is_released() {
        let ops = OpLog::default();
        let line = SafeLine::new(MockFlexPin::new(&ops), true);

        assert!(!line.is_asserted());
        assert!(!line.reads_low());
        assert_eq!(ops.borrow().as_slice(), &[PinOp::Mode(PinMode::InputPullUp)]);
    }

    #[test]
    fn test_assert_writes_level_before_direction() {
        let ops = OpLog::default();
        let mut line = SafeLine::new(MockFlexPin::new(&ops), true);
        ops.borrow_mut().clear();

        line.assert_low();

        assert_eq!(
            ops.borrow().as_slice(),
            &[PinOp::Write(false), PinOp::Mode(PinMode::Output)]
        );
        assert!(line.is_asserted());
        assert!(line.reads_low());
    }

    #[test]
    fn test_release_only_changes_direction() {
        let ops = OpLog::default();
        let mut line = SafeLine::new(MockFlexPin::new(&ops), false);
        line.assert_low();
        ops.borrow_mut().clear();

        line.release();

        // No level is ever written on the way back up
        assert_eq!(ops.borrow().as_slice(), &[PinOp::Mode(PinMode::Input)]);
        assert!(!line.is_asserted());
        assert!(!line.reads_low());
    }

    #[test]
    fn test_never_driven_high() {
        let ops = OpLog::default();
        let mut line = SafeLine::new(MockFlexPin::new(&ops), true);
        for _ in 0..4 {
            line.assert_low();
            line.release();
        }

        // Walk the log: whenever the pin becomes an output, the latch must be low
        let mut latch_high = true;
        for op in ops.borrow().iter() {
            match *op {
                PinOp::Write(level) => latch_high = level,
                PinOp::Mode(mode) => assert!(!(mode.is_driven() && latch_high)),
            }
        }
    }

    #[test]
    fn test_free_releases_line() {
        let ops = OpLog::default();
        let mut line = SafeLine::new(MockFlexPin::new(&ops), true);
        line.assert_low();

        let pin = line.free();
        assert_eq!(pin.mode, PinMode::InputPullUp);
    }
}
