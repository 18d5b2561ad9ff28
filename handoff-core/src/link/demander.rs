//! Demander end of the handshake

use handoff_hal::gpio::{FlexPin, InputPin};

use super::line::SafeLine;
use super::protocol::{Event, Phase, Role, Step};

/// Node that borrows the resource from the granter
///
/// Usage from a polling loop:
///
/// ```ignore
/// demander.request();
/// while !demander.poll().current.holds_resource() {
///     // caller-defined timeout; on expiry call demander.release()
/// }
/// // use the resource
/// demander.release();
/// ```
pub struct Demander<D, G> {
    demand: SafeLine<D>,
    granted: G,
    phase: Phase,
}

impl<D: FlexPin, G: InputPin> Demander<D, G> {
    /// Create a demander with DEMAND released
    ///
    /// # Arguments
    /// - `demand`: Pin wired to the DEMAND line
    /// - `pull_up`: Enable the internal pull-up on DEMAND while released
    /// - `granted`: Input wired to the GRANTED line (configured with pull-up by the board)
    pub fn new(demand: D, pull_up: bool, granted: G) -> Self {
        Self {
            demand: SafeLine::new(demand, pull_up),
            granted,
            phase: Phase::Idle,
        }
    }

    /// Pull DEMAND low
    ///
    /// Same as [`Demander::request`] without the step report.
    pub fn assert_demand(&mut self) {
        self.request();
    }

    /// Let DEMAND float high
    ///
    /// Same as [`Demander::release`] without the step report.
    pub fn release_demand(&mut self) {
        self.release();
    }

    /// Sample GRANTED once
    ///
    /// The granter pulls GRANTED low to hand over the resource.
    pub fn sense_grant(&self) -> bool {
        self.granted.is_low()
    }

    /// Start asking for the resource
    pub fn request(&mut self) -> Step {
        self.apply(Event::Request)
    }

    /// Sample GRANTED and advance the phase
    pub fn poll(&mut self) -> Step {
        let granted = self.sense_grant();
        self.apply(Event::GrantSensed(granted))
    }

    /// Stop asking for, or give back, the resource
    ///
    /// Also used by callers whose own wait timed out.
    pub fn release(&mut self) -> Step {
        self.apply(Event::Release)
    }

    fn apply(&mut self, event: Event) -> Step {
        let previous = self.phase;
        self.phase = previous.transition(Role::Demander, event);

        match (
            previous.line_asserted(Role::Demander),
            self.phase.line_asserted(Role::Demander),
        ) {
            (false, true) => self.demand.assert_low(),
            (true, false) => self.demand.release(),
            _ => {}
        }

        Step {
            previous,
            current: self.phase,
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Check if DEMAND is currently pulled low by this node
    pub fn is_demanding(&self) -> bool {
        self.demand.is_asserted()
    }

    /// Release DEMAND and return both pins
    pub fn free(self) -> (D, G) {
        (self.demand.free(), self.granted)
    }
}

#[cfg(test)]
mod tests {
    use handoff_hal::gpio::PinMode;

    use super::super::line::mock::{MockFlexPin, MockInputPin, OpLog, PinOp};
    use super::*;

    fn demander(ops: &OpLog) -> Demander<MockFlexPin<'_>, MockInputPin> {
        Demander::new(MockFlexPin::new(ops), true, MockInputPin { high: true })
    }

    #[test]
    fn test_starts_released() {
        let ops = OpLog::default();
        let d = demander(&ops);

        assert_eq!(d.phase(), Phase::Idle);
        assert!(!d.is_demanding());
        assert_eq!(ops.borrow().as_slice(), &[PinOp::Mode(PinMode::InputPullUp)]);
    }

    #[test]
    fn test_grant_reads_active_low() {
        let ops = OpLog::default();
        let mut d = demander(&ops);
        assert!(!d.sense_grant());

        d.granted.high = false;
        assert!(d.sense_grant());
    }

    #[test]
    fn test_full_handshake() {
        let ops = OpLog::default();
        let mut d = demander(&ops);
        ops.borrow_mut().clear();

        let step = d.request();
        assert_eq!(step.current, Phase::Requesting);
        assert!(d.is_demanding());
        assert_eq!(
            ops.borrow().as_slice(),
            &[PinOp::Write(false), PinOp::Mode(PinMode::Output)]
        );

        // Granter has not answered yet
        assert_eq!(d.poll().current, Phase::Requesting);

        d.granted.high = false;
        let step = d.poll();
        assert!(step.changed());
        assert!(step.current.holds_resource());

        ops.borrow_mut().clear();
        let step = d.release();
        assert_eq!(step.current, Phase::Idle);
        assert!(!d.is_demanding());
        assert_eq!(ops.borrow().as_slice(), &[PinOp::Mode(PinMode::InputPullUp)]);
    }

    #[test]
    fn test_polling_does_not_touch_demand() {
        let ops = OpLog::default();
        let mut d = demander(&ops);
        d.request();
        ops.borrow_mut().clear();

        for _ in 0..3 {
            d.poll();
        }
        assert!(ops.borrow().is_empty());
    }

    #[test]
    fn test_release_after_timeout() {
        let ops = OpLog::default();
        let mut d = demander(&ops);
        d.request();
        d.poll();

        let step = d.release();
        assert_eq!(step.previous, Phase::Requesting);
        assert_eq!(step.current, Phase::Idle);
        assert!(!d.is_demanding());
    }

    #[test]
    fn test_raw_commands_track_phase() {
        let ops = OpLog::default();
        let mut d = demander(&ops);

        d.assert_demand();
        assert!(d.is_demanding());
        assert_eq!(d.phase(), Phase::Requesting);

        // Asserting twice does not re-drive the line
        ops.borrow_mut().clear();
        d.assert_demand();
        assert!(ops.borrow().is_empty());

        d.release_demand();
        assert!(!d.is_demanding());
        assert_eq!(d.phase(), Phase::Idle);
    }

    #[test]
    fn test_stale_grant_ignored_when_idle() {
        let ops = OpLog::default();
        let mut d = demander(&ops);
        d.granted.high = false;

        let step = d.poll();
        assert!(!step.changed());
        assert!(!d.is_demanding());
    }
}
