//! Granter end of the handshake

use handoff_hal::adc::AnalogInput;
use handoff_hal::gpio::FlexPin;

use super::line::SafeLine;
use super::protocol::{Event, Phase, Role, Step};
use super::threshold::DemandThreshold;

/// Node that owns the resource and hands it out on demand
///
/// Call [`Granter::poll`] from the node's polling loop. Each call takes
/// exactly one ADC sample and drives GRANTED to match it.
pub struct Granter<A, P> {
    demand: A,
    threshold: DemandThreshold,
    granted: SafeLine<P>,
    phase: Phase,
}

impl<A: AnalogInput, P: FlexPin> Granter<A, P> {
    /// Create a granter with GRANTED released
    ///
    /// # Arguments
    /// - `demand`: ADC channel wired to the DEMAND line
    /// - `granted`: Pin wired to the GRANTED line
    /// - `pull_up`: Enable the internal pull-up on GRANTED while released
    /// - `threshold`: Fraction of full scale separating logic 0 from logic 1
    pub fn new(demand: A, granted: P, pull_up: bool, threshold: DemandThreshold) -> Self {
        Self {
            demand,
            threshold,
            granted: SafeLine::new(granted, pull_up),
            phase: Phase::Idle,
        }
    }

    /// Sample DEMAND once
    ///
    /// Returns true when demand is present (the line reads below threshold).
    pub fn sense_demand(&mut self) -> bool {
        self.threshold.sense(&mut self.demand)
    }

    /// Pull GRANTED low
    pub fn assert_grant(&mut self) {
        self.granted.assert_low();
        self.phase = Phase::Granted;
    }

    /// Let GRANTED float high
    pub fn release_grant(&mut self) {
        self.granted.release();
        self.phase = Phase::Idle;
    }

    /// Run one sense-then-drive cycle
    ///
    /// GRANTED is re-driven on every cycle, not only on changes.
    pub fn poll(&mut self) -> Step {
        let previous = self.phase;
        let demand = self.sense_demand();
        let next = previous.transition(Role::Granter, Event::DemandSensed(demand));

        if next.line_asserted(Role::Granter) {
            self.assert_grant();
        } else {
            self.release_grant();
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

    /// Check if GRANTED is currently pulled low by this node
    pub fn is_granting(&self) -> bool {
        self.granted.is_asserted()
    }

    /// Threshold in use
    pub fn threshold(&self) -> DemandThreshold {
        self.threshold
    }

    /// ADC channel sensing DEMAND
    pub fn demand_input(&self) -> &A {
        &self.demand
    }

    /// Release GRANTED and return the ADC channel and pin
    pub fn free(self) -> (A, P) {
        (self.demand, self.granted.free())
    }
}
