//! Handshake phase machine
//!
//! Both roles share one set of phases. The granter only ever uses `Idle`
//! and `Granted`; the demander walks `Idle → Requesting → Granted → Idle`.

/// Which end of the link this node is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// Senses DEMAND, drives GRANTED
    #[default]
    Granter,
    /// Drives DEMAND, senses GRANTED
    Demander,
}

/// Handshake phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Both lines released
    #[default]
    Idle,
    /// DEMAND asserted, waiting for GRANTED
    Requesting,
    /// Resource handed over
    Granted,
}

/// Inputs to the phase machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Demander wants the resource
    Request,
    /// Demander is done with the resource (or gave up waiting)
    Release,
    /// Granter sampled DEMAND (true = demand present)
    DemandSensed(bool),
    /// Demander sampled GRANTED (true = granted)
    GrantSensed(bool),
}

impl Phase {
    /// Check if the resource is handed over in this phase
    pub fn holds_resource(&self) -> bool {
        matches!(self, Phase::Granted)
    }

    /// Check if the role's own line is pulled low in this phase
    pub fn line_asserted(&self, role: Role) -> bool {
        match role {
            Role::Granter => matches!(self, Phase::Granted),
            Role::Demander => !matches!(self, Phase::Idle),
        }
    }

    /// Process an event and return the next phase
    pub fn transition(self, role: Role, event: Event) -> Self {
        use Event::*;
        use Phase::*;

        match (role, self, event) {
            // The granter follows DEMAND, one sample at a time
            (Role::Granter, _, DemandSensed(true)) => Granted,
            (Role::Granter, _, DemandSensed(false)) => Idle,

            (Role::Demander, Idle, Request) => Requesting,
            (Role::Demander, Requesting, GrantSensed(true)) => Granted,
            // Grant withdrawn while DEMAND is still held: wait again
            (Role::Demander, Granted, GrantSensed(false)) => Requesting,
            (Role::Demander, Requesting | Granted, Release) => Idle,

            // Default: stay in current phase
            _ => self,
        }
    }
}

/// Result of one poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    /// Phase before the cycle
    pub previous: Phase,
    /// Phase after the cycle
    pub current: Phase,
}

impl Step {
    /// Check if the cycle changed the phase
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granter_follows_demand() {
        let phase = Phase::Idle;
        let granted = phase.transition(Role::Granter, Event::DemandSensed(true));
        assert_eq!(granted, Phase::Granted);

        // Repeated demand keeps the grant
        assert_eq!(
            granted.transition(Role::Granter, Event::DemandSensed(true)),
            Phase::Granted
        );

        let idle = granted.transition(Role::Granter, Event::DemandSensed(false));
        assert_eq!(idle, Phase::Idle);
    }

    #[test]
    fn test_granter_ignores_demander_events() {
        for phase in [Phase::Idle, Phase::Granted] {
            assert_eq!(phase.transition(Role::Granter, Event::Request), phase);
            assert_eq!(phase.transition(Role::Granter, Event::GrantSensed(true)), phase);
        }
    }

    #[test]
    fn test_demander_flow() {
        let idle = Phase::Idle;

        // Grant seen before requesting is ignored
        assert_eq!(idle.transition(Role::Demander, Event::GrantSensed(true)), Phase::Idle);

        let requesting = idle.transition(Role::Demander, Event::Request);
        assert_eq!(requesting, Phase::Requesting);

        let still = requesting.transition(Role::Demander, Event::GrantSensed(false));
        assert_eq!(still, Phase::Requesting);

        let granted = still.transition(Role::Demander, Event::GrantSensed(true));
        assert_eq!(granted, Phase::Granted);

        let done = granted.transition(Role::Demander, Event::Release);
        assert_eq!(done, Phase::Idle);
    }

    #[test]
    fn test_demander_give_up_while_waiting() {
        let requesting = Phase::Idle.transition(Role::Demander, Event::Request);
        assert_eq!(requesting.transition(Role::Demander, Event::Release), Phase::Idle);
    }

    #[test]
    fn test_demander_grant_withdrawn() {
        let granted = Phase::Granted;
        assert_eq!(
            granted.transition(Role::Demander, Event::GrantSensed(false)),
            Phase::Requesting
        );
    }

    #[test]
    fn test_line_asserted() {
        assert!(!Phase::Idle.line_asserted(Role::Demander));
        assert!(Phase::Requesting.line_asserted(Role::Demander));
        assert!(Phase::Granted.line_asserted(Role::Demander));

        assert!(!Phase::Idle.line_asserted(Role::Granter));
        assert!(Phase::Granted.line_asserted(Role::Granter));
    }

    #[test]
    fn test_step_changed() {
        let step = Step {
            previous: Phase::Idle,
            current: Phase::Granted,
        };
        assert!(step.changed());

        let step = Step {
            previous: Phase::Idle,
            current: Phase::Idle,
        };
        assert!(!step.changed());
    }
}
