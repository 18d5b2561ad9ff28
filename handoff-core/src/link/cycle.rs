//! Request, hold, release, back off
//!
//! [`DemandCycle`] runs the demander's repeating borrow cycle on top of a
//! [`Demander`]. It owns no clock: the caller passes a millisecond
//! timestamp to every call, so the same code runs under embassy timers and
//! in host tests.

use handoff_hal::gpio::{FlexPin, InputPin};

use super::demander::Demander;
use super::protocol::Step;

/// Timing of one borrow cycle, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleTiming {
    /// Give up waiting for GRANTED after this long (0 = wait forever)
    pub demand_timeout_ms: u32,
    /// How long to keep the resource once granted
    pub hold_ms: u32,
    /// Pause between releasing and asking again
    pub retry_backoff_ms: u32,
}

/// Where the cycle is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleStage {
    /// Not started; the next tick requests
    Idle,
    /// DEMAND asserted, polling GRANTED
    Waiting,
    /// Resource in use
    Holding,
    /// DEMAND released, pausing before the next request
    BackingOff,
}

/// Something worth reporting that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleEvent {
    /// DEMAND asserted for a new cycle
    Requested,
    /// GRANTED arrived; hold time starts now
    Granted,
    /// Hold time ran out and the resource was given back
    Completed,
    /// The granter dropped GRANTED mid-hold; waiting again with DEMAND held
    GrantWithdrawn,
    /// No grant within the timeout; DEMAND released
    TimedOut,
}

/// Outcome of one [`DemandCycle::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleTick {
    /// Handshake phase change caused by this tick
    pub step: Step,
    /// Notable event, if any
    pub event: Option<CycleEvent>,
}

/// Demander running the borrow cycle
pub struct DemandCycle<D, G> {
    demander: Demander<D, G>,
    timing: CycleTiming,
    stage: CycleStage,
    /// Timestamp the current stage started at
    since_ms: u32,
}

impl<D: FlexPin, G: InputPin> DemandCycle<D, G> {
    /// Wrap an idle demander; the first [`DemandCycle::tick`] requests
    pub fn new(demander: Demander<D, G>, timing: CycleTiming) -> Self {
        Self {
            demander,
            timing,
            stage: CycleStage::Idle,
            since_ms: 0,
        }
    }

    /// Advance the cycle to `now_ms`
    ///
    /// Samples GRANTED at most once. Time arithmetic wraps, so a free-running
    /// millisecond counter is fine.
    pub fn tick(&mut self, now_ms: u32) -> CycleTick {
        let elapsed = now_ms.wrapping_sub(self.since_ms);

        match self.stage {
            CycleStage::Idle | CycleStage::BackingOff => {
                if self.stage == CycleStage::Idle || elapsed >= self.timing.retry_backoff_ms {
                    let step = self.demander.request();
                    self.enter(CycleStage::Waiting, now_ms);
                    return CycleTick {
                        step,
                        event: Some(CycleEvent::Requested),
                    };
                }
                self.unchanged()
            }
            CycleStage::Waiting => {
                let step = self.demander.poll();
                if step.current.holds_resource() {
                    self.enter(CycleStage::Holding, now_ms);
                    return CycleTick {
                        step,
                        event: Some(CycleEvent::Granted),
                    };
                }
                let timeout = self.timing.demand_timeout_ms;
                if timeout != 0 && elapsed >= timeout {
                    let released = self.demander.release();
                    self.enter(CycleStage::BackingOff, now_ms);
                    return CycleTick {
                        step: Step {
                            previous: step.previous,
                            current: released.current,
                        },
                        event: Some(CycleEvent::TimedOut),
                    };
                }
                CycleTick { step, event: None }
            }
            CycleStage::Holding => {
                let step = self.demander.poll();
                if !step.current.holds_resource() {
                    // Start over: a fresh wait, then a full hold once re-granted
                    self.enter(CycleStage::Waiting, now_ms);
                    return CycleTick {
                        step,
                        event: Some(CycleEvent::GrantWithdrawn),
                    };
                }
                if elapsed >= self.timing.hold_ms {
                    let released = self.demander.release();
                    self.enter(CycleStage::BackingOff, now_ms);
                    return CycleTick {
                        step: released,
                        event: Some(CycleEvent::Completed),
                    };
                }
                CycleTick { step, event: None }
            }
        }
    }

    fn enter(&mut self, stage: CycleStage, now_ms: u32) {
        self.stage = stage;
        self.since_ms = now_ms;
    }

    fn unchanged(&self) -> CycleTick {
        let phase = self.demander.phase();
        CycleTick {
            step: Step {
                previous: phase,
                current: phase,
            },
            event: None,
        }
    }

    /// Current stage
    pub fn stage(&self) -> CycleStage {
        self.stage
    }

    /// Underlying demander
    pub fn demander(&self) -> &Demander<D, G> {
        &self.demander
    }

    /// Release DEMAND and return the demander
    pub fn free(mut self) -> Demander<D, G> {
        self.demander.release();
        self.demander
    }
}
