//! Previous-orientation cell

use super::classifier::{classify, AccelSample, Orientation};
use crate::traits::SensorError;

/// Outcome of feeding one reading to the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrackerOutcome {
    /// Orientation did not change
    Unchanged(Orientation),
    /// Orientation changed
    Changed {
        from: Orientation,
        to: Orientation,
    },
    /// Sensor read failed and fault reporting is enabled
    SensorUnavailable(SensorError),
}

impl TrackerOutcome {
    /// Orientation after this update, if one is known
    pub fn orientation(&self) -> Option<Orientation> {
        match *self {
            TrackerOutcome::Unchanged(o) => Some(o),
            TrackerOutcome::Changed { to, .. } => Some(to),
            TrackerOutcome::SensorUnavailable(_) => None,
        }
    }
}

/// Holds the last stable orientation between classification cycles
#[derive(Debug, Clone)]
pub struct OrientationTracker {
    current: Orientation,
    /// Surface read failures instead of treating them as a zero sample
    report_faults: bool,
}

impl Default for OrientationTracker {
    fn default() -> Self {
        Self::new(Orientation::Flat, false)
    }
}

impl OrientationTracker {
    /// Create a tracker
    ///
    /// # Arguments
    /// - `initial`: Orientation assumed before the first decisive sample
    /// - `report_faults`: When false, a failed read is classified as an
    ///   all-zero sample and the previous orientation is kept. When true,
    ///   the failure is returned as [`TrackerOutcome::SensorUnavailable`].
    pub fn new(initial: Orientation, report_faults: bool) -> Self {
        Self {
            current: initial,
            report_faults,
        }
    }

    /// Last stable orientation
    pub fn current(&self) -> Orientation {
        self.current
    }

    /// Check if read failures are surfaced
    pub fn reports_faults(&self) -> bool {
        self.report_faults
    }

    /// Feed one reading
    pub fn update(&mut self, reading: Result<AccelSample, SensorError>) -> TrackerOutcome {
        let sample = match reading {
            Ok(sample) => sample,
            Err(e) if self.report_faults => return TrackerOutcome::SensorUnavailable(e),
            Err(_) => AccelSample::ZERO,
        };

        let from = self.current;
        let to = classify(from, sample);
        self.current = to;

        if from == to {
            TrackerOutcome::Unchanged(to)
        } else {
            TrackerOutcome::Changed { from, to }
        }
    }
}
