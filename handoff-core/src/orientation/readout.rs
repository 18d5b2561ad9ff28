//! Sensor-to-display pipeline
//!
//! One [`TiltReadout::step`] runs the whole chain once:
//!
//! ```text
//! accelerometer ─▶ tracker (classify) ─▶ glyph ─▶ segment display
//! ```

use super::tracker::{OrientationTracker, TrackerOutcome};
use crate::segments::SegmentPattern;
use crate::traits::{Accelerometer, SegmentDisplay};

/// Orientation readout on a single 7-segment digit
pub struct TiltReadout<A, D> {
    accel: A,
    display: D,
    tracker: OrientationTracker,
    /// Pattern currently latched on the display
    shown: Option<SegmentPattern>,
}

impl<A: Accelerometer, D: SegmentDisplay> TiltReadout<A, D> {
    /// Create a readout; nothing is rendered until the first step
    pub fn new(accel: A, display: D, tracker: OrientationTracker) -> Self {
        Self {
            accel,
            display,
            tracker,
            shown: None,
        }
    }

    /// Sample, classify and render once
    ///
    /// The display is only rewritten when the glyph changes. A reported
    /// sensor fault shows [`SegmentPattern::DASH`].
    pub fn step(&mut self) -> TrackerOutcome {
        let reading = self.accel.read_acceleration();
        let outcome = self.tracker.update(reading);

        let pattern = outcome
            .orientation()
            .map_or(SegmentPattern::DASH, |o| o.pattern());

        if self.shown != Some(pattern) {
            self.display.show(pattern);
            self.shown = Some(pattern);
        }

        outcome
    }

    /// Orientation tracker state
    pub fn tracker(&self) -> &OrientationTracker {
        &self.tracker
    }

    /// Pattern currently on the display, if anything was rendered
    pub fn shown(&self) -> Option<SegmentPattern> {
        self.shown
    }

    /// Release the sensor and display
    pub fn free(self) -> (A, D) {
        (self.accel, self.display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::{AccelSample, Orientation};
    use crate::traits::SensorError;
    use heapless::Vec;

    struct ScriptedAccel {
        readings: Vec<Result<AccelSample, SensorError>, 8>,
        next: usize,
    }

    impl ScriptedAccel {
        fn new(readings: &[Result<AccelSample, SensorError>]) -> Self {
            Self {
                readings: Vec::from_slice(readings).unwrap(),
                next: 0,
            }
        }
    }

    impl Accelerometer for ScriptedAccel {
        fn read_acceleration(&mut self) -> Result<AccelSample, SensorError> {
            let reading = self.readings[self.next];
            self.next += 1;
            reading
        }
    }

    #[derive(Default)]
    struct RecordingDisplay {
        shown: Vec<SegmentPattern, 8>,
    }

    impl SegmentDisplay for RecordingDisplay {
        fn show(&mut self, pattern: SegmentPattern) {
            self.shown.push(pattern).unwrap();
        }
    }

    #[test]
    fn test_renders_only_changes() {
        let accel = ScriptedAccel::new(&[
            Ok(AccelSample::new(5, 100, 10)),
            Ok(AccelSample::new(8, 90, 3)),
            Ok(AccelSample::new(100, 10, 10)),
            Ok(AccelSample::ZERO),
        ]);
        let mut readout = TiltReadout::new(accel, RecordingDisplay::default(), Default::default());

        // First step always renders, even when the orientation is unchanged
        assert_eq!(readout.step(), TrackerOutcome::Unchanged(Orientation::Flat));
        assert_eq!(readout.step(), TrackerOutcome::Unchanged(Orientation::Flat));
        assert_eq!(
            readout.step(),
            TrackerOutcome::Changed {
                from: Orientation::Flat,
                to: Orientation::PortraitRight
            }
        );
        assert_eq!(
            readout.step(),
            TrackerOutcome::Unchanged(Orientation::PortraitRight)
        );

        let (_, display) = readout.free();
        assert_eq!(
            display.shown.as_slice(),
            &[SegmentPattern::LETTER_F, SegmentPattern::INDICATOR_RIGHT]
        );
    }

    #[test]
    fn test_silent_fault_keeps_glyph() {
        let accel = ScriptedAccel::new(&[
            Ok(AccelSample::new(10, 10, 100)),
            Err(SensorError::Bus),
        ]);
        let mut readout = TiltReadout::new(accel, RecordingDisplay::default(), Default::default());

        readout.step();
        readout.step();

        assert_eq!(readout.shown(), Some(SegmentPattern::LETTER_L));
        let (_, display) = readout.free();
        assert_eq!(display.shown.len(), 1);
    }

    #[test]
    fn test_reported_fault_shows_dash() {
        let accel = ScriptedAccel::new(&[
            Ok(AccelSample::new(-10, 10, 100)),
            Err(SensorError::Bus),
            Err(SensorError::Bus),
            Ok(AccelSample::new(-10, 10, 100)),
        ]);
        let tracker = OrientationTracker::new(Orientation::Flat, true);
        let mut readout = TiltReadout::new(accel, RecordingDisplay::default(), tracker);

        for _ in 0..4 {
            readout.step();
        }

        let (_, display) = readout.free();
        assert_eq!(
            display.shown.as_slice(),
            &[
                SegmentPattern::LETTER_U,
                SegmentPattern::DASH,
                SegmentPattern::LETTER_U
            ]
        );
    }
}
