//! Orientation from a single accelerometer sample
//!
//! The classifier reduces a tri-axis reading to one of six discrete
//! orientations. The previous orientation is threaded through explicitly
//! so the classifier stays a pure function; [`OrientationTracker`] holds
//! that one cell of state for the firmware.

pub mod classifier;
pub mod readout;
pub mod tracker;

pub use classifier::{classify, AccelSample, Orientation};
pub use readout::TiltReadout;
pub use tracker::{OrientationTracker, TrackerOutcome};
