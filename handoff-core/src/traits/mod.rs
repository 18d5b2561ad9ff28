//! Hardware abstraction traits
//!
//! These traits define the interface between the orientation readout
//! and the concrete sensor and display drivers.

pub mod accel;
pub mod display;

pub use accel::{Accelerometer, SensorError};
pub use display::SegmentDisplay;
