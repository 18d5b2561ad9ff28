//! Accelerometer trait

use crate::orientation::AccelSample;

/// Errors that can occur reading an accelerometer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus transfer failed (NACK, arbitration, timeout)
    Bus,
    /// Device answered with an unexpected identity
    UnexpectedDevice,
}

/// Trait for tri-axis accelerometers
pub trait Accelerometer {
    /// Read one raw sample
    ///
    /// Takes `&mut self` because bus reads require mutable access.
    fn read_acceleration(&mut self) -> Result<AccelSample, SensorError>;
}
