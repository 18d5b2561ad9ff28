//! I2C bus configuration
//!
//! Transfers go through `embedded_hal::i2c::I2c`; this module only carries
//! the bus settings shared between config and board code.

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            frequency: 100_000, // 100kHz standard mode
        }
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Build from a frequency, clamping to fast mode (the MPU-6050 tops out at 400 kHz)
    pub fn clamped(frequency: u32) -> Self {
        Self {
            frequency: frequency.clamp(10_000, Self::FAST.frequency),
        }
    }
}
