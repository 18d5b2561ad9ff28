//! Analog input abstraction

/// A single ADC channel
///
/// Reads are total: a board adapter that can fail a conversion must map
/// the failure to a concrete code itself (see the RP2040 adapter, which
/// reports full scale).
pub trait AnalogInput {
    /// Largest code the converter can return (1023 for 10-bit, 4095 for 12-bit)
    fn full_scale(&self) -> u16;

    /// Perform one conversion, returning a value in `0..=full_scale()`
    fn read(&mut self) -> u16;

    /// Number of distinct codes (`full_scale() + 1`)
    fn code_count(&self) -> u32 {
        self.full_scale() as u32 + 1
    }
}
