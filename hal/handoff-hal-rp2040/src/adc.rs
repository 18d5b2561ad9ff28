//! ADC channel management
//!
//! RP2040 has a single 12-bit ADC with 5 channels:
//! - ADC0: GPIO26
//! - ADC1: GPIO27
//! - ADC2: GPIO28
//! - ADC3: GPIO29
//! - ADC4: Internal temperature sensor

use embassy_rp::adc::{Adc, Blocking, Channel};
use handoff_hal::adc::AnalogInput;

/// Largest RP2040 ADC code
pub const FULL_SCALE: u16 = 4095;

/// External ADC channel identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcChannel {
    /// ADC0 on GPIO26
    Adc0,
    /// ADC1 on GPIO27
    Adc1,
    /// ADC2 on GPIO28
    Adc2,
    /// ADC3 on GPIO29
    Adc3,
}

impl AdcChannel {
    /// Get ADC channel from GPIO pin
    pub fn from_gpio(gpio: u8) -> Option<Self> {
        match gpio {
            26 => Some(AdcChannel::Adc0),
            27 => Some(AdcChannel::Adc1),
            28 => Some(AdcChannel::Adc2),
            29 => Some(AdcChannel::Adc3),
            _ => None,
        }
    }
}

/// One ADC channel with exclusive use of the converter
///
/// A failed conversion reads as full scale, which the handshake treats
/// as "no demand".
pub struct RpAnalogInput<'d> {
    adc: Adc<'d, Blocking>,
    channel: Channel<'d>,
    failures: u32,
}

impl<'d> RpAnalogInput<'d> {
    /// Pair the converter with one channel
    pub fn new(adc: Adc<'d, Blocking>, channel: Channel<'d>) -> Self {
        Self {
            adc,
            channel,
            failures: 0,
        }
    }

    /// Number of conversions that failed and were reported as full scale
    pub fn failures(&self) -> u32 {
        self.failures
    }
}

impl AnalogInput for RpAnalogInput<'_> {
    fn full_scale(&self) -> u16 {
        FULL_SCALE
    }

    fn read(&mut self) -> u16 {
        match self.adc.blocking_read(&mut self.channel) {
            Ok(value) => value.min(FULL_SCALE),
            Err(_) => {
                self.failures = self.failures.wrapping_add(1);
                FULL_SCALE
            }
        }
    }
}
