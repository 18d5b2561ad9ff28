//! Dynamic pin allocation for config-driven hardware setup
//!
//! Provides a way to get GPIO pins by number at runtime, so the pin
//! numbers in `node.toml` decide the wiring.
//!
//! Pins with a fixed role on the board stay typed and never enter the
//! bank:
//!
//! | GPIO  | Role                      |
//! |-------|---------------------------|
//! | 4, 5  | I2C0 SDA/SCL (accelerometer) |
//! | 26-29 | ADC0-ADC3 (DEMAND sense)  |

use embassy_rp::gpio::AnyPin;
use embassy_rp::peripherals::{ADC, I2C0, PIN_26, PIN_27, PIN_28, PIN_29, PIN_4, PIN_5};
use embassy_rp::{Peri, Peripherals};

use crate::adc::AdcChannel;

/// Number of GPIO pins on RP2040
pub const GPIO_COUNT: u8 = 30;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
    /// Pin reserved for special function
    Reserved,
    /// Pin has no ADC channel
    NotAnalog,
}

/// Check if a pin has a fixed role and is kept out of the bank
pub const fn is_reserved(pin_num: u8) -> bool {
    matches!(pin_num, 4 | 5 | 26..=29)
}

/// Pin bank that holds the general-purpose GPIO pins and allows taking
/// them by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT as usize],
}

impl PinBank {
    /// Take a pin by number
    ///
    /// Returns the pin if available, or an error if:
    /// - Pin number is invalid (>= 30)
    /// - Pin is reserved (I2C0 or ADC)
    /// - Pin was already taken
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        if pin_num >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        if is_reserved(pin_num) {
            return Err(PinError::Reserved);
        }
        self.pins[pin_num as usize]
            .take()
            .ok_or(PinError::AlreadyTaken)
    }
}

/// ADC-capable pins, handed out as ADC channels
pub struct AdcPins {
    pin26: Option<Peri<'static, PIN_26>>,
    pin27: Option<Peri<'static, PIN_27>>,
    pin28: Option<Peri<'static, PIN_28>>,
    pin29: Option<Peri<'static, PIN_29>>,
}

impl AdcPins {
    /// Take the ADC channel on a GPIO
    pub fn take_channel(
        &mut self,
        pin_num: u8,
    ) -> Result<embassy_rp::adc::Channel<'static>, PinError> {
        use embassy_rp::adc::Channel;
        use embassy_rp::gpio::Pull;

        let Some(adc_channel) = AdcChannel::from_gpio(pin_num) else {
            return Err(if pin_num >= GPIO_COUNT {
                PinError::InvalidPin
            } else {
                PinError::NotAnalog
            });
        };

        let channel = match adc_channel {
            AdcChannel::Adc0 => self.pin26.take().map(|p| Channel::new_pin(p, Pull::None)),
            AdcChannel::Adc1 => self.pin27.take().map(|p| Channel::new_pin(p, Pull::None)),
            AdcChannel::Adc2 => self.pin28.take().map(|p| Channel::new_pin(p, Pull::None)),
            AdcChannel::Adc3 => self.pin29.take().map(|p| Channel::new_pin(p, Pull::None)),
        };
        channel.ok_or(PinError::AlreadyTaken)
    }
}

/// Non-bank peripherals the firmware wires by hand
pub struct BoardPeripherals {
    pub adc: Peri<'static, ADC>,
    pub i2c0: Peri<'static, I2C0>,
    pub i2c0_sda: Peri<'static, PIN_4>,
    pub i2c0_scl: Peri<'static, PIN_5>,
}

/// Split Embassy peripherals into the pin bank, the ADC pins and the
/// fixed-function peripherals
pub fn split(p: Peripherals) -> (PinBank, AdcPins, BoardPeripherals) {
    let bank = PinBank {
        pins: [
            Some(p.PIN_0.into()),
            Some(p.PIN_1.into()),
            Some(p.PIN_2.into()),
            Some(p.PIN_3.into()),
            None,
            None,
            Some(p.PIN_6.into()),
            Some(p.PIN_7.into()),
            Some(p.PIN_8.into()),
            Some(p.PIN_9.into()),
            Some(p.PIN_10.into()),
            Some(p.PIN_11.into()),
            Some(p.PIN_12.into()),
            Some(p.PIN_13.into()),
            Some(p.PIN_14.into()),
            Some(p.PIN_15.into()),
            Some(p.PIN_16.into()),
            Some(p.PIN_17.into()),
            Some(p.PIN_18.into()),
            Some(p.PIN_19.into()),
            Some(p.PIN_20.into()),
            Some(p.PIN_21.into()),
            Some(p.PIN_22.into()),
            Some(p.PIN_23.into()),
            Some(p.PIN_24.into()),
            Some(p.PIN_25.into()),
            None,
            None,
            None,
            None,
        ],
    };
    let adc_pins = AdcPins {
        pin26: Some(p.PIN_26),
        pin27: Some(p.PIN_27),
        pin28: Some(p.PIN_28),
        pin29: Some(p.PIN_29),
    };
    let board = BoardPeripherals {
        adc: p.ADC,
        i2c0: p.I2C0,
        i2c0_sda: p.PIN_4,
        i2c0_scl: p.PIN_5,
    };
    (bank, adc_pins, board)
}
