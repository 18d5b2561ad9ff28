//! Embassy async tasks
//!
//! Each task runs independently and communicates via signals.

pub mod demander;
pub mod granter;
pub mod orientation;
pub mod status;

use handoff_core::link::{Demander, Granter};
use handoff_core::orientation::TiltReadout;
use handoff_drivers::accel::Mpu6050;
use handoff_drivers::display::ShiftRegister;
use handoff_drivers::indicator::StatusLed;
use handoff_hal_rp2040::{AccelBus, RpAnalogInput, RpFlex, RpInput, RpOutput};

pub use demander::demander_task;
pub use granter::granter_task;
pub use orientation::orientation_task;
pub use status::status_task;

/// Granter wired to the RP2040 ADC and a flex pin
pub type LinkGranter = Granter<RpAnalogInput<'static>, RpFlex<'static>>;

/// Demander wired to a flex pin and a plain input
pub type LinkDemander = Demander<RpFlex<'static>, RpInput<'static>>;

/// Shift-register digit on three push-pull outputs
pub type Digit = ShiftRegister<RpOutput<'static>, RpOutput<'static>, RpOutput<'static>>;

/// MPU-6050 on I2C0 feeding the digit
pub type Readout = TiltReadout<Mpu6050<AccelBus>, Digit>;

/// Status LED on a push-pull output
pub type Led = StatusLed<RpOutput<'static>>;
