//! I2C0 bring-up

use embassy_rp::i2c::{Blocking, Config, I2c};
use embassy_rp::peripherals::{I2C0, PIN_4, PIN_5};
use embassy_rp::Peri;
use handoff_hal::i2c::I2cConfig;

/// Blocking I2C0 bus on GPIO4 (SDA) / GPIO5 (SCL)
pub type AccelBus = I2c<'static, I2C0, Blocking>;

/// Bring up I2C0 for the accelerometer
pub fn accel_bus(
    i2c0: Peri<'static, I2C0>,
    sda: Peri<'static, PIN_4>,
    scl: Peri<'static, PIN_5>,
    config: I2cConfig,
) -> AccelBus {
    let mut bus_config = Config::default();
    bus_config.frequency = config.frequency;
    I2c::new_blocking(i2c0, scl, sda, bus_config)
}
