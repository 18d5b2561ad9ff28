//! MPU-6050 accelerometer (I2C)
//!
//! Only the accelerometer half of the part is used. After reset the chip
//! sleeps; clearing `PWR_MGMT_1` wakes it with the internal oscillator
//! and the default ±2 g range.
//!
//! # Register Layout
//!
//! The three axes sit in six consecutive registers starting at
//! `ACCEL_XOUT_H`, high byte first:
//!
//! ```text
//! 0x3B XH  0x3C XL  0x3D YH  0x3E YL  0x3F ZH  0x40 ZL
//! ```
//!
//! A single burst read of six bytes returns one coherent sample.

use embedded_hal::i2c::I2c;
use handoff_core::orientation::AccelSample;
use handoff_core::traits::{Accelerometer, SensorError};

/// MPU-6050 register addresses
pub mod reg {
    /// First accelerometer output register (X high byte)
    pub const ACCEL_XOUT_H: u8 = 0x3B;
    /// Power management 1
    pub const PWR_MGMT_1: u8 = 0x6B;
    /// Device identity
    pub const WHO_AM_I: u8 = 0x75;
}

/// Address with AD0 tied low
pub const DEFAULT_ADDRESS: u8 = 0x68;

/// Address with AD0 tied high
pub const ALTERNATE_ADDRESS: u8 = 0x69;

/// `WHO_AM_I` contents, independent of the AD0 strap
const DEVICE_ID: u8 = 0x68;

/// MPU-6050 driver error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mpu6050Error<E> {
    /// I2C transfer failed
    Bus(E),
    /// `WHO_AM_I` returned something other than an MPU-6050
    UnexpectedDevice(u8),
}

impl<E> From<Mpu6050Error<E>> for SensorError {
    fn from(err: Mpu6050Error<E>) -> Self {
        match err {
            Mpu6050Error::Bus(_) => SensorError::Bus,
            Mpu6050Error::UnexpectedDevice(_) => SensorError::UnexpectedDevice,
        }
    }
}

/// MPU-6050 on an I2C bus
pub struct Mpu6050<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Mpu6050<I2C> {
    /// Create a driver; the chip is not touched until [`Mpu6050::init`]
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Check the device identity and wake it from sleep
    pub fn init(&mut self) -> Result<(), Mpu6050Error<I2C::Error>> {
        let id = self.who_am_i()?;
        if id != DEVICE_ID {
            return Err(Mpu6050Error::UnexpectedDevice(id));
        }
        self.write_register(reg::PWR_MGMT_1, 0x00)
    }

    /// Read the identity register
    pub fn who_am_i(&mut self) -> Result<u8, Mpu6050Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg::WHO_AM_I], &mut buf)
            .map_err(Mpu6050Error::Bus)?;
        Ok(buf[0])
    }

    /// Read one raw acceleration sample
    pub fn read_sample(&mut self) -> Result<AccelSample, Mpu6050Error<I2C::Error>> {
        let mut raw = [0u8; 6];
        self.i2c
            .write_read(self.address, &[reg::ACCEL_XOUT_H], &mut raw)
            .map_err(Mpu6050Error::Bus)?;
        Ok(AccelSample::from_be_bytes(raw))
    }

    /// Configured bus address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the bus
    pub fn free(self) -> I2C {
        self.i2c
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Mpu6050Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(Mpu6050Error::Bus)
    }
}

impl<I2C: I2c> Accelerometer for Mpu6050<I2C> {
    fn read_acceleration(&mut self) -> Result<AccelSample, SensorError> {
        self.read_sample().map_err(SensorError::from)
    }
}
