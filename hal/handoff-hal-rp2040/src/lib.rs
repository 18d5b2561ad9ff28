//! RP2040-specific HAL for the Handoff firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `handoff-hal` traits, plus RP2040-specific functionality:
//!
//! - Dynamic pin allocation for config-driven setup
//! - GPIO adapters (flex, output, input)
//! - ADC channel management and a blocking analog input
//! - I2C0 bring-up for the accelerometer

#![no_std]

pub mod adc;
pub mod gpio;
pub mod i2c;
pub mod pins;

pub use adc::{AdcChannel, RpAnalogInput};
pub use gpio::{RpFlex, RpInput, RpOutput};
pub use i2c::{accel_bus, AccelBus};
pub use pins::{split, AdcPins, BoardPeripherals, PinBank, PinError};
