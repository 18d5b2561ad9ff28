//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in handoff-core:
//!
//! - Accelerometer (MPU-6050 over I2C)
//! - 7-segment display behind a serial-in shift register
//! - Status LED

#![no_std]
#![deny(unsafe_code)]

pub mod accel;
pub mod display;
pub mod indicator;
