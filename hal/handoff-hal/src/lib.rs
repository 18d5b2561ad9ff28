//! Handoff Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the handshake and
//! display logic are written against. Chip-specific HALs (RP2040 today)
//! implement them, and host tests implement them with recording mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  handoff-core / handoff-drivers         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  handoff-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ handoff-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`gpio::FlexPin`] - Pins whose direction changes at runtime
//! - [`adc::AnalogInput`] - Single ADC channel
//!
//! The accelerometer bus is not abstracted here: drivers take any
//! `embedded_hal::i2c::I2c` implementation directly.

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use adc::AnalogInput;
pub use gpio::{FlexPin, InputPin, OutputPin, PinMode};
pub use i2c::I2cConfig;
