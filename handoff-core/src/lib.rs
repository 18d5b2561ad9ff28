//! Board-agnostic core logic for the Handoff firmware
//!
//! This crate contains all logic that does not depend on a specific chip:
//!
//! - DEMAND/GRANTED handshake between a demander and a granter node
//! - Accelerometer orientation classification
//! - 7-segment glyph table
//! - Accelerometer and display traits
//! - Node configuration types and the `node.toml` parser

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod link;
pub mod orientation;
pub mod segments;
pub mod traits;
