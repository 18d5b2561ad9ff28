//! Node configuration loading
//!
//! The node file is compiled into the firmware and checked by build.rs;
//! the runtime parse here can still reject it, in which case the
//! granter defaults are used.

use defmt::*;

use handoff_core::config::{parse_config, NodeConfig};
use handoff_core::link::Role;

/// Parse and validate the embedded node file
pub fn load_config(source: &str) -> NodeConfig {
    let config = match parse_config(source) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to parse node config: {:?}", e);
            error!("Using default configuration");
            return NodeConfig::default();
        }
    };

    if let Err(e) = config.validate() {
        error!("Invalid node config: {:?}", e);
        error!("Using default configuration");
        return NodeConfig::default();
    }

    log_summary(&config);
    config
}

fn log_summary(config: &NodeConfig) {
    let link = &config.link;
    match config.role {
        Role::Granter => info!(
            "Role: granter (DEMAND adc gpio{}, GRANTED gpio{}, threshold {}/{})",
            link.demand_pin.pin,
            link.granted_pin.pin,
            link.threshold.numerator(),
            link.threshold.denominator()
        ),
        Role::Demander => info!(
            "Role: demander (DEMAND gpio{}, GRANTED gpio{}, timeout {}ms)",
            link.demand_pin.pin, link.granted_pin.pin, link.demand_timeout_ms
        ),
    }

    if let Some(display) = &config.display {
        info!(
            "Display: data=gpio{} clock=gpio{} latch=gpio{} {:?}",
            display.data_pin.pin, display.clock_pin.pin, display.latch_pin.pin, display.bit_order
        );
    }
    if let Some(accel) = &config.accel {
        info!(
            "Accel: MPU-6050 @ {:#x}, {}Hz bus, every {}ms",
            accel.address, accel.frequency, accel.sample_interval_ms
        );
    }
    if config.display.is_some() != config.accel.is_some() {
        warn!("Orientation readout needs both [display] and [accel]; readout disabled");
    }
}
