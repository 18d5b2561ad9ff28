//! Node configuration types
//!
//! These types describe one board: which end of the link it is, where
//! the handshake wires land, and which optional peripherals are fitted.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::link::{CycleTiming, DemandThreshold, Role};
use crate::segments::BitOrder;

/// Highest pin number a configuration may name, exclusive
pub const MAX_PIN: u8 = 32;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    ///
    /// For handshake lines this also selects the release mode: a released
    /// line becomes an input with pull-up instead of a plain input.
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: false,
        }
    }

    /// Create a pin with pull-up enabled
    pub const fn with_pullup(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: true,
        }
    }
}

/// Handshake wiring and timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkConfig {
    /// DEMAND wire. An ADC input on the granter, a safe-driven line on
    /// the demander.
    pub demand_pin: PinConfig,
    /// GRANTED wire. A safe-driven line on the granter, a digital input
    /// on the demander.
    pub granted_pin: PinConfig,
    /// Granter only: fraction of the ADC range below which DEMAND is seen
    pub threshold: DemandThreshold,
    /// Delay between polls of the remote line
    pub poll_interval_ms: u32,
    /// Demander only: give up waiting for GRANTED after this long
    /// (0 waits forever)
    pub demand_timeout_ms: u32,
    /// Demander only: how long the resource is used once granted
    pub hold_ms: u32,
    /// Demander only: pause after releasing before demanding again
    pub retry_backoff_ms: u32,
}

impl LinkConfig {
    /// Granter wiring: DEMAND on ADC0, GRANTED released to a plain input
    pub const fn granter() -> Self {
        Self {
            demand_pin: PinConfig::new(26),
            granted_pin: PinConfig::new(15),
            threshold: DemandThreshold::QUARTER,
            poll_interval_ms: 10,
            demand_timeout_ms: 2000,
            hold_ms: 1000,
            retry_backoff_ms: 500,
        }
    }

    /// Demander wiring: both lines rest on the internal pull-ups
    pub const fn demander() -> Self {
        Self {
            demand_pin: PinConfig::with_pullup(14),
            granted_pin: PinConfig::with_pullup(15),
            ..Self::granter()
        }
    }

    /// Demander borrow-cycle timing
    pub const fn cycle_timing(&self) -> CycleTiming {
        CycleTiming {
            demand_timeout_ms: self.demand_timeout_ms,
            hold_ms: self.hold_ms,
            retry_backoff_ms: self.retry_backoff_ms,
        }
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self::granter()
    }
}

/// Shift-register display wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayHwConfig {
    /// Serial data (74HC595 DS)
    pub data_pin: PinConfig,
    /// Shift clock (SH_CP)
    pub clock_pin: PinConfig,
    /// Storage latch (ST_CP)
    pub latch_pin: PinConfig,
    /// Order in which pattern bits are shifted out
    pub bit_order: BitOrder,
}

impl Default for DisplayHwConfig {
    fn default() -> Self {
        Self {
            data_pin: PinConfig::new(10),
            clock_pin: PinConfig::new(11),
            latch_pin: PinConfig::new(12),
            bit_order: BitOrder::MsbFirst,
        }
    }
}

/// Accelerometer settings
///
/// The bus pins are fixed by the board (I2C0 on GPIO4/GPIO5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AccelHwConfig {
    /// 7-bit I2C address
    pub address: u8,
    /// Bus clock in Hz
    pub frequency: u32,
    /// Delay between samples
    pub sample_interval_ms: u32,
    /// Show the fault glyph when the sensor stops answering instead of
    /// treating the failed read as an all-zero sample
    pub report_sensor_fault: bool,
}

impl Default for AccelHwConfig {
    fn default() -> Self {
        Self {
            address: 0x68,
            frequency: 100_000,
            sample_interval_ms: 100,
            report_sensor_fault: false,
        }
    }
}

/// Error found while checking a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin number is not below [`MAX_PIN`]
    PinOutOfRange(u8),
    /// Pin is assigned to more than one function
    PinConflict(u8),
    /// A polling or sampling interval is zero
    ZeroInterval,
}

/// Complete node configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeConfig {
    /// Which end of the link this node is
    pub role: Role,
    /// Handshake wiring and timing
    pub link: LinkConfig,
    /// Orientation readout, if fitted
    pub display: Option<DisplayHwConfig>,
    /// Accelerometer, if fitted
    pub accel: Option<AccelHwConfig>,
    /// Status LED, lit while the resource is held or given
    pub led: Option<PinConfig>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::for_role(Role::Granter)
    }
}

impl NodeConfig {
    /// Defaults for the given role
    ///
    /// The granter carries the orientation readout; the demander only
    /// runs the handshake.
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Granter => Self {
                role,
                link: LinkConfig::granter(),
                display: Some(DisplayHwConfig::default()),
                accel: Some(AccelHwConfig::default()),
                led: Some(PinConfig::new(25)),
            },
            Role::Demander => Self {
                role,
                link: LinkConfig::demander(),
                display: None,
                accel: None,
                led: Some(PinConfig::new(25)),
            },
        }
    }

    /// Check if the orientation pipeline can run
    pub fn has_readout(&self) -> bool {
        self.display.is_some() && self.accel.is_some()
    }

    /// Check pin assignments and intervals
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut used: u32 = 0;
        let mut claim = |pin: PinConfig| -> Result<(), ConfigError> {
            if pin.pin >= MAX_PIN {
                return Err(ConfigError::PinOutOfRange(pin.pin));
            }
            let bit = 1u32 << pin.pin;
            if used & bit != 0 {
                return Err(ConfigError::PinConflict(pin.pin));
            }
            used |= bit;
            Ok(())
        };

        claim(self.link.demand_pin)?;
        claim(self.link.granted_pin)?;
        if let Some(display) = &self.display {
            claim(display.data_pin)?;
            claim(display.clock_pin)?;
            claim(display.latch_pin)?;
        }
        if let Some(led) = self.led {
            claim(led)?;
        }

        if self.link.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if matches!(self.accel, Some(accel) if accel.sample_interval_ms == 0) {
            return Err(ConfigError::ZeroInterval);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert_eq!(NodeConfig::for_role(Role::Granter).validate(), Ok(()));
        assert_eq!(NodeConfig::for_role(Role::Demander).validate(), Ok(()));
    }

    #[test]
    fn test_role_defaults() {
        let granter = NodeConfig::default();
        assert_eq!(granter.role, Role::Granter);
        assert!(granter.has_readout());
        assert!(!granter.link.granted_pin.pull_up);

        let demander = NodeConfig::for_role(Role::Demander);
        assert!(!demander.has_readout());
        assert!(demander.link.demand_pin.pull_up);
        assert!(demander.link.granted_pin.pull_up);
        assert_eq!(demander.link.hold_ms, granter.link.hold_ms);
    }

    #[test]
    fn test_pin_conflict() {
        let mut config = NodeConfig::default();
        config.led = Some(PinConfig::new(config.link.granted_pin.pin));
        assert_eq!(config.validate(), Err(ConfigError::PinConflict(15)));

        // Dropping the display frees its pins
        let mut config = NodeConfig::default();
        config.led = Some(PinConfig::new(10));
        assert_eq!(config.validate(), Err(ConfigError::PinConflict(10)));
        config.display = None;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_pin_out_of_range() {
        let mut config = NodeConfig::default();
        config.link.demand_pin = PinConfig::new(40);
        assert_eq!(config.validate(), Err(ConfigError::PinOutOfRange(40)));
    }

    #[test]
    fn test_zero_interval() {
        let mut config = NodeConfig::default();
        config.link.poll_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroInterval));

        let mut config = NodeConfig::default();
        if let Some(accel) = config.accel.as_mut() {
            accel.sample_interval_ms = 0;
        }
        assert_eq!(config.validate(), Err(ConfigError::ZeroInterval));
    }
}
