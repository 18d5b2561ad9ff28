//! `node.toml` parser
//!
//! A minimal line-based parser covering only what a node file uses,
//! not general TOML.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - Hex integers (`0x68`)
//! - [section] headers
//! - Comments (# ...)
//!
//! The root `role` key must come before any section, since it selects the
//! defaults the sections then override.

use super::types::{AccelHwConfig, DisplayHwConfig, NodeConfig, PinConfig};
use crate::link::{DemandThreshold, Role};
use crate::segments::BitOrder;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid or unknown section header
    InvalidSection,
    /// Unknown key for the current section
    InvalidKey,
    /// Invalid value type
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
    /// `role` missing, or given after a section
    MissingRole,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Link,
    Display,
    Accel,
    Led,
    /// Section switched off with `enabled = false`; remaining keys ignored
    Disabled,
}

/// Parse a node file into a [`NodeConfig`]
///
/// Sections absent from the file keep the role's defaults. Naming a
/// section the role does not fit by default (e.g. `[display]` on a
/// demander) enables it with default wiring.
pub fn parse_config(input: &str) -> Result<NodeConfig, ParseError> {
    let mut config: Option<NodeConfig> = None;
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            let config = config.as_mut().ok_or(ParseError::MissingRole)?;
            section = parse_section_header(&line[1..line.len() - 1])?;

            match section {
                Section::Display => {
                    config.display.get_or_insert_with(DisplayHwConfig::default);
                }
                Section::Accel => {
                    config.accel.get_or_insert_with(AccelHwConfig::default);
                }
                Section::Led => {
                    config.led.get_or_insert(PinConfig::new(25));
                }
                Section::Root | Section::Link | Section::Disabled => {}
            }
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;

        if section == Section::Root {
            if key != "role" {
                return Err(ParseError::InvalidKey);
            }
            config = Some(NodeConfig::for_role(parse_role(value)?));
            continue;
        }

        let config = config.as_mut().ok_or(ParseError::MissingRole)?;
        section = apply_value(section, key, value, config)?;
    }

    config.ok_or(ParseError::MissingRole)
}

/// Parse section header like "link" or "display"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "link" => Ok(Section::Link),
        "display" => Ok(Section::Display),
        "accel" => Ok(Section::Accel),
        "led" => Ok(Section::Led),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = match value.find('#') {
        // Make sure # is not inside a string
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Apply one key to the section being parsed
///
/// Returns the section subsequent keys belong to.
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut NodeConfig,
) -> Result<Section, ParseError> {
    if key == "enabled" && section != Section::Link {
        if parse_bool(value)? {
            return Ok(section);
        }
        match section {
            Section::Display => config.display = None,
            Section::Accel => config.accel = None,
            Section::Led => config.led = None,
            Section::Root | Section::Link | Section::Disabled => {}
        }
        return Ok(Section::Disabled);
    }

    match section {
        Section::Root => return Err(ParseError::InvalidKey),
        Section::Disabled => {}
        Section::Link => {
            let link = &mut config.link;
            match key {
                "demand_pin" => link.demand_pin = parse_pin(value)?,
                "granted_pin" => link.granted_pin = parse_pin(value)?,
                "threshold" => link.threshold = parse_threshold(value)?,
                "poll_interval_ms" => link.poll_interval_ms = parse_int(value)?,
                "demand_timeout_ms" => link.demand_timeout_ms = parse_int(value)?,
                "hold_ms" => link.hold_ms = parse_int(value)?,
                "retry_backoff_ms" => link.retry_backoff_ms = parse_int(value)?,
                _ => return Err(ParseError::InvalidKey),
            }
        }
        Section::Display => {
            let display = config.display.get_or_insert_with(DisplayHwConfig::default);
            match key {
                "data_pin" => display.data_pin = parse_pin(value)?,
                "clock_pin" => display.clock_pin = parse_pin(value)?,
                "latch_pin" => display.latch_pin = parse_pin(value)?,
                "bit_order" => display.bit_order = parse_bit_order(value)?,
                _ => return Err(ParseError::InvalidKey),
            }
        }
        Section::Accel => {
            let accel = config.accel.get_or_insert_with(AccelHwConfig::default);
            match key {
                "address" => accel.address = parse_int(value)?,
                "frequency" => accel.frequency = parse_int(value)?,
                "sample_interval_ms" => accel.sample_interval_ms = parse_int(value)?,
                "report_sensor_fault" => accel.report_sensor_fault = parse_bool(value)?,
                _ => return Err(ParseError::InvalidKey),
            }
        }
        Section::Led => match key {
            "pin" => config.led = Some(parse_pin(value)?),
            _ => return Err(ParseError::InvalidKey),
        },
    }

    Ok(section)
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse a decimal or `0x` hex integer
fn parse_int<T: TryFrom<u32>>(value: &str) -> Result<T, ParseError> {
    let raw = match value.strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse(),
    }
    .map_err(|_| ParseError::InvalidValue)?;
    T::try_from(raw).map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_role(value: &str) -> Result<Role, ParseError> {
    match parse_string(value) {
        "granter" => Ok(Role::Granter),
        "demander" => Ok(Role::Demander),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_bit_order(value: &str) -> Result<BitOrder, ParseError> {
    match parse_string(value) {
        "msb_first" | "msb" => Ok(BitOrder::MsbFirst),
        "lsb_first" | "lsb" => Ok(BitOrder::LsbFirst),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a threshold fraction like "1/4"
fn parse_threshold(value: &str) -> Result<DemandThreshold, ParseError> {
    let (num, den) = parse_string(value)
        .split_once('/')
        .ok_or(ParseError::InvalidValue)?;
    let num: u16 = num.trim().parse().map_err(|_| ParseError::InvalidValue)?;
    let den: u16 = den.trim().parse().map_err(|_| ParseError::InvalidValue)?;
    DemandThreshold::new(num, den).ok_or(ParseError::InvalidValue)
}

/// Parse a pin string like "gpio11", "!gpio12", "^gpio4"
pub fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let mut s = parse_string(value);
    let mut inverted = false;
    let mut pull_up = false;

    // Check for modifiers
    loop {
        if let Some(rest) = s.strip_prefix('!') {
            inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let pin = s
        .strip_prefix("gpio")
        .ok_or(ParseError::InvalidPin)?
        .parse::<u8>()
        .map_err(|_| ParseError::InvalidPin)?;

    Ok(PinConfig {
        pin,
        inverted,
        pull_up,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pin() {
        assert_eq!(parse_pin("\"gpio11\""), Ok(PinConfig::new(11)));
        assert_eq!(parse_pin("\"!gpio12\""), Ok(PinConfig::inverted(12)));
        assert_eq!(parse_pin("\"^gpio4\""), Ok(PinConfig::with_pullup(4)));

        let both = parse_pin("\"!^gpio7\"").unwrap();
        assert!(both.inverted && both.pull_up);

        assert_eq!(parse_pin("\"pin11\""), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin("\"gpio\""), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin("\"gpio-1\""), Err(ParseError::InvalidPin));
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int::<u8>("0x68"), Ok(0x68));
        assert_eq!(parse_int::<u32>("400000"), Ok(400_000));
        assert_eq!(parse_int::<u8>("300"), Err(ParseError::InvalidValue));
        assert_eq!(parse_int::<u32>("fast"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_parse_threshold() {
        assert_eq!(parse_threshold("\"1/4\""), Ok(DemandThreshold::QUARTER));
        assert_eq!(parse_threshold("\"1 / 2\"").map(|t| t.denominator()), Ok(2));
        assert_eq!(parse_threshold("\"5/4\""), Err(ParseError::InvalidValue));
        assert_eq!(parse_threshold("\"0.25\""), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = parse_config("role = \"demander\"\n").unwrap();
        assert_eq!(config, NodeConfig::for_role(Role::Demander));
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
# Bench granter
role = "granter"

[link]
demand_pin = "gpio27"
granted_pin = "^gpio16"   # external pull-up not fitted
threshold = "1/3"
poll_interval_ms = 5

[display]
data_pin = "gpio2"
clock_pin = "gpio3"
latch_pin = "gpio6"
bit_order = "lsb_first"

[accel]
address = 0x69
report_sensor_fault = true

[led]
pin = "!gpio25"
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.role, Role::Granter);
        assert_eq!(config.link.demand_pin, PinConfig::new(27));
        assert_eq!(config.link.granted_pin, PinConfig::with_pullup(16));
        assert_eq!(config.link.threshold, DemandThreshold::new(1, 3).unwrap());
        assert_eq!(config.link.poll_interval_ms, 5);

        let display = config.display.unwrap();
        assert_eq!(display.latch_pin, PinConfig::new(6));
        assert_eq!(display.bit_order, BitOrder::LsbFirst);

        let accel = config.accel.unwrap();
        assert_eq!(accel.address, 0x69);
        assert!(accel.report_sensor_fault);
        // Unset keys keep their defaults
        assert_eq!(accel.frequency, 100_000);

        assert_eq!(config.led, Some(PinConfig::inverted(25)));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_disable_section() {
        let toml = "role = \"granter\"\n[display]\nenabled = false\ndata_pin = \"gpio2\"\n";
        let config = parse_config(toml).unwrap();
        assert_eq!(config.display, None);
        assert!(config.accel.is_some());
    }

    #[test]
    fn test_section_enables_peripheral() {
        let toml = "role = \"demander\"\n[accel]\n";
        let config = parse_config(toml).unwrap();
        assert_eq!(config.accel, Some(AccelHwConfig::default()));

        let toml = "role = \"demander\"\n[display]\nlatch_pin = \"gpio9\"\n";
        let display = parse_config(toml).unwrap().display.unwrap();
        assert_eq!(display.latch_pin, PinConfig::new(9));
        assert_eq!(display.data_pin, DisplayHwConfig::default().data_pin);
    }

    #[test]
    fn test_missing_role() {
        assert_eq!(parse_config(""), Err(ParseError::MissingRole));
        assert_eq!(
            parse_config("[link]\nhold_ms = 10\nrole = \"granter\"\n"),
            Err(ParseError::MissingRole)
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_config("role = \"observer\"\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("role = \"granter\"\n[stepper]\n"),
            Err(ParseError::InvalidSection)
        );
        assert_eq!(
            parse_config("role = \"granter\"\n[link]\nspeed = 3\n"),
            Err(ParseError::InvalidKey)
        );
        assert_eq!(
            parse_config("role = \"granter\"\n[link]\ndemand_pin = \"adc0\"\n"),
            Err(ParseError::InvalidPin)
        );
        assert_eq!(
            parse_config("role = \"granter\"\nnot a pair\n"),
            Err(ParseError::InvalidValue)
        );
    }
}
