//! Build script for handoff-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates node.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sections the firmware understands
const SECTIONS: &[&str] = &["link", "display", "accel", "led"];

/// GPIOs wired to I2C0 for the accelerometer
const I2C_PINS: &[u8] = &[4, 5];

/// ADC-capable GPIOs, usable only as the granter's DEMAND input
const ADC_PINS: &[u8] = &[26, 27, 28, 29];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate node.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=node.toml");

    let config_path = Path::new("node.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: node.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a node.toml configuration file.           ║\n\
            ║  Please create one in the handoff-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read node.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in node.toml                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_structure(&config, &mut errors);
    validate_pins(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid node configuration                               ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=node.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check the role key and the section names
fn validate_structure(config: &toml::Value, errors: &mut Vec<String>) {
    match config.get("role") {
        Some(toml::Value::String(role)) if role == "granter" || role == "demander" => {}
        Some(_) => errors.push("role must be 'granter' or 'demander'".to_string()),
        None => errors.push("Missing 'role' - must be 'granter' or 'demander'".to_string()),
    }

    let Some(table) = config.as_table() else {
        return;
    };

    for (key, value) in table {
        if key == "role" {
            continue;
        }
        if !value.is_table() {
            errors.push(format!("Unknown top-level key '{}'", key));
        } else if !SECTIONS.contains(&key.as_str()) {
            errors.push(format!("Unknown section [{}]", key));
        }
    }

    if let Some(toml::Value::String(threshold)) = config.get("link").and_then(|l| l.get("threshold")) {
        let valid = threshold
            .split_once('/')
            .and_then(|(n, d)| Some((n.trim().parse::<u16>().ok()?, d.trim().parse::<u16>().ok()?)))
            .is_some_and(|(n, d)| n > 0 && n <= d);
        if !valid {
            errors.push(format!("[link] threshold '{}' must be a fraction like '1/4'", threshold));
        }
    }
}

/// Parse a pin string like "gpio11", "!gpio12", "^gpio4"
fn parse_pin(s: &str) -> Option<u8> {
    let s = s.trim_start_matches(['!', '^']);
    let pin: u8 = s.strip_prefix("gpio")?.parse().ok()?;
    (pin < 30).then_some(pin)
}

/// Check pin strings, reserved pins and duplicates
fn validate_pins(config: &toml::Value, errors: &mut Vec<String>) {
    let enabled = |section: &str| {
        config
            .get(section)
            .and_then(|s| s.get("enabled"))
            .and_then(|e| e.as_bool())
            .unwrap_or(true)
    };

    let is_granter = config.get("role").and_then(|r| r.as_str()) == Some("granter");
    let mut used: Vec<(u8, String)> = Vec::new();

    let pin_keys: &[(&str, &[&str])] = &[
        ("link", &["demand_pin", "granted_pin"]),
        ("display", &["data_pin", "clock_pin", "latch_pin"]),
        ("led", &["pin"]),
    ];

    for (section, keys) in pin_keys {
        if !enabled(*section) {
            continue;
        }
        for key in *keys {
            let Some(value) = config.get(*section).and_then(|s| s.get(*key)) else {
                continue;
            };
            let name = format!("[{}] {}", section, key);

            let Some(pin) = value.as_str().and_then(parse_pin) else {
                errors.push(format!("{} must be a pin string like \"gpio11\"", name));
                continue;
            };

            if I2C_PINS.contains(&pin) {
                errors.push(format!("{} uses gpio{}, reserved for I2C0", name, pin));
            }
            let adc_sense = is_granter && *section == "link" && *key == "demand_pin";
            if ADC_PINS.contains(&pin) && !adc_sense {
                errors.push(format!("{} uses gpio{}, reserved for the ADC", name, pin));
            }
            if let Some((_, other)) = used.iter().find(|(p, _)| *p == pin) {
                errors.push(format!("{} and {} both use gpio{}", name, other, pin));
            }
            used.push((pin, name));
        }
    }

    // The granter senses DEMAND through the ADC
    let demand_pin = config
        .get("link")
        .and_then(|l| l.get("demand_pin"))
        .and_then(|p| p.as_str())
        .and_then(parse_pin);
    if let (true, Some(pin)) = (is_granter, demand_pin) {
        if !ADC_PINS.contains(&pin) {
            errors.push(format!("[link] demand_pin gpio{} has no ADC (use gpio26-29)", pin));
        }
    }
}
