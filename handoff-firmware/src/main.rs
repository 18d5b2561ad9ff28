//! Handoff - resource handshake and tilt display firmware
//!
//! Main firmware binary for RP2040-based boards. One build serves both
//! ends of the DEMAND/GRANTED link; `role` in node.toml picks the end.
//! The granter node can also carry the MPU-6050 tilt readout.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc};
use {defmt_rtt as _, panic_probe as _};

use handoff_core::config::{AccelHwConfig, DisplayHwConfig, LinkConfig, NodeConfig};
use handoff_core::link::{Demander, Granter, Role};
use handoff_core::orientation::{Orientation, OrientationTracker, TiltReadout};
use handoff_drivers::accel::Mpu6050;
use handoff_drivers::display::ShiftRegister;
use handoff_drivers::indicator::StatusLed;
use handoff_hal::i2c::I2cConfig;
use handoff_hal_rp2040::{
    accel_bus, AccelBus, AdcPins, PinBank, PinError, RpAnalogInput, RpFlex, RpInput, RpOutput,
};

use crate::config::load_config;
use crate::tasks::{Led, LinkDemander, LinkGranter, Readout};

/// Embedded node configuration (compiled into firmware)
/// Edit node.toml and rebuild to change the wiring or role
const EMBEDDED_CONFIG: &str = include_str!("../node.toml");

mod channels;
mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Handoff firmware starting...");

    let p = embassy_rp::init(Default::default());
    let (mut bank, mut adc_pins, board) = handoff_hal_rp2040::split(p);
    info!("Peripherals initialized");

    let config = load_config(EMBEDDED_CONFIG);

    // Link first so the handshake lines leave reset in the released state
    // before anything slower runs
    match config.role {
        Role::Granter => {
            match build_granter(&mut bank, &mut adc_pins, board.adc, &config.link) {
                Ok(granter) => spawner
                    .spawn(tasks::granter_task(granter, config.link.poll_interval_ms))
                    .unwrap(),
                Err(e) => error!("Granter pins unavailable: {:?}", e),
            }
        }
        Role::Demander => match build_demander(&mut bank, &config.link) {
            Ok(demander) => spawner
                .spawn(tasks::demander_task(demander, config.link))
                .unwrap(),
            Err(e) => error!("Demander pins unavailable: {:?}", e),
        },
    }

    if let (Some(display), Some(accel)) = (config.display, config.accel) {
        let bus = accel_bus(
            board.i2c0,
            board.i2c0_sda,
            board.i2c0_scl,
            I2cConfig::clamped(accel.frequency),
        );
        match build_readout(&mut bank, bus, &display, &accel) {
            Ok(readout) => spawner
                .spawn(tasks::orientation_task(readout, accel.sample_interval_ms))
                .unwrap(),
            Err(e) => error!("Display pins unavailable: {:?}", e),
        }
    }

    if let Some(led) = build_led(&mut bank, &config) {
        spawner.spawn(tasks::status_task(led)).unwrap();
    }

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Wire the granter: DEMAND through the ADC, GRANTED on a flex pin
fn build_granter(
    bank: &mut PinBank,
    adc_pins: &mut AdcPins,
    adc: embassy_rp::Peri<'static, embassy_rp::peripherals::ADC>,
    link: &LinkConfig,
) -> Result<LinkGranter, PinError> {
    let channel = adc_pins.take_channel(link.demand_pin.pin)?;
    let granted = RpFlex::new(bank.take(link.granted_pin.pin)?);
    let demand = RpAnalogInput::new(Adc::new_blocking(adc, adc::Config::default()), channel);

    Ok(Granter::new(
        demand,
        granted,
        link.granted_pin.pull_up,
        link.threshold,
    ))
}

/// Wire the demander: DEMAND on a flex pin, GRANTED on a plain input
fn build_demander(bank: &mut PinBank, link: &LinkConfig) -> Result<LinkDemander, PinError> {
    let demand = RpFlex::new(bank.take(link.demand_pin.pin)?);
    let granted = RpInput::new(bank.take(link.granted_pin.pin)?, link.granted_pin.pull_up);

    Ok(Demander::new(demand, link.demand_pin.pull_up, granted))
}

/// Bring up the MPU-6050 and the shift-register digit
fn build_readout(
    bank: &mut PinBank,
    bus: AccelBus,
    display: &DisplayHwConfig,
    accel: &AccelHwConfig,
) -> Result<Readout, PinError> {
    let data = RpOutput::new(bank.take(display.data_pin.pin)?);
    let clock = RpOutput::new(bank.take(display.clock_pin.pin)?);
    let latch = RpOutput::new(bank.take(display.latch_pin.pin)?);
    let digit = ShiftRegister::new(data, clock, latch, display.bit_order);

    let mut mpu = Mpu6050::new(bus, accel.address);
    match mpu.init() {
        Ok(()) => info!("MPU-6050 ready at {:#x}", accel.address),
        Err(e) => warn!("MPU-6050 init failed: {:?}, readout continues", e),
    }

    let tracker = OrientationTracker::new(Orientation::Flat, accel.report_sensor_fault);
    Ok(TiltReadout::new(mpu, digit, tracker))
}

fn build_led(bank: &mut PinBank, config: &NodeConfig) -> Option<Led> {
    let pin = config.led?;
    match bank.take(pin.pin) {
        Ok(p) => Some(StatusLed::new(RpOutput::new(p), pin.inverted)),
        Err(e) => {
            error!("LED pin gpio{} unavailable: {:?}", pin.pin, e);
            None
        }
    }
}
