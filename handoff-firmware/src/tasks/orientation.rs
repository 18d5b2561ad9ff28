//! Orientation readout task

use defmt::*;
use embassy_time::{Duration, Ticker};

use handoff_core::orientation::TrackerOutcome;

use crate::tasks::Readout;

/// Orientation task
///
/// Samples the accelerometer once per tick. The readout only touches
/// the display when the glyph changes.
#[embassy_executor::task]
pub async fn orientation_task(mut readout: Readout, sample_interval_ms: u32) {
    info!("Orientation task started");

    let mut ticker = Ticker::every(Duration::from_millis(sample_interval_ms as u64));

    loop {
        match readout.step() {
            TrackerOutcome::Changed { from, to } => {
                info!("Orientation: {:?} -> {:?} ('{}')", from, to, to.code());
            }
            TrackerOutcome::Unchanged(orientation) => {
                trace!("Orientation: {:?}", orientation);
            }
            TrackerOutcome::SensorUnavailable(e) => {
                warn!("Accelerometer unavailable: {:?}", e);
            }
        }

        ticker.next().await;
    }
}
