//! Demander cycle task
//!
//! Requests the resource, holds it for a while, gives it back, then
//! waits before asking again.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use handoff_core::config::LinkConfig;
use handoff_core::link::{CycleEvent, DemandCycle};

use crate::channels::LINK_PHASE;
use crate::tasks::LinkDemander;

/// Demander task
///
/// Drives a [`DemandCycle`] once per poll tick:
/// 1. Assert DEMAND
/// 2. Poll GRANTED until granted, or until `demand_timeout_ms` passes
///    (0 waits forever)
/// 3. Hold the resource for `hold_ms`; if GRANTED drops, go back to 2
/// 4. Release DEMAND and back off for `retry_backoff_ms`
#[embassy_executor::task]
pub async fn demander_task(demander: LinkDemander, link: LinkConfig) {
    info!("Demander task started");

    LINK_PHASE.signal(demander.phase());
    let mut cycle = DemandCycle::new(demander, link.cycle_timing());
    let mut ticker = Ticker::every(Duration::from_millis(link.poll_interval_ms as u64));
    let start = Instant::now();

    loop {
        let now_ms = start.elapsed().as_millis() as u32;
        let tick = cycle.tick(now_ms);

        match tick.event {
            Some(CycleEvent::Granted) => info!("Resource granted, holding for {}ms", link.hold_ms),
            Some(CycleEvent::Completed) => info!("Resource released"),
            Some(CycleEvent::GrantWithdrawn) => warn!("Grant withdrawn while holding, waiting again"),
            Some(CycleEvent::TimedOut) => {
                warn!("No grant after {}ms, giving up", link.demand_timeout_ms)
            }
            Some(CycleEvent::Requested) => debug!("Requesting resource"),
            None => {}
        }

        if tick.step.changed() {
            info!("Link: {:?} -> {:?}", tick.step.previous, tick.step.current);
            LINK_PHASE.signal(tick.step.current);
        }

        ticker.next().await;
    }
}
