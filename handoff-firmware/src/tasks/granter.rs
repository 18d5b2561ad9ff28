//! Granter polling task
//!
//! Samples DEMAND on every tick and drives GRANTED to follow it.

use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::channels::LINK_PHASE;
use crate::tasks::LinkGranter;

/// Granter task
///
/// Runs one sense-then-drive cycle per tick. Phase changes are logged
/// and published to [`LINK_PHASE`].
#[embassy_executor::task]
pub async fn granter_task(mut granter: LinkGranter, poll_interval_ms: u32) {
    info!("Granter task started");

    let mut ticker = Ticker::every(Duration::from_millis(poll_interval_ms as u64));
    let mut failures = 0;
    LINK_PHASE.signal(granter.phase());

    loop {
        let step = granter.poll();

        if step.changed() {
            info!("Link: {:?} -> {:?}", step.previous, step.current);
            LINK_PHASE.signal(step.current);
        }

        let total = granter.demand_input().failures();
        if total != failures {
            warn!("DEMAND sample failed ({} total), read as no demand", total);
            failures = total;
        }

        ticker.next().await;
    }
}
