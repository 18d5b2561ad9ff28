//! Status LED task

use defmt::*;

use crate::channels::LINK_PHASE;
use crate::tasks::Led;

/// Light the LED while this node holds or hands out the resource
#[embassy_executor::task]
pub async fn status_task(mut led: Led) {
    info!("Status task started");

    loop {
        let phase = LINK_PHASE.wait().await;
        led.set(phase.holds_resource());
    }
}
