//! DEMAND/GRANTED resource handshake
//!
//! Two nodes share one resource over two open-drain style wires:
//!
//! ```text
//!   demander                         granter
//!  ┌─────────┐   DEMAND (low = want)  ┌─────────┐
//!  │  flex   │───────────────────────▶│  ADC    │
//!  │  input  │◀───────────────────────│  flex   │
//!  └─────────┘   GRANTED (low = ok)   └─────────┘
//! ```
//!
//! Each wire has exactly one driver. The driver only ever pulls its wire
//! low or lets it float back up (see [`line::SafeLine`]), so the two sides
//! can never fight over a level.
//!
//! The protocol is caller-driven: nothing here sleeps, and
//! [`cycle::DemandCycle`] takes the current time from its caller.

pub mod cycle;
pub mod demander;
pub mod granter;
pub mod line;
pub mod protocol;
pub mod threshold;

pub use cycle::{CycleEvent, CycleStage, CycleTick, CycleTiming, DemandCycle};
pub use demander::Demander;
pub use granter::Granter;
pub use line::SafeLine;
pub use protocol::{Event, Phase, Role, Step};
pub use threshold::DemandThreshold;
