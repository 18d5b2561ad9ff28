//! Inter-task communication channels
//!
//! Defines the static signals used for communication between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use handoff_core::link::Phase;

/// Handshake phase, updated by whichever link task runs on this node
pub static LINK_PHASE: Signal<CriticalSectionRawMutex, Phase> = Signal::new();
