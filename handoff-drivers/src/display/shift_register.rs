//! 7-segment digit behind a serial-in, latched shift register
//!
//! Three GPIOs bit-bang a 74HC595 style part:
//!
//! ```text
//!  DATA  ──┬─ bit ─┬─ bit ─ ... ─┬─ bit ─┬─ low ────────────
//!  CLOCK ──┘  ┌┐   └  ┌┐         └  ┌┐   └──────────────────
//!             └┘      └┘            └┘
//!  LATCH ────────────────────────────────────────┐┌────────
//!                                                └┘
//! ```
//!
//! Every rising clock edge shifts one bit in; the outputs only change on
//! the single latch pulse at the end, so the digit never shows a partly
//! shifted pattern.

use handoff_core::segments::{BitOrder, SegmentPattern};
use handoff_core::traits::SegmentDisplay;
use handoff_hal::gpio::OutputPin;

/// Shift-register display driver
pub struct ShiftRegister<D, C, L> {
    data: D,
    clock: C,
    latch: L,
    order: BitOrder,
}

impl<D: OutputPin, C: OutputPin, L: OutputPin> ShiftRegister<D, C, L> {
    /// Create a driver with all three lines idle low
    pub fn new(data: D, clock: C, latch: L, order: BitOrder) -> Self {
        let mut display = Self {
            data,
            clock,
            latch,
            order,
        };
        display.data.set_low();
        display.clock.set_low();
        display.latch.set_low();
        display
    }

    /// Shift out one pattern and latch it
    ///
    /// Takes `&mut self`, so a write always runs to completion before the
    /// bus can be touched again.
    pub fn write(&mut self, pattern: SegmentPattern) {
        for bit in pattern.serial_bits(self.order) {
            self.data.set_state(bit);
            self.clock.set_high();
            self.clock.set_low();
        }
        self.data.set_low();

        self.latch.set_high();
        self.latch.set_low();
    }

    /// Configured bit order
    pub fn bit_order(&self) -> BitOrder {
        self.order
    }

    /// Release the pins
    pub fn free(self) -> (D, C, L) {
        (self.data, self.clock, self.latch)
    }
}

impl<D: OutputPin, C: OutputPin, L: OutputPin> SegmentDisplay for ShiftRegister<D, C, L> {
    fn show(&mut self, pattern: SegmentPattern) {
        self.write(pattern);
    }
}
