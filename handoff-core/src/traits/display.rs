//! Segment display trait

use crate::segments::SegmentPattern;

/// Trait for a single 7-segment digit
///
/// `show` must update the visible digit atomically: a viewer never sees a
/// mix of the old and new pattern. Bit-banged implementations achieve
/// this with a separate latch strobe.
pub trait SegmentDisplay {
    /// Replace the visible pattern
    fn show(&mut self, pattern: SegmentPattern);

    /// Turn every segment off
    fn blank(&mut self) {
        self.show(SegmentPattern::BLANK);
    }
}
