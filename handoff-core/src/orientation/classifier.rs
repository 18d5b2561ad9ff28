//! Dominant-axis orientation classifier

use crate::segments::SegmentPattern;

/// Board orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    /// Face up
    #[default]
    Flat,
    /// Face down
    BaseUp,
    /// Landscape, right way round
    LandscapeRight,
    /// Landscape, upside down
    LandscapeUpsideDown,
    /// Portrait, rotated right
    PortraitRight,
    /// Portrait, rotated left
    PortraitLeft,
}

impl Orientation {
    /// Every orientation, in declaration order
    pub const ALL: [Orientation; 6] = [
        Orientation::Flat,
        Orientation::BaseUp,
        Orientation::LandscapeRight,
        Orientation::LandscapeUpsideDown,
        Orientation::PortraitRight,
        Orientation::PortraitLeft,
    ];

    /// Single-character code used in logs and on the serial console
    pub const fn code(&self) -> char {
        match self {
            Orientation::Flat => 'F',
            Orientation::BaseUp => 'b',
            Orientation::LandscapeRight => 'L',
            Orientation::LandscapeUpsideDown => 'U',
            Orientation::PortraitRight => 'R',
            Orientation::PortraitLeft => 'l',
        }
    }

    /// Parse a code produced by [`Orientation::code`]
    ///
    /// `B` is accepted for base-up as well.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'F' => Some(Orientation::Flat),
            'b' | 'B' => Some(Orientation::BaseUp),
            'L' => Some(Orientation::LandscapeRight),
            'U' => Some(Orientation::LandscapeUpsideDown),
            'R' => Some(Orientation::PortraitRight),
            'l' => Some(Orientation::PortraitLeft),
            _ => None,
        }
    }

    /// Glyph shown on the 7-segment readout
    pub const fn pattern(&self) -> SegmentPattern {
        match self {
            Orientation::Flat => SegmentPattern::LETTER_F,
            Orientation::BaseUp => SegmentPattern::LETTER_B,
            Orientation::LandscapeRight => SegmentPattern::LETTER_L,
            Orientation::LandscapeUpsideDown => SegmentPattern::LETTER_U,
            Orientation::PortraitRight => SegmentPattern::INDICATOR_RIGHT,
            Orientation::PortraitLeft => SegmentPattern::INDICATOR_LEFT,
        }
    }
}

/// Raw tri-axis acceleration, in sensor counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl AccelSample {
    /// All axes zero
    ///
    /// Note: a disconnected sensor on a bus that reads back zeros produces
    /// exactly this sample, and nothing downstream can tell the difference.
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a sample
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Decode three consecutive big-endian axis registers (X, Y, Z)
    pub const fn from_be_bytes(raw: [u8; 6]) -> Self {
        Self {
            x: i16::from_be_bytes([raw[0], raw[1]]),
            y: i16::from_be_bytes([raw[2], raw[3]]),
            z: i16::from_be_bytes([raw[4], raw[5]]),
        }
    }
}

/// Classify one sample
///
/// Three dominance checks run in a fixed order: Z, then Y, then X. Each
/// check that holds strictly overwrites the result of the earlier ones.
/// The sign of X picks between the two orientations of every pair. When
/// no axis strictly dominates (ties, or an all-zero reading) the previous
/// orientation is returned unchanged.
pub fn classify(prev: Orientation, sample: AccelSample) -> Orientation {
    let AccelSample { x, y, z } = sample;
    let (ax, ay, az) = (x.unsigned_abs(), y.unsigned_abs(), z.unsigned_abs());
    let x_positive = x > 0;

    let mut orientation = prev;

    if az > ax && az > ay {
        orientation = if x_positive {
            Orientation::LandscapeRight
        } else {
            Orientation::LandscapeUpsideDown
        };
    }

    if ay > ax && ay > az {
        orientation = if x_positive {
            Orientation::Flat
        } else {
            Orientation::BaseUp
        };
    }

    if ax > ay && ax > az {
        orientation = if x_positive {
            Orientation::PortraitRight
        } else {
            Orientation::PortraitLeft
        };
    }

    orientation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_x_dominant() {
        let prev = Orientation::Flat;
        assert_eq!(
            classify(prev, AccelSample::new(100, 10, 10)),
            Orientation::PortraitRight
        );
        assert_eq!(
            classify(prev, AccelSample::new(-100, 10, 10)),
            Orientation::PortraitLeft
        );
    }

    #[test]
    fn test_z_dominant() {
        let prev = Orientation::Flat;
        assert_eq!(
            classify(prev, AccelSample::new(10, 10, 100)),
            Orientation::LandscapeRight
        );
        assert_eq!(
            classify(prev, AccelSample::new(-10, 10, 100)),
            Orientation::LandscapeUpsideDown
        );
        // Sign of Z itself does not matter
        assert_eq!(
            classify(prev, AccelSample::new(10, 10, -100)),
            Orientation::LandscapeRight
        );
    }

    #[test]
    fn test_y_dominant() {
        let prev = Orientation::PortraitLeft;
        assert_eq!(classify(prev, AccelSample::new(5, 100, 10)), Orientation::Flat);
        assert_eq!(classify(prev, AccelSample::new(-5, 100, 10)), Orientation::BaseUp);
        // Zero X counts as not positive
        assert_eq!(classify(prev, AccelSample::new(0, -100, 10)), Orientation::BaseUp);
    }

    #[test]
    fn test_zero_keeps_previous() {
        for prev in Orientation::ALL {
            assert_eq!(classify(prev, AccelSample::ZERO), prev);
        }
    }

    #[test]
    fn test_ties_keep_previous() {
        let prev = Orientation::LandscapeUpsideDown;
        assert_eq!(classify(prev, AccelSample::new(50, 50, 50)), prev);
        assert_eq!(classify(prev, AccelSample::new(50, -50, 10)), prev);
        assert_eq!(classify(prev, AccelSample::new(10, 50, -50)), prev);
        assert_eq!(classify(prev, AccelSample::new(-50, 10, 50)), prev);
    }

    #[test]
    fn test_extreme_values() {
        // i16::MIN has no positive counterpart; unsigned_abs keeps it ordered
        assert_eq!(
            classify(Orientation::Flat, AccelSample::new(i16::MIN, i16::MAX, 0)),
            Orientation::PortraitLeft
        );
    }

    #[test]
    fn test_codes_round_trip() {
        for orientation in Orientation::ALL {
            assert_eq!(Orientation::from_code(orientation.code()), Some(orientation));
        }
        assert_eq!(Orientation::from_code('B'), Some(Orientation::BaseUp));
        assert_eq!(Orientation::from_code('x'), None);
    }

    #[test]
    fn test_patterns_distinct() {
        for (i, a) in Orientation::ALL.iter().enumerate() {
            for b in &Orientation::ALL[i + 1..] {
                assert_ne!(a.pattern(), b.pattern());
            }
        }
    }

    #[test]
    fn test_from_be_bytes() {
        let sample = AccelSample::from_be_bytes([0x01, 0x00, 0xFF, 0x38, 0x40, 0x00]);
        assert_eq!(sample, AccelSample::new(256, -200, 16384));
    }
}
