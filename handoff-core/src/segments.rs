//! 7-segment glyphs
//!
//! Bit layout of a pattern byte, as wired to the shift register outputs:
//!
//! ```text
//!      A            bit 0 = A      bit 4 = E
//!    F   B          bit 1 = B      bit 5 = F
//!      G            bit 2 = C      bit 6 = G
//!    E   C          bit 3 = D      bit 7 = unused (DP)
//!      D
//! ```

/// Segment bit masks
pub mod seg {
    pub const A: u8 = 0b0000_0001;
    pub const B: u8 = 0b0000_0010;
    pub const C: u8 = 0b0000_0100;
    pub const D: u8 = 0b0000_1000;
    pub const E: u8 = 0b0001_0000;
    pub const F: u8 = 0b0010_0000;
    pub const G: u8 = 0b0100_0000;
}

/// Order in which pattern bits leave the serializer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BitOrder {
    /// Bit 7 first (74HC595 Q7 ends up holding bit 7)
    #[default]
    MsbFirst,
    /// Bit 0 first
    LsbFirst,
}

/// One digit's worth of lit segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentPattern(u8);

impl SegmentPattern {
    /// All segments off
    pub const BLANK: Self = Self(0);
    /// "F"
    pub const LETTER_F: Self = Self(seg::A | seg::F | seg::G | seg::E);
    /// "b"
    pub const LETTER_B: Self = Self(seg::F | seg::E | seg::D | seg::C | seg::G);
    /// "L"
    pub const LETTER_L: Self = Self(seg::D | seg::E | seg::F);
    /// "U" as wired on the readout board (open at the bottom)
    pub const LETTER_U: Self = Self(seg::A | seg::B | seg::C | seg::E | seg::F);
    /// Left-hand indicator (upper-left corner)
    pub const INDICATOR_LEFT: Self = Self(seg::F | seg::A);
    /// Right-hand indicator (upper-left bar and middle bar)
    pub const INDICATOR_RIGHT: Self = Self(seg::G | seg::F);
    /// "-", shown while the accelerometer is unavailable
    pub const DASH: Self = Self(seg::G);

    /// Wrap a raw pattern byte
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw pattern byte
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Check if a segment (one of the [`seg`] masks) is lit
    pub const fn is_lit(&self, segment: u8) -> bool {
        self.0 & segment != 0
    }

    /// Number of lit segments
    pub const fn lit_count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Level of each serialized bit, in transmission order
    pub fn serial_bits(&self, order: BitOrder) -> impl Iterator<Item = bool> {
        let bits = self.0;
        (0..8u8).map(move |i| {
            let shift = match order {
                BitOrder::MsbFirst => 7 - i,
                BitOrder::LsbFirst => i,
            };
            bits & (1 << shift) != 0
        })
    }
}

impl From<u8> for SegmentPattern {
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}
