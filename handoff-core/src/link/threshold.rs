//! Analog demand detection
//!
//! The granter does not see the DEMAND wire as a clean digital level; it
//! reads it through an ADC and compares against a fixed fraction of the
//! converter's code range. Readings below the threshold are logic 0,
//! meaning demand is present.

use handoff_hal::adc::AnalogInput;

/// Fraction of the ADC code range below which DEMAND counts as asserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawThreshold"))]
pub struct DemandThreshold {
    numerator: u16,
    denominator: u16,
}

/// Wire shape of [`DemandThreshold`]; checked through [`DemandThreshold::new`]
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawThreshold {
    numerator: u16,
    denominator: u16,
}

#[cfg(feature = "serde")]
impl TryFrom<RawThreshold> for DemandThreshold {
    type Error = &'static str;

    fn try_from(raw: RawThreshold) -> Result<Self, Self::Error> {
        Self::new(raw.numerator, raw.denominator)
            .ok_or("threshold must satisfy 0 < numerator <= denominator")
    }
}

impl Default for DemandThreshold {
    fn default() -> Self {
        Self::QUARTER
    }
}

impl DemandThreshold {
    /// One quarter of the code range (1.25 V on a 5 V, 10-bit converter)
    pub const QUARTER: Self = Self {
        numerator: 1,
        denominator: 4,
    };

    /// Create a threshold of `numerator / denominator`
    ///
    /// Returns `None` unless `0 < numerator <= denominator`.
    pub const fn new(numerator: u16, denominator: u16) -> Option<Self> {
        if numerator == 0 || denominator == 0 || numerator > denominator {
            return None;
        }
        Some(Self {
            numerator,
            denominator,
        })
    }

    /// Fraction numerator
    pub const fn numerator(&self) -> u16 {
        self.numerator
    }

    /// Fraction denominator
    pub const fn denominator(&self) -> u16 {
        self.denominator
    }

    /// Threshold in ADC codes for a converter with `code_count` codes
    ///
    /// A 10-bit converter has 1024 codes, so a quarter is 256: exactly
    /// the codes whose top two bits are zero.
    pub fn counts(&self, code_count: u32) -> u32 {
        code_count * self.numerator as u32 / self.denominator as u32
    }

    /// Classify one raw reading
    ///
    /// A reading exactly at the threshold counts as "no demand".
    pub fn demand_present(&self, value: u16, code_count: u32) -> bool {
        (value as u32) < self.counts(code_count)
    }

    /// Take one reading from `adc` and classify it
    pub fn sense<A: AnalogInput>(&self, adc: &mut A) -> bool {
        let code_count = adc.code_count();
        let value = adc.read();
        self.demand_present(value, code_count)
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockAdc;
    use super::*;

    #[test]
    fn test_quarter_of_ten_bit() {
        assert_eq!(DemandThreshold::QUARTER.counts(1024), 256);
        assert_eq!(DemandThreshold::QUARTER.counts(4096), 1024);
    }

    #[test]
    fn test_boundary_counts_as_no_demand() {
        let t = DemandThreshold::default();
        assert!(t.demand_present(255, 1024));
        assert!(!t.demand_present(256, 1024));
        assert!(!t.demand_present(1023, 1024));
        assert!(t.demand_present(0, 1024));
    }

    #[test]
    fn test_matches_top_bits_rule() {
        // Demand is present exactly when the reading shifted right by 8 is zero
        let t = DemandThreshold::QUARTER;
        for value in 0..1024u16 {
            assert_eq!(t.demand_present(value, 1024), (value >> 8) == 0);
        }
    }

    #[test]
    fn test_invalid_fractions() {
        assert!(DemandThreshold::new(0, 4).is_none());
        assert!(DemandThreshold::new(1, 0).is_none());
        assert!(DemandThreshold::new(5, 4).is_none());
        assert_eq!(DemandThreshold::new(1, 4), Some(DemandThreshold::QUARTER));
    }

    #[test]
    fn test_sense_reads_once() {
        let mut adc = MockAdc::ten_bit(100);
        assert!(DemandThreshold::QUARTER.sense(&mut adc));
        assert_eq!(adc.reads, 1);

        adc.value = 900;
        assert!(!DemandThreshold::QUARTER.sense(&mut adc));
    }
}
