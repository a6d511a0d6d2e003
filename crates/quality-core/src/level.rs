//! User satisfaction bands for opinion scores
//!
//! Lower limits follow the E-model satisfaction table (ITU-T G.107 Annex B):
//!
//! | MOS  | Users                    |
//! |------|--------------------------|
//! | 4.34 | very satisfied           |
//! | 4.03 | satisfied                |
//! | 3.60 | some dissatisfied        |
//! | 3.10 | many dissatisfied        |
//! | 2.58 | nearly all dissatisfied  |
//!
//! The bands are calibrated for audio only. Video scores are sorted into the
//! same bands for a common vocabulary, not because the video curve was
//! fitted against them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Satisfaction band of an opinion score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SatisfactionLevel {
    /// Below 2.58, including the off-scale video sentinel and NaN
    NotRecommended,
    /// MOS 2.58-3.10
    NearlyAllDissatisfied,
    /// MOS 3.10-3.60
    ManyDissatisfied,
    /// MOS 3.60-4.03
    SomeDissatisfied,
    /// MOS 4.03-4.34
    Satisfied,
    /// MOS 4.34 and above
    VerySatisfied,
}

impl SatisfactionLevel {
    /// Band containing `mos`
    pub fn from_mos(mos: f64) -> Self {
        if mos >= 4.34 {
            Self::VerySatisfied
        } else if mos >= 4.03 {
            Self::Satisfied
        } else if mos >= 3.60 {
            Self::SomeDissatisfied
        } else if mos >= 3.10 {
            Self::ManyDissatisfied
        } else if mos >= 2.58 {
            Self::NearlyAllDissatisfied
        } else {
            Self::NotRecommended
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::VerySatisfied => "Very satisfied",
            Self::Satisfied => "Satisfied",
            Self::SomeDissatisfied => "Some users dissatisfied",
            Self::ManyDissatisfied => "Many users dissatisfied",
            Self::NearlyAllDissatisfied => "Nearly all users dissatisfied",
            Self::NotRecommended => "Not recommended",
        }
    }
}

impl fmt::Display for SatisfactionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(SatisfactionLevel::from_mos(4.5), SatisfactionLevel::VerySatisfied);
        assert_eq!(SatisfactionLevel::from_mos(4.34), SatisfactionLevel::VerySatisfied);
        assert_eq!(SatisfactionLevel::from_mos(4.339), SatisfactionLevel::Satisfied);
        assert_eq!(SatisfactionLevel::from_mos(4.03), SatisfactionLevel::Satisfied);
        assert_eq!(SatisfactionLevel::from_mos(3.6), SatisfactionLevel::SomeDissatisfied);
        assert_eq!(SatisfactionLevel::from_mos(3.1), SatisfactionLevel::ManyDissatisfied);
        assert_eq!(SatisfactionLevel::from_mos(2.58), SatisfactionLevel::NearlyAllDissatisfied);
        assert_eq!(SatisfactionLevel::from_mos(1.0), SatisfactionLevel::NotRecommended);
        assert_eq!(SatisfactionLevel::from_mos(0.0), SatisfactionLevel::NotRecommended);
        assert_eq!(SatisfactionLevel::from_mos(f64::NAN), SatisfactionLevel::NotRecommended);
    }

    #[test]
    fn test_ordering_follows_quality() {
        assert!(SatisfactionLevel::VerySatisfied > SatisfactionLevel::Satisfied);
        assert!(SatisfactionLevel::NearlyAllDissatisfied > SatisfactionLevel::NotRecommended);
    }

    #[test]
    fn test_video_range_uses_audio_bands() {
        // Video tops out at 5.0 and bottoms out at the 0.0 sentinel
        assert_eq!(SatisfactionLevel::from_mos(5.0), SatisfactionLevel::VerySatisfied);
        assert_eq!(
            SatisfactionLevel::from_mos(crate::constants::VIDEO_UNUSABLE_SCORE),
            SatisfactionLevel::NotRecommended
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(SatisfactionLevel::Satisfied.to_string(), "Satisfied");
    }
}
