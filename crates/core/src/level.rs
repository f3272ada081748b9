//! Named proficiency bands over the average skill score.
//!
//! Bands drive the user-facing level label and the level-override
//! trigger, which seeds a profile at the band midpoint.

use serde::{Deserialize, Serialize};

/// Overall proficiency band derived from the four-skill average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProficiencyBand {
    Beginner,
    Elementary,
    PreIntermediate,
    Intermediate,
    UpperIntermediate,
    Advanced,
    Proficient,
}

impl ProficiencyBand {
    /// All bands in ascending order.
    pub const ALL: [ProficiencyBand; 7] = [
        ProficiencyBand::Beginner,
        ProficiencyBand::Elementary,
        ProficiencyBand::PreIntermediate,
        ProficiencyBand::Intermediate,
        ProficiencyBand::UpperIntermediate,
        ProficiencyBand::Advanced,
        ProficiencyBand::Proficient,
    ];

    /// Inclusive lower score bound of the band.
    pub fn min_score(&self) -> f64 {
        match self {
            Self::Beginner => 0.0,
            Self::Elementary => 1.5,
            Self::PreIntermediate => 2.5,
            Self::Intermediate => 3.5,
            Self::UpperIntermediate => 4.5,
            Self::Advanced => 5.5,
            Self::Proficient => 6.5,
        }
    }

    /// Exclusive upper score bound of the band (inclusive for the top
    /// band).
    pub fn max_score(&self) -> f64 {
        match self {
            Self::Beginner => 1.5,
            Self::Elementary => 2.5,
            Self::PreIntermediate => 3.5,
            Self::Intermediate => 4.5,
            Self::UpperIntermediate => 5.5,
            Self::Advanced => 6.5,
            Self::Proficient => 7.0,
        }
    }

    /// Score used to seed a profile when a user picks this band.
    pub fn midpoint(&self) -> f64 {
        (self.min_score() + self.max_score()) / 2.0
    }

    /// User-facing label.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Elementary => "Elementary",
            Self::PreIntermediate => "Pre-Intermediate",
            Self::Intermediate => "Intermediate",
            Self::UpperIntermediate => "Upper-Intermediate",
            Self::Advanced => "Advanced",
            Self::Proficient => "Proficient",
        }
    }

    /// Band containing the given average score. Scores outside `[0, 7]`
    /// clamp to the nearest band.
    pub fn from_score(score: f64) -> Self {
        *Self::ALL
            .iter()
            .rev()
            .find(|band| score >= band.min_score())
            .unwrap_or(&Self::Beginner)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
