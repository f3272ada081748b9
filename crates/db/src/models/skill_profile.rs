//! Skill profile row model and conversion to the core snapshot type.

use serde::Serialize;
use sqlx::FromRow;

use fluenta_core::profile::{SkillProfile, SkillScores};
use fluenta_core::types::{DbId, Timestamp};

/// A row from the `skill_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SkillProfileRow {
    pub id: DbId,
    pub user_id: DbId,
    pub listening_score: f64,
    pub speaking_score: f64,
    pub reading_score: f64,
    pub writing_score: f64,
    pub previous_listening_score: f64,
    pub previous_speaking_score: f64,
    pub previous_reading_score: f64,
    pub previous_writing_score: f64,
    pub last_updated: Timestamp,
}

impl SkillProfileRow {
    /// Convert the row into the core profile snapshot.
    pub fn to_profile(&self) -> SkillProfile {
        SkillProfile {
            current: SkillScores {
                listening: self.listening_score,
                speaking: self.speaking_score,
                reading: self.reading_score,
                writing: self.writing_score,
            },
            previous: SkillScores {
                listening: self.previous_listening_score,
                speaking: self.previous_speaking_score,
                reading: self.previous_reading_score,
                writing: self.previous_writing_score,
            },
            last_updated: self.last_updated,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
