//! Eligibility for combined ALLSKILLS recommendations.
//!
//! A learner is "ready" for combined courses only when their skills are
//! balanced, every axis is improving, and recent completion is strong.

use serde::{Deserialize, Serialize};

use crate::difficulty::HIGH_COMPLETION_PCT;
use crate::profile::SkillProfile;
use crate::skill::Skill;

/// Maximum spread between strongest and weakest axis for readiness.
pub const MAX_READY_SPREAD: f64 = 1.0;

/// Recent average completion percentage per axis, `None` where the
/// learner has no history in the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionAverages {
    pub listening: Option<f64>,
    pub speaking: Option<f64>,
    pub reading: Option<f64>,
    pub writing: Option<f64>,
}

impl CompletionAverages {
    /// Average for a single axis.
    pub fn get(&self, skill: Skill) -> Option<f64> {
        match skill {
            Skill::Listening => self.listening,
            Skill::Speaking => self.speaking,
            Skill::Reading => self.reading,
            Skill::Writing => self.writing,
        }
    }

    /// Build a set with the same average on every axis.
    pub fn uniform(avg: Option<f64>) -> Self {
        Self {
            listening: avg,
            speaking: avg,
            reading: avg,
            writing: avg,
        }
    }
}

/// Whether the learner is eligible for ALLSKILLS recommendations.
///
/// Requires a balanced profile (spread at most 1.0), improvement on
/// every axis, and a recent completion average of at least 80% on every
/// axis. An axis with no recent history counts as satisfying the
/// completion condition.
pub fn all_skills_ready(profile: &SkillProfile, completion: &CompletionAverages) -> bool {
    profile.spread() <= MAX_READY_SPREAD
        && profile.improved_in_all_skills()
        && Skill::ALL.iter().all(|s| {
            completion
                .get(*s)
                .is_none_or(|avg| avg >= HIGH_COMPLETION_PCT)
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
