//! Candidate courses as seen by the search and ranker.
//!
//! A [`Candidate`] is the in-memory projection of a public course row;
//! the engine builds these from storage so this crate stays free of
//! database types.

use serde::{Deserialize, Serialize};

use crate::difficulty::MAX_STRETCH;
use crate::profile::SkillProfile;
use crate::skill::CourseKind;
use crate::types::DbId;

/// Marker in the name of the placement/onboarding course, which is
/// never recommended.
pub const PLACEMENT_MARKER: &str = "(Placement)";

/// A course under consideration for recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub course_id: DbId,
    pub name: String,
    pub kind: CourseKind,
    /// Course difficulty level in `[1, 7]`.
    pub difficulty: f64,
    /// Minimum recommended entry level for the course.
    pub entry_level: f64,
}

impl Candidate {
    /// Whether this is the placement/onboarding course.
    pub fn is_placement(&self) -> bool {
        self.name.contains(PLACEMENT_MARKER)
    }

    /// Whether the course is appropriate for the learner.
    ///
    /// Appropriate means the entry level does not exceed the learner's
    /// level on the course's axis, and the difficulty stays within the
    /// stretch cap above that level. This keeps the widening search
    /// from admitting wildly unsuitable courses just to return
    /// something.
    pub fn is_suitable_for(&self, profile: &SkillProfile) -> bool {
        let level = profile.axis_score(self.kind);
        self.entry_level <= level && self.difficulty <= level + MAX_STRETCH
    }

    /// Placement filter and suitability combined.
    pub fn is_recommendable_for(&self, profile: &SkillProfile) -> bool {
        !self.is_placement() && self.is_suitable_for(profile)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::SkillScores;

    fn profile(level: f64) -> SkillProfile {
        SkillProfile {
            current: SkillScores::uniform(level),
            previous: SkillScores::uniform(level - 0.5),
            last_updated: chrono::Utc::now(),
        }
    }

    fn candidate(name: &str, difficulty: f64, entry_level: f64) -> Candidate {
        Candidate {
            course_id: 1,
            name: name.to_string(),
            kind: CourseKind::Reading,
            difficulty,
            entry_level,
        }
    }

    #[test]
    fn placement_course_detected() {
        assert!(candidate("English (Placement) Test", 1.0, 1.0).is_placement());
        assert!(!candidate("Reading Basics", 1.0, 1.0).is_placement());
    }

    #[test]
    fn entry_level_above_learner_is_unsuitable() {
        let c = candidate("Advanced Essays", 4.0, 3.5);
        assert!(!c.is_suitable_for(&profile(3.0)));
        assert!(c.is_suitable_for(&profile(3.5)));
    }

    #[test]
    fn difficulty_beyond_stretch_cap_is_unsuitable() {
        let c = candidate("Stretch Reading", 4.1, 1.0);
        assert!(!c.is_suitable_for(&profile(3.0)));
        // Exactly at the cap is allowed.
        let c = candidate("Stretch Reading", 4.0, 1.0);
        assert!(c.is_suitable_for(&profile(3.0)));
    }

    #[test]
    fn recommendable_excludes_placement() {
        let c = candidate("Course (Placement)", 3.0, 1.0);
        assert!(c.is_suitable_for(&profile(3.0)));
        assert!(!c.is_recommendable_for(&profile(3.0)));
    }

    #[test]
    fn all_skills_candidate_uses_derived_level() {
        let c = Candidate {
            course_id: 2,
            name: "Integrated Skills".to_string(),
            kind: CourseKind::AllSkills,
            difficulty: 3.5,
            entry_level: 3.0,
        };
        assert!(c.is_suitable_for(&profile(3.0)));
        assert!(!c.is_suitable_for(&profile(1.5)));
    }
}
