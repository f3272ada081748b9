//! Per-user skill profile: current and previous scores on each axis.
//!
//! The profile is a read-only snapshot inside this crate; only the
//! external scoring subsystem mutates it after a course completes.

use serde::{Deserialize, Serialize};

use crate::skill::{CourseKind, Skill};
use crate::types::Timestamp;

/// Lowest valid score on any axis.
pub const MIN_SCORE: f64 = 0.0;

/// Highest valid score on any axis.
pub const MAX_SCORE: f64 = 7.0;

/// One score per skill axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillScores {
    pub listening: f64,
    pub speaking: f64,
    pub reading: f64,
    pub writing: f64,
}

impl SkillScores {
    /// Build a set with the same score on every axis.
    pub fn uniform(score: f64) -> Self {
        Self {
            listening: score,
            speaking: score,
            reading: score,
            writing: score,
        }
    }

    /// Score for a single axis.
    ///
    /// This is the one place that dispatches on [`Skill`]; everything
    /// else goes through it instead of branching per axis.
    pub fn get(&self, skill: Skill) -> f64 {
        match skill {
            Skill::Listening => self.listening,
            Skill::Speaking => self.speaking,
            Skill::Reading => self.reading,
            Skill::Writing => self.writing,
        }
    }

    /// Arithmetic mean across the four axes.
    pub fn mean(&self) -> f64 {
        (self.listening + self.speaking + self.reading + self.writing) / 4.0
    }

    /// Highest score across the four axes.
    pub fn max(&self) -> f64 {
        Skill::ALL.iter().map(|s| self.get(*s)).fold(f64::MIN, f64::max)
    }

    /// Lowest score across the four axes.
    pub fn min(&self) -> f64 {
        Skill::ALL.iter().map(|s| self.get(*s)).fold(f64::MAX, f64::min)
    }
}

/// A user's proficiency snapshot: current and previous score per axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillProfile {
    pub current: SkillScores,
    pub previous: SkillScores,
    pub last_updated: Timestamp,
}

impl SkillProfile {
    /// Current score for a single axis.
    pub fn score(&self, skill: Skill) -> f64 {
        self.current.get(skill)
    }

    /// Previous score for a single axis.
    pub fn previous_score(&self, skill: Skill) -> f64 {
        self.previous.get(skill)
    }

    /// Derived ALLSKILLS score: the four-axis mean rounded to the
    /// nearest 0.5.
    pub fn all_skills_score(&self) -> f64 {
        round_half(self.current.mean())
    }

    /// Derived ALLSKILLS score of the previous snapshot.
    pub fn previous_all_skills_score(&self) -> f64 {
        round_half(self.previous.mean())
    }

    /// The learner's level on a course axis: the axis score for a
    /// single skill, the derived ALLSKILLS score for combined courses.
    pub fn axis_score(&self, kind: CourseKind) -> f64 {
        match kind.skill() {
            Some(skill) => self.score(skill),
            None => self.all_skills_score(),
        }
    }

    /// Best-performing axis score, the aspirational baseline for
    /// skill-gap ranking.
    pub fn max_score(&self) -> f64 {
        self.current.max()
    }

    /// Weakest axis score.
    pub fn min_score(&self) -> f64 {
        self.current.min()
    }

    /// Spread between strongest and weakest axis.
    pub fn spread(&self) -> f64 {
        self.max_score() - self.min_score()
    }

    /// Whether an axis has not improved since the previous snapshot.
    pub fn is_stagnating(&self, skill: Skill) -> bool {
        self.score(skill) <= self.previous_score(skill)
    }

    /// Whether the combined axis has not improved since the previous
    /// snapshot.
    pub fn is_all_skills_stagnating(&self) -> bool {
        self.all_skills_score() <= self.previous_all_skills_score()
    }

    /// Whether every axis improved over the previous snapshot.
    pub fn improved_in_all_skills(&self) -> bool {
        Skill::ALL
            .iter()
            .all(|s| self.score(*s) > self.previous_score(*s))
    }

    /// Reject any current or previous score outside `[0, 7]`.
    ///
    /// Runs before any search; a profile that fails here must never
    /// reach the range calculator.
    pub fn validate(&self) -> Result<(), String> {
        for skill in Skill::ALL {
            validate_score(self.score(skill), skill.as_str())?;
            validate_score(
                self.previous_score(skill),
                &format!("previous {}", skill.as_str()),
            )?;
        }
        Ok(())
    }
}

/// Round to the nearest multiple of 0.5.
fn round_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}

fn validate_score(score: f64, axis: &str) -> Result<(), String> {
    if !score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(format!(
            "{axis} score ({score:.2}) must be between {MIN_SCORE} and {MAX_SCORE}"
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(current: SkillScores, previous: SkillScores) -> SkillProfile {
        SkillProfile {
            current,
            previous,
            last_updated: chrono::Utc::now(),
        }
    }

    // -- derived scores -------------------------------------------------------

    #[test]
    fn all_skills_score_rounds_to_half() {
        let p = profile(
            SkillScores {
                listening: 5.0,
                speaking: 5.0,
                reading: 4.8,
                writing: 5.0,
            },
            SkillScores::uniform(4.0),
        );
        // Mean 4.95 rounds to 5.0.
        assert_eq!(p.all_skills_score(), 5.0);
    }

    #[test]
    fn all_skills_score_rounds_down_to_half() {
        let p = profile(
            SkillScores {
                listening: 2.0,
                speaking: 2.0,
                reading: 2.5,
                writing: 2.5,
            },
            SkillScores::uniform(1.0),
        );
        // Mean 2.25 rounds to 2.5 (ties round away from zero).
        assert_eq!(p.all_skills_score(), 2.5);
    }

    #[test]
    fn axis_score_uses_skill_or_mean() {
        let p = profile(
            SkillScores {
                listening: 3.0,
                speaking: 4.0,
                reading: 5.0,
                writing: 4.0,
            },
            SkillScores::uniform(1.0),
        );
        assert_eq!(p.axis_score(CourseKind::Listening), 3.0);
        assert_eq!(p.axis_score(CourseKind::Reading), 5.0);
        assert_eq!(p.axis_score(CourseKind::AllSkills), 4.0);
    }

    #[test]
    fn max_min_and_spread() {
        let p = profile(
            SkillScores {
                listening: 2.0,
                speaking: 5.5,
                reading: 3.0,
                writing: 4.0,
            },
            SkillScores::uniform(1.0),
        );
        assert_eq!(p.max_score(), 5.5);
        assert_eq!(p.min_score(), 2.0);
        assert_eq!(p.spread(), 3.5);
    }

    // -- stagnation / improvement ---------------------------------------------

    #[test]
    fn equal_scores_count_as_stagnating() {
        let p = profile(SkillScores::uniform(2.0), SkillScores::uniform(2.0));
        for skill in Skill::ALL {
            assert!(p.is_stagnating(skill));
        }
        assert!(!p.improved_in_all_skills());
    }

    #[test]
    fn improvement_in_every_axis() {
        let p = profile(SkillScores::uniform(3.0), SkillScores::uniform(2.5));
        assert!(p.improved_in_all_skills());
        assert!(!p.is_stagnating(Skill::Writing));
    }

    #[test]
    fn single_flat_axis_breaks_improvement() {
        let mut current = SkillScores::uniform(3.0);
        current.reading = 2.5;
        let p = profile(current, SkillScores::uniform(2.5));
        assert!(!p.improved_in_all_skills());
        assert!(p.is_stagnating(Skill::Reading));
    }

    // -- validation -----------------------------------------------------------

    #[test]
    fn valid_profile_passes() {
        let p = profile(SkillScores::uniform(3.5), SkillScores::uniform(3.0));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn boundary_scores_pass() {
        let p = profile(SkillScores::uniform(0.0), SkillScores::uniform(7.0));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn score_above_range_rejected() {
        let mut current = SkillScores::uniform(3.0);
        current.speaking = 7.5;
        let p = profile(current, SkillScores::uniform(3.0));
        let err = p.validate().unwrap_err();
        assert!(err.contains("SPEAKING"));
        assert!(err.contains("7.50"));
    }

    #[test]
    fn negative_previous_score_rejected() {
        let mut previous = SkillScores::uniform(3.0);
        previous.writing = -0.1;
        let p = profile(SkillScores::uniform(3.0), previous);
        let err = p.validate().unwrap_err();
        assert!(err.contains("previous WRITING"));
    }

    #[test]
    fn nan_score_rejected() {
        let mut current = SkillScores::uniform(3.0);
        current.listening = f64::NAN;
        let p = profile(current, SkillScores::uniform(3.0));
        assert!(p.validate().is_err());
    }
}
