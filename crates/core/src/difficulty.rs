//! Difficulty-window computation per skill axis.
//!
//! [`recommended_range`] turns a learner's current level, their recent
//! completion rate and a stagnation flag into a closed difficulty
//! interval `[lo, hi]`. The interval always satisfies `lo <= hi` with
//! both endpoints in `[1, 7]`.

use serde::{Deserialize, Serialize};

use crate::profile::SkillProfile;
use crate::skill::CourseKind;

/// Lowest course difficulty in the catalog.
pub const MIN_LEVEL: f64 = 1.0;

/// Highest course difficulty in the catalog.
pub const MAX_LEVEL: f64 = 7.0;

/// Step by which the search widens the upper bound.
pub const WIDEN_STEP: f64 = 0.5;

/// Maximum difficulty stretch above the learner's current level.
pub const MAX_STRETCH: f64 = 1.0;

/// Completion rate at or above which harder material is offered.
pub const HIGH_COMPLETION_PCT: f64 = 80.0;

/// Completion rate below which only easier material is offered.
pub const LOW_COMPLETION_PCT: f64 = 50.0;

/// Completion rate below which the window is held at the current level.
pub const HOLD_COMPLETION_PCT: f64 = 60.0;

/// A closed difficulty interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyRange {
    pub lo: f64,
    pub hi: f64,
}

impl DifficultyRange {
    /// Whether a difficulty level falls inside the interval.
    pub fn contains(&self, level: f64) -> bool {
        (self.lo..=self.hi).contains(&level)
    }

    /// Widen the upper bound by one step, saturating at the global
    /// ceiling. The lower bound never moves.
    pub fn widened(&self) -> DifficultyRange {
        DifficultyRange {
            lo: self.lo,
            hi: (self.hi + WIDEN_STEP).min(MAX_LEVEL),
        }
    }

    /// Whether the upper bound has reached the global ceiling.
    pub fn at_ceiling(&self) -> bool {
        self.hi >= MAX_LEVEL
    }
}

/// Compute the recommended difficulty window for one axis.
///
/// `score` is the learner's current level on the axis,
/// `avg_completion` the average completion percentage over the recent
/// window (absent when the learner has no history on the axis), and
/// `stagnating` whether the score has failed to improve since the
/// previous snapshot.
pub fn recommended_range(
    score: f64,
    avg_completion: Option<f64>,
    stagnating: bool,
) -> DifficultyRange {
    let mut lo = score - 0.5;
    let mut hi = score + 0.5;

    if let Some(avg) = avg_completion {
        if avg >= HIGH_COMPLETION_PCT {
            // Succeeding: offer harder material.
            hi = (score + MAX_STRETCH).min(MAX_LEVEL);
        } else if avg < LOW_COMPLETION_PCT {
            // Struggling: easier material only.
            lo -= 1.0;
            hi = (hi - 1.0).min(score);
        }
    }

    // Net stagnation clamp: never recommend above the current level
    // when the score is flat or completion is mediocre.
    let holding = avg_completion.is_some_and(|avg| avg < HOLD_COMPLETION_PCT);
    if stagnating || holding {
        hi = score;
        lo = (score - 0.5).max(MIN_LEVEL);
    }

    clamp_range(lo, hi)
}

/// Compute the window for a course axis out of a full profile.
///
/// Single-skill axes use [`recommended_range`] directly. The synthetic
/// ALLSKILLS axis is additionally clamped to ±0.5 around the derived
/// four-skill score.
pub fn recommended_range_for_axis(
    profile: &SkillProfile,
    kind: CourseKind,
    avg_completion: Option<f64>,
) -> DifficultyRange {
    match kind.skill() {
        Some(skill) => recommended_range(
            profile.score(skill),
            avg_completion,
            profile.is_stagnating(skill),
        ),
        None => {
            let mean = profile.all_skills_score();
            let base = recommended_range(
                mean,
                avg_completion,
                profile.is_all_skills_stagnating(),
            );
            clamp_range(base.lo.max(mean - 0.5), base.hi.min(mean + 0.5))
        }
    }
}

/// Clamp both endpoints to `[1, 7]`, swapping if they cross.
fn clamp_range(lo: f64, hi: f64) -> DifficultyRange {
    let mut lo = lo.clamp(MIN_LEVEL, MAX_LEVEL);
    let mut hi = hi.clamp(MIN_LEVEL, MAX_LEVEL);
    if lo > hi {
        std::mem::swap(&mut lo, &mut hi);
    }
    DifficultyRange { lo, hi }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
