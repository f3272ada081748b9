//! Prioritization of candidate courses by urgency of need.
//!
//! The primary key is the skill gap: the distance between the learner's
//! strongest axis and the axis a course trains. Larger gaps (weaker
//! relative skills) sort first. The tie-breaks make the order total and
//! reproducible for a fixed input.

use std::cmp::Ordering;

use crate::candidate::Candidate;
use crate::profile::SkillProfile;
use crate::skill::CourseKind;

/// The learner's gap on a course axis: strongest axis score minus the
/// score relevant to the course's kind.
pub fn skill_gap(profile: &SkillProfile, kind: CourseKind) -> f64 {
    profile.max_score() - profile.axis_score(kind)
}

/// Order candidates by descending skill gap.
///
/// Tie-break 1: between a combined and a single-skill course with equal
/// gaps, the combined course wins only when the learner is ready for
/// ALLSKILLS material, and loses otherwise. Tie-break 2: ascending
/// difficulty. Remaining ties keep input order (the sort is stable).
pub fn rank(
    mut candidates: Vec<Candidate>,
    profile: &SkillProfile,
    all_skills_ready: bool,
) -> Vec<Candidate> {
    candidates.sort_by(|a, b| compare(a, b, profile, all_skills_ready));
    candidates
}

fn compare(a: &Candidate, b: &Candidate, profile: &SkillProfile, ready: bool) -> Ordering {
    let gap_a = skill_gap(profile, a.kind);
    let gap_b = skill_gap(profile, b.kind);

    gap_b
        .total_cmp(&gap_a)
        .then_with(|| combined_preference(a.kind, b.kind, ready))
        .then_with(|| a.difficulty.total_cmp(&b.difficulty))
}

fn combined_preference(a: CourseKind, b: CourseKind, ready: bool) -> Ordering {
    match (a.is_all_skills(), b.is_all_skills()) {
        (true, false) => {
            if ready {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
        (false, true) => {
            if ready {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        _ => Ordering::Equal,
    }
}

/// Human-readable reason attached to a recommendation.
pub fn recommendation_reason(candidate: &Candidate, profile: &SkillProfile) -> &'static str {
    let level = profile.axis_score(candidate.kind);
    if candidate.difficulty > level + 0.5 {
        "Challenging course to advance your skills"
    } else if candidate.difficulty < level - 0.5 {
        "Recommended for skill reinforcement"
    } else {
        "Matches your current level for optimal learning"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
