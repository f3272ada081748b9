//! Enrollment entity model and DTOs.
//!
//! An enrollment with `is_active = false` is a system suggestion the
//! user has not confirmed; `is_active = true` means the user joined the
//! course. A completion percentage of 80 or more counts as completed.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fluenta_core::types::{DbId, Timestamp};

/// Completion percentage at which an enrollment counts as completed.
pub const COMPLETION_THRESHOLD_PCT: f64 = 80.0;

/// A row from the `enrollments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Enrollment {
    pub id: DbId,
    pub user_id: DbId,
    pub course_id: DbId,
    /// Skill-profile snapshot the enrollment was created against.
    pub profile_id: DbId,
    pub enroll_date: Timestamp,
    pub is_active: bool,
    pub completion_pct: f64,
    pub total_points: i32,
    pub skill_score: f64,
}

impl Enrollment {
    /// Whether the enrollment is a not-yet-confirmed suggestion.
    pub fn is_suggestion(&self) -> bool {
        !self.is_active
    }

    /// Whether the enrollment has crossed the completion threshold.
    pub fn is_completed(&self) -> bool {
        self.completion_pct >= COMPLETION_THRESHOLD_PCT
    }
}

/// DTO for inserting an enrollment row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEnrollment {
    pub user_id: DbId,
    pub course_id: DbId,
    pub profile_id: DbId,
    /// `false` for suggestions, `true` for a direct user join.
    pub is_active: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
