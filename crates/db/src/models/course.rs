//! Course catalog entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fluenta_core::candidate::Candidate;
use fluenta_core::error::CoreError;
use fluenta_core::skill::CourseKind;
use fluenta_core::types::{DbId, Timestamp};

/// Visibility states for a course (stored in `courses.status`).
pub const STATUS_DRAFT: &str = "DRAFT";
pub const STATUS_PUBLIC: &str = "PUBLIC";
pub const STATUS_PRIVATE: &str = "PRIVATE";

/// All valid course status strings.
pub const VALID_COURSE_STATUSES: &[&str] = &[STATUS_DRAFT, STATUS_PUBLIC, STATUS_PRIVATE];

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub name: String,
    /// Course kind string, one of the five skill-axis values.
    pub kind: String,
    /// Difficulty level in `[1, 7]`.
    pub diff_level: f64,
    /// Minimum recommended entry level.
    pub recom_level: f64,
    pub status: String,
    pub group_name: Option<String>,
    pub created_at: Timestamp,
}

impl Course {
    /// Project the row into the core search candidate.
    ///
    /// Fails with a validation error if the stored kind string is not
    /// a known course kind.
    pub fn to_candidate(&self) -> Result<Candidate, CoreError> {
        let kind = CourseKind::from_str_value(&self.kind).map_err(CoreError::Validation)?;
        Ok(Candidate {
            course_id: self.id,
            name: self.name.clone(),
            kind,
            difficulty: self.diff_level,
            entry_level: self.recom_level,
        })
    }
}

/// DTO for creating a new course.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourse {
    pub name: String,
    pub kind: CourseKind,
    pub diff_level: f64,
    pub recom_level: f64,
    /// Defaults to DRAFT if omitted.
    pub status: Option<String>,
    pub group_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
