use fluenta_core::error::CoreError;
use fluenta_core::types::DbId;

/// Errors surfaced by the recommendation and enrollment engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("User {user_id} already has an active enrollment for course {course_id}")]
    DuplicateEnrollment { user_id: DbId, course_id: DbId },

    #[error("No suitable courses found even at the widest difficulty ranges")]
    NoSuitableCourses,

    #[error("Suggestion regeneration failed after {attempts} attempts")]
    RegenerationFailed { attempts: u32 },

    #[error("Invalid skill profile: {0}")]
    InvalidSkillProfile(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
