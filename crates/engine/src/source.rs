//! Data-access seams for the adaptive search.
//!
//! The search itself is written against these traits so its widening and
//! ranking logic can be unit tested with in-memory fakes. The `Pg*`
//! implementations delegate to the repositories.

use async_trait::async_trait;
use fluenta_core::candidate::Candidate;
use fluenta_core::difficulty::DifficultyRange;
use fluenta_core::skill::CourseKind;
use fluenta_core::types::DbId;
use fluenta_db::models::enrollment::{CreateEnrollment, Enrollment};
use fluenta_db::models::skill_profile::SkillProfileRow;
use fluenta_db::repositories::{CourseRepo, EnrollmentRepo, SkillProfileRepo};
use fluenta_db::DbPool;

use crate::error::EngineResult;

/// Supplies published course candidates for one skill axis and range.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    async fn candidates_in_range(
        &self,
        kind: CourseKind,
        range: DifficultyRange,
    ) -> EngineResult<Vec<Candidate>>;
}

/// Supplies per-axis recent completion averages for a user.
#[async_trait]
pub trait CompletionStats: Send + Sync {
    /// Average completion percentage over the user's enrollments of
    /// the given kind within the recent window, or `None` when the
    /// user has none. Suggestion rows count at their stored 0%, which
    /// drags the average down while untouched suggestions pile up.
    async fn recent_average(&self, user_id: DbId, kind: CourseKind) -> EngineResult<Option<f64>>;
}

/// Storage operations a regeneration run performs.
///
/// Errors stay as `sqlx::Error` so the retry loop can classify
/// serialization conflicts against the raw database error codes.
#[async_trait]
pub trait SuggestionStore: Send + Sync {
    async fn load_profile(&self, user_id: DbId) -> Result<Option<SkillProfileRow>, sqlx::Error>;

    async fn has_active_enrollment(
        &self,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<bool, sqlx::Error>;

    /// Atomically swap the user's suggestion set for a new one.
    async fn replace_suggestions(
        &self,
        user_id: DbId,
        rows: &[CreateEnrollment],
    ) -> Result<Vec<Enrollment>, sqlx::Error>;
}

// ---------------------------------------------------------------------------
// Postgres-backed implementations
// ---------------------------------------------------------------------------

pub struct PgCandidateSource {
    pool: DbPool,
}

impl PgCandidateSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateSource for PgCandidateSource {
    async fn candidates_in_range(
        &self,
        kind: CourseKind,
        range: DifficultyRange,
    ) -> EngineResult<Vec<Candidate>> {
        let rows = CourseRepo::find_by_kind_and_range(&self.pool, kind, range).await?;
        let mut candidates = Vec::with_capacity(rows.len());
        for row in rows {
            match row.to_candidate() {
                Ok(candidate) => candidates.push(candidate),
                Err(error) => {
                    // The schema CHECK should make this unreachable, but a
                    // bad row must not poison the whole search.
                    tracing::warn!(course_id = row.id, %error, "Skipping course with invalid kind");
                }
            }
        }
        Ok(candidates)
    }
}

pub struct PgCompletionStats {
    pool: DbPool,
    window_days: i32,
}

impl PgCompletionStats {
    pub fn new(pool: DbPool, window_days: i32) -> Self {
        Self { pool, window_days }
    }
}

#[async_trait]
impl CompletionStats for PgCompletionStats {
    async fn recent_average(&self, user_id: DbId, kind: CourseKind) -> EngineResult<Option<f64>> {
        Ok(EnrollmentRepo::recent_completion_average(&self.pool, user_id, kind, self.window_days)
            .await?)
    }
}

pub struct PgSuggestionStore {
    pool: DbPool,
}

impl PgSuggestionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SuggestionStore for PgSuggestionStore {
    async fn load_profile(&self, user_id: DbId) -> Result<Option<SkillProfileRow>, sqlx::Error> {
        SkillProfileRepo::find_by_user(&self.pool, user_id).await
    }

    async fn has_active_enrollment(
        &self,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        EnrollmentRepo::exists_active(&self.pool, user_id, course_id).await
    }

    async fn replace_suggestions(
        &self,
        user_id: DbId,
        rows: &[CreateEnrollment],
    ) -> Result<Vec<Enrollment>, sqlx::Error> {
        EnrollmentRepo::replace_suggestions(&self.pool, user_id, rows).await
    }
}
