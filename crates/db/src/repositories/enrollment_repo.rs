//! Repository for the `enrollments` table.
//!
//! Suggestion regeneration is a single SERIALIZABLE transaction
//! (delete all suggestions, insert the new set) so that two concurrent
//! regenerations for the same user cannot interleave; the caller is
//! responsible for retrying on serialization conflicts.

use sqlx::PgPool;

use fluenta_core::skill::CourseKind;
use fluenta_core::types::DbId;

use crate::models::enrollment::{CreateEnrollment, Enrollment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, course_id, profile_id, enroll_date, is_active, \
                       completion_pct, total_points, skill_score";

/// Provides persistence operations for enrollments.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Insert a new enrollment row, returning the created row.
    ///
    /// New rows start with zero completion and points; activating a
    /// second enrollment for an already-active (user, course) pair
    /// violates the partial unique index and surfaces as a database
    /// error.
    pub async fn create(
        pool: &PgPool,
        input: &CreateEnrollment,
    ) -> Result<Enrollment, sqlx::Error> {
        let query = format!(
            "INSERT INTO enrollments (user_id, course_id, profile_id, is_active)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(input.user_id)
            .bind(input.course_id)
            .bind(input.profile_id)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find an enrollment by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM enrollments WHERE id = $1");
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The active enrollment for a (user, course) pair, if any.
    ///
    /// The partial unique index guarantees at most one row matches.
    pub async fn find_active(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM enrollments
             WHERE user_id = $1 AND course_id = $2 AND is_active"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(user_id)
            .bind(course_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether an active enrollment exists for a (user, course) pair.
    pub async fn exists_active(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                 SELECT 1 FROM enrollments
                 WHERE user_id = $1 AND course_id = $2 AND is_active
             )",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(pool)
        .await
    }

    /// List a user's enrollments, optionally filtered by the active
    /// flag, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        is_active: Option<bool>,
    ) -> Result<Vec<Enrollment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM enrollments
             WHERE user_id = $1 AND ($2::boolean IS NULL OR is_active = $2)
             ORDER BY enroll_date DESC, id DESC"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(user_id)
            .bind(is_active)
            .fetch_all(pool)
            .await
    }

    /// Flip a suggestion to an active enrollment, stamping the join
    /// time. Returns `None` if no row with the given `id` exists.
    pub async fn activate(pool: &PgPool, id: DbId) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!(
            "UPDATE enrollments SET is_active = TRUE, enroll_date = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update completion fields after a lesson pass.
    pub async fn update_completion(
        pool: &PgPool,
        id: DbId,
        completion_pct: f64,
        total_points: i32,
        skill_score: f64,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!(
            "UPDATE enrollments SET
                completion_pct = $2,
                total_points = $3,
                skill_score = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .bind(completion_pct)
            .bind(total_points)
            .bind(skill_score)
            .fetch_optional(pool)
            .await
    }

    /// Delete an enrollment by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete all of a user's suggestions, returning the count removed.
    pub async fn delete_all_suggested(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM enrollments WHERE user_id = $1 AND NOT is_active")
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }

    /// Atomically replace a user's suggestion set.
    ///
    /// Deletes every suggestion row for the user and inserts the new
    /// set inside one SERIALIZABLE transaction. Concurrent calls for
    /// the same user conflict and one of them fails with a
    /// serialization error; calls for different users do not block
    /// each other.
    pub async fn replace_suggestions(
        pool: &PgPool,
        user_id: DbId,
        rows: &[CreateEnrollment],
    ) -> Result<Vec<Enrollment>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM enrollments WHERE user_id = $1 AND NOT is_active")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO enrollments (user_id, course_id, profile_id, is_active)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );

        let mut inserted = Vec::with_capacity(rows.len());
        for row in rows {
            let enrollment = sqlx::query_as::<_, Enrollment>(&query)
                .bind(row.user_id)
                .bind(row.course_id)
                .bind(row.profile_id)
                .bind(row.is_active)
                .fetch_one(&mut *tx)
                .await?;
            inserted.push(enrollment);
        }

        tx.commit().await?;
        tracing::debug!(user_id, count = inserted.len(), "Replaced suggestion rows");
        Ok(inserted)
    }

    /// Average completion percentage over the user's enrollments of a
    /// course kind within the recent window. `None` when the user has
    /// no enrollments of that kind in the window.
    pub async fn recent_completion_average(
        pool: &PgPool,
        user_id: DbId,
        kind: CourseKind,
        window_days: i32,
    ) -> Result<Option<f64>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<f64>>(
            "SELECT AVG(e.completion_pct)
             FROM enrollments e
             JOIN courses c ON c.id = e.course_id
             WHERE e.user_id = $1
               AND c.kind = $2
               AND e.enroll_date >= NOW() - MAKE_INTERVAL(days => $3)",
        )
        .bind(user_id)
        .bind(kind.as_str())
        .bind(window_days)
        .fetch_one(pool)
        .await
    }
}
