//! Repository for the `courses` table.

use sqlx::PgPool;

use fluenta_core::difficulty::DifficultyRange;
use fluenta_core::skill::CourseKind;
use fluenta_core::types::DbId;

use crate::models::course::{Course, CreateCourse, STATUS_PUBLIC};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, kind, diff_level, recom_level, status, group_name, created_at";

/// Provides catalog queries for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course, returning the created row.
    ///
    /// If `status` is `None` in the input, defaults to DRAFT.
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses (name, kind, diff_level, recom_level, status, group_name)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'DRAFT'), $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.name)
            .bind(input.kind.as_str())
            .bind(input.diff_level)
            .bind(input.recom_level)
            .bind(&input.status)
            .bind(&input.group_name)
            .fetch_one(pool)
            .await
    }

    /// Find a course by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Public courses of a kind within a closed difficulty interval,
    /// ordered by difficulty then id for a reproducible result.
    pub async fn find_by_kind_and_range(
        pool: &PgPool,
        kind: CourseKind,
        range: DifficultyRange,
    ) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses
             WHERE kind = $1 AND diff_level BETWEEN $2 AND $3 AND status = $4
             ORDER BY diff_level, id"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(kind.as_str())
            .bind(range.lo)
            .bind(range.hi)
            .bind(STATUS_PUBLIC)
            .fetch_all(pool)
            .await
    }
}
