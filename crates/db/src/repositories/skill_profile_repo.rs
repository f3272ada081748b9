//! Repository for the `skill_profiles` table.

use sqlx::PgPool;

use fluenta_core::level::ProficiencyBand;
use fluenta_core::types::DbId;

use crate::models::skill_profile::SkillProfileRow;

/// Column list for `skill_profiles` queries.
const COLUMNS: &str = "id, user_id, \
                       listening_score, speaking_score, reading_score, writing_score, \
                       previous_listening_score, previous_speaking_score, \
                       previous_reading_score, previous_writing_score, last_updated";

/// Score assigned to every axis of a freshly created profile.
const INITIAL_SCORE: f64 = 1.0;

/// Provides persistence operations for skill profiles.
pub struct SkillProfileRepo;

impl SkillProfileRepo {
    /// Find a user's profile.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<SkillProfileRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skill_profiles WHERE user_id = $1");
        sqlx::query_as::<_, SkillProfileRow>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a user's profile, creating it with baseline scores (1.0
    /// on every axis) when absent.
    pub async fn get_or_create(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<SkillProfileRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO skill_profiles (user_id,
                 listening_score, speaking_score, reading_score, writing_score,
                 previous_listening_score, previous_speaking_score,
                 previous_reading_score, previous_writing_score)
             VALUES ($1, $2, $2, $2, $2, $2, $2, $2, $2)
             ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SkillProfileRow>(&query)
            .bind(user_id)
            .bind(INITIAL_SCORE)
            .fetch_one(pool)
            .await
    }

    /// Seed every axis (current and previous) at the midpoint of an
    /// explicitly chosen proficiency band. Upserts the profile.
    pub async fn apply_level_override(
        pool: &PgPool,
        user_id: DbId,
        band: ProficiencyBand,
    ) -> Result<SkillProfileRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO skill_profiles (user_id,
                 listening_score, speaking_score, reading_score, writing_score,
                 previous_listening_score, previous_speaking_score,
                 previous_reading_score, previous_writing_score)
             VALUES ($1, $2, $2, $2, $2, $2, $2, $2, $2)
             ON CONFLICT (user_id) DO UPDATE SET
                 listening_score = EXCLUDED.listening_score,
                 speaking_score = EXCLUDED.speaking_score,
                 reading_score = EXCLUDED.reading_score,
                 writing_score = EXCLUDED.writing_score,
                 previous_listening_score = EXCLUDED.previous_listening_score,
                 previous_speaking_score = EXCLUDED.previous_speaking_score,
                 previous_reading_score = EXCLUDED.previous_reading_score,
                 previous_writing_score = EXCLUDED.previous_writing_score,
                 last_updated = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SkillProfileRow>(&query)
            .bind(user_id)
            .bind(band.midpoint())
            .fetch_one(pool)
            .await
    }

    /// All user ids with a profile, in a stable order. Drives the
    /// batch refresh.
    pub async fn list_user_ids(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT user_id FROM skill_profiles ORDER BY user_id")
            .fetch_all(pool)
            .await
    }
}
