//! Enrollment lifecycle and suggestion regeneration.
//!
//! All writes that must observe the one-active-enrollment rule go
//! through this manager. Regeneration re-reads the profile and the
//! catalog on every attempt so a retry after a serialization failure
//! acts on a fresh snapshot.

use fluenta_core::error::CoreError;
use fluenta_core::types::DbId;
use fluenta_db::models::enrollment::{CreateEnrollment, Enrollment};
use fluenta_db::repositories::EnrollmentRepo;
use fluenta_db::DbPool;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::retry::{is_write_conflict, RetryPolicy};
use crate::search::AdaptiveSearch;
use crate::source::{
    CandidateSource, CompletionStats, PgCandidateSource, PgCompletionStats, PgSuggestionStore,
    SuggestionStore,
};

/// Days of enrollment history considered for completion averages.
pub const DEFAULT_COMPLETION_WINDOW_DAYS: i32 = 30;

pub struct EnrollmentManager {
    pool: DbPool,
    policy: RetryPolicy,
    completion_window_days: i32,
}

impl EnrollmentManager {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            policy: RetryPolicy::default(),
            completion_window_days: DEFAULT_COMPLETION_WINDOW_DAYS,
        }
    }

    pub fn from_config(pool: DbPool, config: &EngineConfig) -> Self {
        Self {
            pool,
            policy: config.retry_policy(),
            completion_window_days: config.completion_window_days,
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    // -----------------------------------------------------------------
    // Suggestion regeneration
    // -----------------------------------------------------------------

    /// Recompute and atomically replace the user's suggested
    /// enrollments, retrying on transient write conflicts.
    pub async fn replace_suggestions(&self, user_id: DbId) -> EngineResult<Vec<Enrollment>> {
        let store = PgSuggestionStore::new(self.pool.clone());
        let source = PgCandidateSource::new(self.pool.clone());
        let stats = PgCompletionStats::new(self.pool.clone(), self.completion_window_days);
        self.replace_suggestions_via(user_id, &store, &source, &stats)
            .await
    }

    /// Retry loop over the injected collaborators.
    async fn replace_suggestions_via(
        &self,
        user_id: DbId,
        store: &dyn SuggestionStore,
        source: &dyn CandidateSource,
        stats: &dyn CompletionStats,
    ) -> EngineResult<Vec<Enrollment>> {
        let run_id = Uuid::new_v4();
        let mut attempt = 1;
        loop {
            match self.regenerate_once(user_id, store, source, stats).await {
                Ok(rows) => {
                    tracing::info!(
                        %run_id,
                        user_id,
                        attempt,
                        count = rows.len(),
                        "Regenerated suggestions"
                    );
                    return Ok(rows);
                }
                Err(EngineError::Database(error)) if is_write_conflict(&error) => {
                    if attempt >= self.policy.max_attempts {
                        tracing::error!(
                            %run_id,
                            user_id,
                            attempts = attempt,
                            "Suggestion regeneration exhausted its retries"
                        );
                        return Err(EngineError::RegenerationFailed { attempts: attempt });
                    }
                    tracing::warn!(
                        %run_id,
                        user_id,
                        attempt,
                        %error,
                        "Write conflict during regeneration, retrying"
                    );
                    tokio::time::sleep(self.policy.delay(attempt)).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }

    /// One regeneration attempt over a fresh snapshot.
    async fn regenerate_once(
        &self,
        user_id: DbId,
        store: &dyn SuggestionStore,
        source: &dyn CandidateSource,
        stats: &dyn CompletionStats,
    ) -> EngineResult<Vec<Enrollment>> {
        let profile_row = store.load_profile(user_id).await?.ok_or_else(|| {
            EngineError::InvalidSkillProfile(format!("user {user_id} has no skill profile"))
        })?;
        let profile = profile_row.to_profile();

        let ranked = AdaptiveSearch::new(source, stats)
            .recommend(user_id, &profile)
            .await?;

        // Courses the user already actively takes must not resurface as
        // suggestions.
        let mut rows = Vec::with_capacity(ranked.len());
        for candidate in &ranked {
            if store.has_active_enrollment(user_id, candidate.course_id).await? {
                continue;
            }
            rows.push(CreateEnrollment {
                user_id,
                course_id: candidate.course_id,
                profile_id: profile_row.id,
                is_active: false,
            });
        }

        Ok(store.replace_suggestions(user_id, &rows).await?)
    }

    // -----------------------------------------------------------------
    // Enrollment lifecycle
    // -----------------------------------------------------------------

    /// Guard against double-activating a course. Only activation paths
    /// call this; suggestions may coexist freely.
    pub async fn check_no_active_duplicate(
        &self,
        user_id: DbId,
        course_id: DbId,
    ) -> EngineResult<()> {
        if EnrollmentRepo::exists_active(&self.pool, user_id, course_id).await? {
            return Err(EngineError::DuplicateEnrollment { user_id, course_id });
        }
        Ok(())
    }

    /// Promote a suggestion to an active enrollment.
    pub async fn confirm_enrollment(&self, id: DbId) -> EngineResult<Enrollment> {
        let enrollment = self.fetch(id).await?;
        if enrollment.is_active {
            return Err(CoreError::Conflict(format!("enrollment {id} is already active")).into());
        }
        self.check_no_active_duplicate(enrollment.user_id, enrollment.course_id)
            .await?;

        // A concurrent confirm can still slip between the check and the
        // update; the partial unique index turns that race into a
        // unique violation.
        match EnrollmentRepo::activate(&self.pool, id).await {
            Ok(Some(active)) => {
                tracing::info!(
                    enrollment_id = id,
                    user_id = active.user_id,
                    course_id = active.course_id,
                    "Enrollment confirmed"
                );
                Ok(active)
            }
            Ok(None) => Err(CoreError::NotFound {
                entity: "enrollment",
                id,
            }
            .into()),
            Err(error) if is_write_conflict(&error) => Err(EngineError::DuplicateEnrollment {
                user_id: enrollment.user_id,
                course_id: enrollment.course_id,
            }),
            Err(error) => Err(error.into()),
        }
    }

    /// Remove a declined suggestion. Active enrollments cannot be
    /// removed here.
    pub async fn decline_enrollment(&self, id: DbId) -> EngineResult<()> {
        let enrollment = self.fetch(id).await?;
        if enrollment.is_active {
            return Err(CoreError::Conflict(format!(
                "enrollment {id} is active and cannot be declined"
            ))
            .into());
        }
        EnrollmentRepo::delete(&self.pool, id).await?;
        tracing::debug!(enrollment_id = id, user_id = enrollment.user_id, "Suggestion declined");
        Ok(())
    }

    /// Record progress on an active enrollment.
    pub async fn record_completion(
        &self,
        id: DbId,
        completion_pct: f64,
        total_points: i32,
        skill_score: f64,
    ) -> EngineResult<Enrollment> {
        if !(0.0..=100.0).contains(&completion_pct) {
            return Err(CoreError::Validation(format!(
                "completion percentage {completion_pct} outside [0, 100]"
            ))
            .into());
        }
        let enrollment = self.fetch(id).await?;
        if enrollment.is_suggestion() {
            return Err(CoreError::Conflict(format!(
                "enrollment {id} is only a suggestion, progress cannot be recorded"
            ))
            .into());
        }

        let updated = EnrollmentRepo::update_completion(
            &self.pool,
            id,
            completion_pct,
            total_points,
            skill_score,
        )
        .await?
        .ok_or(CoreError::NotFound {
            entity: "enrollment",
            id,
        })?;

        if updated.is_completed() && !enrollment.is_completed() {
            tracing::info!(
                enrollment_id = id,
                user_id = updated.user_id,
                completion_pct,
                "Enrollment crossed the completion threshold"
            );
        }
        Ok(updated)
    }

    async fn fetch(&self, id: DbId) -> EngineResult<Enrollment> {
        EnrollmentRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| {
                CoreError::NotFound {
                    entity: "enrollment",
                    id,
                }
                .into()
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
