//! Batch suggestion refresh across all users with a skill profile.

use serde::Serialize;

use fluenta_db::repositories::SkillProfileRepo;

use crate::error::{EngineError, EngineResult};
use crate::manager::EnrollmentManager;

/// Outcome counts of a batch refresh run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RefreshSummary {
    /// Users whose suggestions were replaced.
    pub refreshed: usize,
    /// Users skipped for benign reasons (no suitable courses, no
    /// usable profile).
    pub skipped: usize,
    /// Users whose refresh hit an unexpected error.
    pub failed: usize,
}

/// Refresh suggestions for every known user.
///
/// Per-user failures are isolated: one bad user never aborts the run.
/// Only listing the users at all can fail the batch.
pub async fn refresh_all_users(manager: &EnrollmentManager) -> EngineResult<RefreshSummary> {
    let user_ids = SkillProfileRepo::list_user_ids(manager.pool()).await?;
    tracing::info!(users = user_ids.len(), "Starting batch suggestion refresh");

    let mut summary = RefreshSummary::default();
    for user_id in user_ids {
        match manager.replace_suggestions(user_id).await {
            Ok(rows) => {
                summary.refreshed += 1;
                tracing::debug!(user_id, count = rows.len(), "User suggestions refreshed");
            }
            Err(EngineError::NoSuitableCourses) => {
                summary.skipped += 1;
                tracing::info!(user_id, "No suitable courses for user, skipping");
            }
            Err(EngineError::InvalidSkillProfile(reason)) => {
                summary.skipped += 1;
                tracing::warn!(user_id, %reason, "Unusable skill profile, skipping");
            }
            Err(error) => {
                summary.failed += 1;
                tracing::error!(user_id, %error, "Suggestion refresh failed for user");
            }
        }
    }

    tracing::info!(
        refreshed = summary.refreshed,
        skipped = summary.skipped,
        failed = summary.failed,
        "Batch suggestion refresh finished"
    );
    Ok(summary)
}
