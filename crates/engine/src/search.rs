//! Adaptive course search.
//!
//! One search computes a difficulty window per skill axis, fetches
//! candidates across all axes, and widens the upper bounds in lockstep
//! until at least one recommendable course appears or every window hits
//! the ceiling.

use fluenta_core::candidate::Candidate;
use fluenta_core::difficulty::{self, DifficultyRange};
use fluenta_core::profile::SkillProfile;
use fluenta_core::ranking;
use fluenta_core::readiness::{self, CompletionAverages};
use fluenta_core::skill::{CourseKind, Skill};
use fluenta_core::types::DbId;

use crate::error::{EngineError, EngineResult};
use crate::source::{CandidateSource, CompletionStats};

pub struct AdaptiveSearch<'a> {
    source: &'a dyn CandidateSource,
    stats: &'a dyn CompletionStats,
}

impl<'a> AdaptiveSearch<'a> {
    pub fn new(source: &'a dyn CandidateSource, stats: &'a dyn CompletionStats) -> Self {
        Self { source, stats }
    }

    /// Produce the ranked recommendation list for one user.
    ///
    /// Fails with `InvalidSkillProfile` for an out-of-range profile and
    /// with `NoSuitableCourses` when widening is exhausted without a
    /// single recommendable course.
    pub async fn recommend(
        &self,
        user_id: DbId,
        profile: &SkillProfile,
    ) -> EngineResult<Vec<Candidate>> {
        profile
            .validate()
            .map_err(EngineError::InvalidSkillProfile)?;

        let completion = self.completion_averages(user_id).await?;
        let ready = readiness::all_skills_ready(profile, &completion);

        // Fixed axis order keeps the stable ranking deterministic.
        let mut axes: Vec<(CourseKind, DifficultyRange)> = Skill::ALL
            .iter()
            .map(|skill| {
                let kind = skill.course_kind();
                let range =
                    difficulty::recommended_range_for_axis(profile, kind, completion.get(*skill));
                (kind, range)
            })
            .collect();
        if ready {
            let avg = self
                .stats
                .recent_average(user_id, CourseKind::AllSkills)
                .await?;
            axes.push((
                CourseKind::AllSkills,
                difficulty::recommended_range_for_axis(profile, CourseKind::AllSkills, avg),
            ));
        }

        tracing::debug!(
            user_id,
            all_skills_ready = ready,
            axes = ?axes,
            "Starting adaptive course search"
        );

        loop {
            let mut found = Vec::new();
            for (kind, range) in &axes {
                let batch = self.source.candidates_in_range(*kind, *range).await?;
                found.extend(batch.into_iter().filter(|c| c.is_recommendable_for(profile)));
            }

            if !found.is_empty() {
                return Ok(ranking::rank(found, profile, ready));
            }

            let mut widened_any = false;
            for (_, range) in axes.iter_mut() {
                if !range.at_ceiling() {
                    *range = range.widened();
                    widened_any = true;
                }
            }
            if !widened_any {
                tracing::debug!(user_id, "Adaptive search exhausted at the ceiling");
                return Err(EngineError::NoSuitableCourses);
            }
            tracing::trace!(user_id, axes = ?axes, "Widened search windows");
        }
    }

    async fn completion_averages(&self, user_id: DbId) -> EngineResult<CompletionAverages> {
        Ok(CompletionAverages {
            listening: self
                .stats
                .recent_average(user_id, CourseKind::Listening)
                .await?,
            speaking: self
                .stats
                .recent_average(user_id, CourseKind::Speaking)
                .await?,
            reading: self
                .stats
                .recent_average(user_id, CourseKind::Reading)
                .await?,
            writing: self
                .stats
                .recent_average(user_id, CourseKind::Writing)
                .await?,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
