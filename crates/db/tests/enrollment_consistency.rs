//! Integration tests for enrollment persistence invariants.
//!
//! Exercises the repository layer against a real database:
//! - The partial unique index allows one active row per (user, course)
//! - Suggestion replacement is atomic and idempotent at the row level
//! - Completion averages aggregate per course kind

use assert_matches::assert_matches;
use sqlx::PgPool;

use fluenta_core::skill::CourseKind;
use fluenta_db::models::course::{CreateCourse, STATUS_PUBLIC};
use fluenta_db::models::enrollment::CreateEnrollment;
use fluenta_db::repositories::{CourseRepo, EnrollmentRepo, SkillProfileRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_course(pool: &PgPool, name: &str, kind: CourseKind, diff_level: f64) -> i64 {
    CourseRepo::create(
        pool,
        &CreateCourse {
            name: name.to_string(),
            kind,
            diff_level,
            recom_level: 1.0,
            status: Some(STATUS_PUBLIC.to_string()),
            group_name: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn suggestion(user_id: i64, course_id: i64, profile_id: i64) -> CreateEnrollment {
    CreateEnrollment {
        user_id,
        course_id,
        profile_id,
        is_active: false,
    }
}

// ---------------------------------------------------------------------------
// Active-uniqueness invariant
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn second_active_row_for_same_pair_rejected(pool: PgPool) {
    let profile = SkillProfileRepo::get_or_create(&pool, 1).await.unwrap();
    let course = seed_course(&pool, "Reading", CourseKind::Reading, 2.0).await;

    EnrollmentRepo::create(
        &pool,
        &CreateEnrollment {
            user_id: 1,
            course_id: course,
            profile_id: profile.id,
            is_active: true,
        },
    )
    .await
    .unwrap();

    let result = EnrollmentRepo::create(
        &pool,
        &CreateEnrollment {
            user_id: 1,
            course_id: course,
            profile_id: profile.id,
            is_active: true,
        },
    )
    .await;

    assert_matches!(result, Err(sqlx::Error::Database(_)));
}

#[sqlx::test]
async fn multiple_suggestions_for_same_pair_allowed(pool: PgPool) {
    let profile = SkillProfileRepo::get_or_create(&pool, 1).await.unwrap();
    let course = seed_course(&pool, "Reading", CourseKind::Reading, 2.0).await;

    // Suggestions are not constrained by the partial index.
    for _ in 0..2 {
        EnrollmentRepo::create(&pool, &suggestion(1, course, profile.id))
            .await
            .unwrap();
    }

    assert!(!EnrollmentRepo::exists_active(&pool, 1, course).await.unwrap());
}

#[sqlx::test]
async fn exists_active_sees_only_active_rows(pool: PgPool) {
    let profile = SkillProfileRepo::get_or_create(&pool, 1).await.unwrap();
    let course = seed_course(&pool, "Writing", CourseKind::Writing, 3.0).await;

    let e = EnrollmentRepo::create(&pool, &suggestion(1, course, profile.id))
        .await
        .unwrap();
    assert!(!EnrollmentRepo::exists_active(&pool, 1, course).await.unwrap());

    EnrollmentRepo::activate(&pool, e.id).await.unwrap().unwrap();
    assert!(EnrollmentRepo::exists_active(&pool, 1, course).await.unwrap());

    let active = EnrollmentRepo::find_active(&pool, 1, course)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(active.id, e.id);
}

// ---------------------------------------------------------------------------
// Suggestion replacement
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn replace_suggestions_swaps_rows_atomically(pool: PgPool) {
    let profile = SkillProfileRepo::get_or_create(&pool, 1).await.unwrap();
    let a = seed_course(&pool, "A", CourseKind::Listening, 2.0).await;
    let b = seed_course(&pool, "B", CourseKind::Speaking, 2.0).await;
    let c = seed_course(&pool, "C", CourseKind::Reading, 2.0).await;

    EnrollmentRepo::replace_suggestions(
        &pool,
        1,
        &[suggestion(1, a, profile.id), suggestion(1, b, profile.id)],
    )
    .await
    .unwrap();

    let replaced = EnrollmentRepo::replace_suggestions(
        &pool,
        1,
        &[suggestion(1, c, profile.id)],
    )
    .await
    .unwrap();
    assert_eq!(replaced.len(), 1);

    let remaining = EnrollmentRepo::list_for_user(&pool, 1, Some(false)).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].course_id, c);
}

#[sqlx::test]
async fn replace_suggestions_preserves_active_rows(pool: PgPool) {
    let profile = SkillProfileRepo::get_or_create(&pool, 1).await.unwrap();
    let joined = seed_course(&pool, "Joined", CourseKind::Reading, 2.0).await;
    let suggested = seed_course(&pool, "Suggested", CourseKind::Writing, 2.0).await;

    let e = EnrollmentRepo::create(&pool, &suggestion(1, joined, profile.id))
        .await
        .unwrap();
    EnrollmentRepo::activate(&pool, e.id).await.unwrap();

    EnrollmentRepo::replace_suggestions(&pool, 1, &[suggestion(1, suggested, profile.id)])
        .await
        .unwrap();

    assert!(EnrollmentRepo::exists_active(&pool, 1, joined).await.unwrap());
    let all = EnrollmentRepo::list_for_user(&pool, 1, None).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[sqlx::test]
async fn replace_suggestions_scoped_to_one_user(pool: PgPool) {
    let p1 = SkillProfileRepo::get_or_create(&pool, 1).await.unwrap();
    let p2 = SkillProfileRepo::get_or_create(&pool, 2).await.unwrap();
    let course = seed_course(&pool, "Shared", CourseKind::Reading, 2.0).await;

    EnrollmentRepo::replace_suggestions(&pool, 1, &[suggestion(1, course, p1.id)])
        .await
        .unwrap();
    EnrollmentRepo::replace_suggestions(&pool, 2, &[suggestion(2, course, p2.id)])
        .await
        .unwrap();

    // Regenerating user 1 must not touch user 2's rows.
    EnrollmentRepo::replace_suggestions(&pool, 1, &[]).await.unwrap();

    assert!(EnrollmentRepo::list_for_user(&pool, 1, Some(false))
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        EnrollmentRepo::list_for_user(&pool, 2, Some(false))
            .await
            .unwrap()
            .len(),
        1
    );
}

#[sqlx::test]
async fn delete_all_suggested_reports_count(pool: PgPool) {
    let profile = SkillProfileRepo::get_or_create(&pool, 1).await.unwrap();
    let a = seed_course(&pool, "A", CourseKind::Listening, 2.0).await;
    let b = seed_course(&pool, "B", CourseKind::Reading, 2.0).await;

    EnrollmentRepo::create(&pool, &suggestion(1, a, profile.id)).await.unwrap();
    EnrollmentRepo::create(&pool, &suggestion(1, b, profile.id)).await.unwrap();

    let removed = EnrollmentRepo::delete_all_suggested(&pool, 1).await.unwrap();
    assert_eq!(removed, 2);

    let removed_again = EnrollmentRepo::delete_all_suggested(&pool, 1).await.unwrap();
    assert_eq!(removed_again, 0);
}

// ---------------------------------------------------------------------------
// Completion analytics
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn completion_average_aggregates_per_kind(pool: PgPool) {
    let profile = SkillProfileRepo::get_or_create(&pool, 1).await.unwrap();
    let r1 = seed_course(&pool, "R1", CourseKind::Reading, 2.0).await;
    let r2 = seed_course(&pool, "R2", CourseKind::Reading, 2.5).await;
    let w = seed_course(&pool, "W", CourseKind::Writing, 2.0).await;

    for (course, pct) in [(r1, 90.0), (r2, 70.0), (w, 10.0)] {
        let e = EnrollmentRepo::create(&pool, &suggestion(1, course, profile.id))
            .await
            .unwrap();
        EnrollmentRepo::update_completion(&pool, e.id, pct, 10, pct).await.unwrap();
    }

    let avg = EnrollmentRepo::recent_completion_average(&pool, 1, CourseKind::Reading, 30)
        .await
        .unwrap()
        .unwrap();
    assert!((avg - 80.0).abs() < 1e-9);
}

#[sqlx::test]
async fn completion_average_absent_without_history(pool: PgPool) {
    let avg = EnrollmentRepo::recent_completion_average(&pool, 99, CourseKind::Listening, 30)
        .await
        .unwrap();
    assert_eq!(avg, None);
}

// ---------------------------------------------------------------------------
// Profile bootstrap
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn get_or_create_is_idempotent(pool: PgPool) {
    let first = SkillProfileRepo::get_or_create(&pool, 7).await.unwrap();
    assert_eq!(first.listening_score, 1.0);
    assert_eq!(first.previous_writing_score, 1.0);

    let second = SkillProfileRepo::get_or_create(&pool, 7).await.unwrap();
    assert_eq!(second.id, first.id);
}

#[sqlx::test]
async fn level_override_seeds_band_midpoint(pool: PgPool) {
    use fluenta_core::level::ProficiencyBand;

    let row = SkillProfileRepo::apply_level_override(&pool, 7, ProficiencyBand::Intermediate)
        .await
        .unwrap();

    let mid = ProficiencyBand::Intermediate.midpoint();
    assert_eq!(row.listening_score, mid);
    assert_eq!(row.previous_reading_score, mid);

    // Overriding an existing profile replaces the scores in place.
    let again = SkillProfileRepo::apply_level_override(&pool, 7, ProficiencyBand::Advanced)
        .await
        .unwrap();
    assert_eq!(again.id, row.id);
    assert_eq!(again.writing_score, ProficiencyBand::Advanced.midpoint());
}
