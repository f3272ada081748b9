//! Integration tests for the course catalog queries.
//!
//! Exercises `CourseRepo` against a real database: range queries only
//! see PUBLIC courses, interval bounds are inclusive, and results come
//! back in difficulty order.

use sqlx::PgPool;

use fluenta_core::difficulty::DifficultyRange;
use fluenta_core::skill::CourseKind;
use fluenta_db::models::course::{CreateCourse, STATUS_PRIVATE, STATUS_PUBLIC};
use fluenta_db::repositories::CourseRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_course(name: &str, kind: CourseKind, diff_level: f64, status: &str) -> CreateCourse {
    CreateCourse {
        name: name.to_string(),
        kind,
        diff_level,
        recom_level: 1.0,
        status: Some(status.to_string()),
        group_name: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn range_query_returns_only_public_courses(pool: PgPool) {
    CourseRepo::create(
        &pool,
        &new_course("Listening A", CourseKind::Listening, 2.0, STATUS_PUBLIC),
    )
    .await
    .unwrap();
    CourseRepo::create(
        &pool,
        &new_course("Listening B", CourseKind::Listening, 2.0, STATUS_PRIVATE),
    )
    .await
    .unwrap();
    CourseRepo::create(
        &pool,
        &new_course("Listening C", CourseKind::Listening, 2.0, "DRAFT"),
    )
    .await
    .unwrap();

    let found = CourseRepo::find_by_kind_and_range(
        &pool,
        CourseKind::Listening,
        DifficultyRange { lo: 1.5, hi: 2.5 },
    )
    .await
    .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Listening A");
}

#[sqlx::test]
async fn range_bounds_are_inclusive(pool: PgPool) {
    for (name, level) in [("Low", 2.0), ("Mid", 2.5), ("High", 3.0), ("Out", 3.5)] {
        CourseRepo::create(
            &pool,
            &new_course(name, CourseKind::Reading, level, STATUS_PUBLIC),
        )
        .await
        .unwrap();
    }

    let found = CourseRepo::find_by_kind_and_range(
        &pool,
        CourseKind::Reading,
        DifficultyRange { lo: 2.0, hi: 3.0 },
    )
    .await
    .unwrap();

    let names: Vec<_> = found.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Low", "Mid", "High"]);
}

#[sqlx::test]
async fn range_query_filters_by_kind(pool: PgPool) {
    CourseRepo::create(
        &pool,
        &new_course("Writing", CourseKind::Writing, 3.0, STATUS_PUBLIC),
    )
    .await
    .unwrap();
    CourseRepo::create(
        &pool,
        &new_course("Speaking", CourseKind::Speaking, 3.0, STATUS_PUBLIC),
    )
    .await
    .unwrap();

    let found = CourseRepo::find_by_kind_and_range(
        &pool,
        CourseKind::Speaking,
        DifficultyRange { lo: 1.0, hi: 7.0 },
    )
    .await
    .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, "SPEAKING");
}

#[sqlx::test]
async fn out_of_range_difficulty_rejected_by_schema(pool: PgPool) {
    let result = CourseRepo::create(
        &pool,
        &new_course("Bad", CourseKind::Reading, 8.0, STATUS_PUBLIC),
    )
    .await;
    assert!(result.is_err());
}

#[sqlx::test]
async fn created_course_round_trips(pool: PgPool) {
    let created = CourseRepo::create(
        &pool,
        &new_course("Round Trip", CourseKind::AllSkills, 4.5, STATUS_PUBLIC),
    )
    .await
    .unwrap();

    let found = CourseRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Round Trip");
    assert_eq!(found.kind, "ALLSKILLS");
    assert_eq!(found.diff_level, 4.5);

    let candidate = found.to_candidate().unwrap();
    assert_eq!(candidate.kind, CourseKind::AllSkills);
}
