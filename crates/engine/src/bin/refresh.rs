//! Batch suggestion refresh entry point, intended to run on a schedule.

use fluenta_engine::{refresh_all_users, EngineConfig, EnrollmentManager};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    fluenta_engine::telemetry::init_tracing();

    // --- Configuration ---
    let config = EngineConfig::from_env();
    tracing::info!(
        max_attempts = config.regen_max_attempts,
        backoff_ms = config.regen_backoff_ms,
        window_days = config.completion_window_days,
        "Loaded engine configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = fluenta_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    fluenta_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    fluenta_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Refresh ---
    let manager = EnrollmentManager::from_config(pool, &config);
    match refresh_all_users(&manager).await {
        Ok(summary) => {
            tracing::info!(
                refreshed = summary.refreshed,
                skipped = summary.skipped,
                failed = summary.failed,
                "Refresh run complete"
            );
        }
        Err(error) => {
            tracing::error!(%error, "Refresh run aborted");
            std::process::exit(1);
        }
    }
}
