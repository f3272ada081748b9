use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG` when set, otherwise defaults to debug-level
/// output for the engine crates.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fluenta_engine=debug,fluenta_db=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
