//! Recommendation and enrollment-consistency engine.
//!
//! Orchestrates the adaptive course search over the catalog, keeps the
//! one-active-enrollment rule intact across concurrent writes, and runs
//! the periodic batch refresh of suggested enrollments.

pub mod config;
pub mod error;
pub mod manager;
pub mod refresh;
pub mod retry;
pub mod search;
pub mod source;
pub mod telemetry;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use manager::EnrollmentManager;
pub use refresh::{refresh_all_users, RefreshSummary};
