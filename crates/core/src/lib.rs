//! Pure domain logic for the learning-path recommendation engine.
//!
//! This crate contains no database dependencies. All evaluation is done
//! against pre-loaded data (skill profiles, completion averages, course
//! candidates) passed in by the caller; the `fluenta-db` and
//! `fluenta-engine` crates own storage and orchestration.

pub mod candidate;
pub mod difficulty;
pub mod error;
pub mod level;
pub mod profile;
pub mod ranking;
pub mod readiness;
pub mod skill;
pub mod types;
