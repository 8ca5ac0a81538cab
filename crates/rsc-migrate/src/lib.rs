//! Forward-only schema migration for risk scorecards.
//!
//! Each adjacent version pair has one pure step function in [`steps`]. The
//! driver in [`engine`] applies steps in sequence and folds their reports
//! into a [`MigrationStatus`] recording exactly what the migration itself
//! changed, and whether those changes call for a fresh approval.
//!
//! # Key Types
//!
//! - [`migrate`] / [`migrate_to`] -- run a migration
//! - [`MigrationStatus`] -- accumulated flags and per-step change logs
//! - [`MigrationOptions`] -- external inputs (last publication time)
//! - [`MigrationError`] -- unsupported migration

pub mod config;
pub mod engine;
pub mod error;
pub mod status;
pub mod steps;

pub use config::MigrationOptions;
pub use engine::{migrate, migrate_to};
pub use error::{MigrationError, MigrationResult};
pub use status::{
    ChangeLogEntry, MigrationChange40, MigrationChange40Action, MigrationChange40Scenario,
    MigrationChange41, MigrationChange41Scenario, MigrationChange42, MigrationChange42Action,
    MigrationChange42Scenario, MigrationChangedValue, MigrationStatus, MigrationVersions,
    StepReport, VulnerabilityRemap,
};
