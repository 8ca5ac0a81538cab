//! Structural comparison of risk scorecards.
//!
//! [`compare`] migrates the older record up to the newer record's schema
//! version and then diffs the two field by field, matching scenarios and
//! actions by id. Every compared field is reported as a [`TrackedProperty`].
//! [`diff_flat`] is a schema-unaware path diff for raw documents.
//!
//! # Key Types
//!
//! - [`VersionedChange`] -- comparison result plus the migration status of the old record
//! - [`TrackedProperty`] -- per-field change marker
//! - [`DocumentChange3X`] / [`DocumentChange4X`] -- family-specific change records
//! - [`FlatDiff`] -- paths only in base, only in head, or differing

pub mod compare;
pub mod error;
pub mod flat;
pub mod tracked;
pub mod v3x;
pub mod v4x;

pub use compare::{compare, DocumentChange, VersionedChange};
pub use error::{DiffError, DiffResult};
pub use flat::{diff_flat, diff_flat_values, flatten, FlatDiff};
pub use tracked::{
    compare_scalar, diff_keyed, diff_risk, diff_values, track, RiskChange, ScalarPolicy,
    TrackedProperty,
};
pub use v3x::{ActionChange3X, DocumentChange3X, ScenarioChange3X};
pub use v4x::{ActionChange4X, DocumentChange4X, ScenarioChange4X};
