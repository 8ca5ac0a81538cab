//! Record types for risk scorecards.
//!
//! A risk scorecard has been through several schema generations. This crate
//! models each generation as a variant of [`RiskDocument`] and provides the
//! adapter that reads raw JSON/YAML payloads into the right variant.
//!
//! # Key Types
//!
//! - [`SchemaVersion`] -- `major.minor` version with numeric ordering
//! - [`RiskDocument`] -- one variant per supported schema version, plus `Unknown`
//! - [`Document3X`] / [`Document4X`] -- the two record shapes
//! - [`Identified`] -- stable identity key for scenarios and actions

pub mod document;
pub mod enums;
pub mod error;
pub mod raw;
pub mod record;
pub mod v3x;
pub mod v4x;
pub mod version;

pub use document::{RiskDocument, UnknownDocument, SCHEMA_VERSION_FIELD};
pub use enums::{ActionStatus, ThreatActor, Vulnerability3X, Vulnerability4X};
pub use error::{TypeError, TypeResult};
pub use raw::{parse_value, RawFormat};
pub use record::{Identified, Risk, Valuation};
pub use v3x::{Action3X, Document3X, Scenario3X};
pub use v4x::{Action4X, Document4X, Scenario4X};
pub use version::{SchemaVersion, VersionFamily};
