//! Error types for the migration crate.

use rsc_types::SchemaVersion;

/// Errors that can occur during migration.
///
/// Every variant means the requested migration is unsupported. None of them
/// is transient, and a failed migration never yields a partial document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// No forward path from `from` to `to`. Covers downgrades.
    #[error("unsupported migration from {from} to {to}")]
    UnsupportedMigration {
        from: SchemaVersion,
        to: SchemaVersion,
    },

    /// The source record has no known schema version.
    #[error("unsupported migration: source schema version {found:?} is not supported")]
    UnknownSource { found: String },

    /// The target is unparseable or has no record shape.
    #[error("unsupported migration: invalid target version {0:?}")]
    InvalidTarget(String),
}

impl MigrationError {
    /// All migration errors are in the unsupported-migration category.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedMigration { .. } | Self::UnknownSource { .. } | Self::InvalidTarget(_)
        )
    }
}

/// Convenience alias for migration results.
pub type MigrationResult<T> = Result<T, MigrationError>;
