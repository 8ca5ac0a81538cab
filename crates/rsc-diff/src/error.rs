//! Error types for the diff crate.

use rsc_migrate::MigrationError;

/// Errors that can occur during comparison.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// One of the records has no known schema version.
    #[error("comparison not supported between {updated} and {old} documents")]
    UnsupportedComparison { updated: String, old: String },

    /// The old record could not be brought to the updated record's version.
    #[error("migration failed: {0}")]
    Migration(#[from] MigrationError),

    /// A raw payload is not a structured object.
    #[error("documents are not comparable: {0}")]
    NotComparable(String),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
