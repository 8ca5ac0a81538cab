//! Migration driver: applies one step at a time until the target is reached.

use tracing::debug;

use rsc_types::{RiskDocument, SchemaVersion};

use crate::config::MigrationOptions;
use crate::error::{MigrationError, MigrationResult};
use crate::status::{MigrationStatus, MigrationVersions, StepReport};
use crate::steps;

/// Migrate `document` to the version named by `target`.
///
/// `target` must parse as a supported schema version.
pub fn migrate(
    document: RiskDocument,
    target: &str,
    options: &MigrationOptions,
) -> MigrationResult<(RiskDocument, MigrationStatus)> {
    let target_version = SchemaVersion::parse(target)
        .filter(SchemaVersion::is_supported)
        .ok_or_else(|| MigrationError::InvalidTarget(target.to_string()))?;
    migrate_to(document, target_version, options)
}

/// Migrate `document` forward to `target`.
///
/// Migrating a record to its own version returns it untouched with an empty
/// status. Migration never goes backwards.
pub fn migrate_to(
    document: RiskDocument,
    target: SchemaVersion,
    options: &MigrationOptions,
) -> MigrationResult<(RiskDocument, MigrationStatus)> {
    if !target.is_supported() {
        return Err(MigrationError::InvalidTarget(target.to_string()));
    }
    let Some(source) = document.version() else {
        return Err(MigrationError::UnknownSource {
            found: document.version_label(),
        });
    };
    if source == target {
        return Ok((document, MigrationStatus::default()));
    }
    if target < source {
        return Err(MigrationError::UnsupportedMigration {
            from: source,
            to: target,
        });
    }

    let mut current = document;
    let mut status = MigrationStatus::default();
    while let Some(from) = current.version().filter(|v| *v != target) {
        let (next, report) = apply_next_step(current, source, target, options)?;
        let to = next.version().ok_or(MigrationError::UnsupportedMigration {
            from: source,
            to: target,
        })?;
        debug!(%from, %to, changed = report.changes, "applied migration step");
        status = status.absorb(MigrationVersions::new(from, to), report);
        current = next;
    }

    status.migration_versions = Some(MigrationVersions::new(source, target));
    debug!(
        %source,
        %target,
        steps = status.applied_steps.len(),
        requires_approval = status.migration_requires_new_approval,
        "migration complete"
    );
    Ok((current, status))
}

fn apply_next_step(
    document: RiskDocument,
    source: SchemaVersion,
    target: SchemaVersion,
    options: &MigrationOptions,
) -> MigrationResult<(RiskDocument, StepReport)> {
    match document {
        RiskDocument::V3_2(doc) => {
            let (next, report) = steps::migrate_v3_2_to_v3_3(doc);
            Ok((RiskDocument::V3_3(next), report))
        }
        RiskDocument::V3_3(doc) => {
            let (next, report) = steps::migrate_v3_3_to_v4_0(doc);
            Ok((RiskDocument::V4_0(next), report))
        }
        RiskDocument::V4_0(doc) => {
            let (next, report) = steps::migrate_v4_0_to_v4_1(doc);
            Ok((RiskDocument::V4_1(next), report))
        }
        RiskDocument::V4_1(doc) => {
            let (next, report) = steps::migrate_v4_1_to_v4_2(doc, options.last_published);
            Ok((RiskDocument::V4_2(next), report))
        }
        // No step leaves 4.2 yet.
        RiskDocument::V4_2(_) => Err(MigrationError::UnsupportedMigration {
            from: source,
            to: target,
        }),
        RiskDocument::Unknown(unknown) => Err(MigrationError::UnknownSource {
            found: unknown.schema_version.unwrap_or_else(|| "unknown".to_string()),
        }),
    }
}
