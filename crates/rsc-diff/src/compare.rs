//! Migrate-then-diff comparison of two typed records.

use serde::Serialize;
use tracing::debug;

use rsc_migrate::{migrate_to, MigrationOptions, MigrationStatus};
use rsc_types::{Document3X, Document4X, RiskDocument, SchemaVersion};

use crate::error::{DiffError, DiffResult};
use crate::tracked::TrackedProperty;
use crate::v3x::{self, DocumentChange3X};
use crate::v4x::{self, DocumentChange4X};

/// Field-level changes, shaped by the records' version family.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DocumentChange {
    V3X(DocumentChange3X),
    V4X(DocumentChange4X),
}

/// A comparison result together with what migration did to the old record.
///
/// Differences also listed in `migration_status` come from the schema
/// upgrade, not from the author.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionedChange {
    pub schema_version: SchemaVersion,
    pub change: DocumentChange,
    pub migration_status: MigrationStatus,
}

impl VersionedChange {
    pub fn scenarios_added(&self) -> usize {
        self.count_scenarios(TrackedProperty::is_added, TrackedProperty::is_added)
    }

    pub fn scenarios_deleted(&self) -> usize {
        self.count_scenarios(TrackedProperty::is_deleted, TrackedProperty::is_deleted)
    }

    pub fn scenarios_changed(&self) -> usize {
        self.count_scenarios(
            TrackedProperty::is_content_changed,
            TrackedProperty::is_content_changed,
        )
    }

    fn count_scenarios(
        &self,
        v3: fn(&TrackedProperty<rsc_types::Scenario3X, v3x::ScenarioChange3X>) -> bool,
        v4: fn(&TrackedProperty<rsc_types::Scenario4X, v4x::ScenarioChange4X>) -> bool,
    ) -> usize {
        match &self.change {
            DocumentChange::V3X(change) => change.scenarios.iter().filter(|s| v3(s)).count(),
            DocumentChange::V4X(change) => change.scenarios.iter().filter(|s| v4(s)).count(),
        }
    }
}

/// Compare `updated` against `old`.
///
/// `old` is first migrated to `updated`'s version (never the other way), then
/// both are diffed field by field. Neither input is modified.
pub fn compare(
    updated: &RiskDocument,
    old: &RiskDocument,
    options: &MigrationOptions,
) -> DiffResult<VersionedChange> {
    let unsupported = || DiffError::UnsupportedComparison {
        updated: updated.version_label(),
        old: old.version_label(),
    };

    let Some(target) = updated.version() else {
        return Err(unsupported());
    };
    if old.is_unknown() {
        return Err(unsupported());
    }

    let (migrated, migration_status) = migrate_to(old.clone(), target, options)?;
    debug!(
        version = %target,
        family = ?target.family(),
        migrated = !migration_status.steps_applied().is_empty(),
        "comparing documents"
    );

    let change = match updated {
        RiskDocument::V3_2(new) | RiskDocument::V3_3(new) => {
            let old = v3_body(&migrated).ok_or_else(unsupported)?;
            DocumentChange::V3X(v3x::diff_document(old, new))
        }
        RiskDocument::V4_0(new) | RiskDocument::V4_1(new) | RiskDocument::V4_2(new) => {
            let old = v4_body(&migrated).ok_or_else(unsupported)?;
            DocumentChange::V4X(v4x::diff_document(old, new))
        }
        RiskDocument::Unknown(_) => return Err(unsupported()),
    };

    Ok(VersionedChange {
        schema_version: target,
        change,
        migration_status,
    })
}

fn v3_body(document: &RiskDocument) -> Option<&Document3X> {
    match document {
        RiskDocument::V3_2(body) | RiskDocument::V3_3(body) => Some(body),
        RiskDocument::V4_0(_)
        | RiskDocument::V4_1(_)
        | RiskDocument::V4_2(_)
        | RiskDocument::Unknown(_) => None,
    }
}

fn v4_body(document: &RiskDocument) -> Option<&Document4X> {
    match document {
        RiskDocument::V4_0(body) | RiskDocument::V4_1(body) | RiskDocument::V4_2(body) => {
            Some(body)
        }
        RiskDocument::V3_2(_) | RiskDocument::V3_3(_) | RiskDocument::Unknown(_) => None,
    }
}
