//! What a migration run changed.
//!
//! Each step that alters author data leaves a change log describing exactly
//! which values it rewrote or dropped. The driver folds those into one
//! [`MigrationStatus`] so reviewers can tell migration side effects apart
//! from the author's own edits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rsc_types::{SchemaVersion, Vulnerability3X, Vulnerability4X};

/// Outcome of a migration run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationStatus {
    /// Some step altered the record's data.
    pub migration_changes: bool,
    /// Some step altered the record in a way that needs a fresh approval.
    pub migration_requires_new_approval: bool,
    /// The overall `(from, to)` pair. Absent when no step ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migration_versions: Option<MigrationVersions>,
    /// Every step applied, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applied_steps: Vec<MigrationVersions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migration_change40: Option<MigrationChange40>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migration_change41: Option<MigrationChange41>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migration_change42: Option<MigrationChange42>,
}

impl MigrationStatus {
    /// Returns `true` if no step changed anything.
    pub fn is_empty(&self) -> bool {
        !self.migration_changes
            && !self.migration_requires_new_approval
            && self.migration_change40.is_none()
            && self.migration_change41.is_none()
            && self.migration_change42.is_none()
    }

    pub fn steps_applied(&self) -> &[MigrationVersions] {
        &self.applied_steps
    }

    /// Fold one step's report into the running status.
    pub(crate) fn absorb(mut self, step: MigrationVersions, report: StepReport) -> Self {
        self.migration_changes |= report.changes;
        self.migration_requires_new_approval |= report.requires_new_approval;
        match report.entry {
            Some(ChangeLogEntry::V40(change)) => self.migration_change40 = Some(change),
            Some(ChangeLogEntry::V41(change)) => self.migration_change41 = Some(change),
            Some(ChangeLogEntry::V42(change)) => self.migration_change42 = Some(change),
            None => {}
        }
        self.applied_steps.push(step);
        self
    }
}

/// A `(from, to)` version pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationVersions {
    pub from_version: SchemaVersion,
    pub to_version: SchemaVersion,
}

impl MigrationVersions {
    pub fn new(from_version: SchemaVersion, to_version: SchemaVersion) -> Self {
        Self {
            from_version,
            to_version,
        }
    }
}

/// What a single step reports back to the driver.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    pub changes: bool,
    pub requires_new_approval: bool,
    pub entry: Option<ChangeLogEntry>,
}

impl StepReport {
    /// A step that only bumped the version.
    pub fn unchanged() -> Self {
        Self::default()
    }
}

/// Per-step change log.
#[derive(Clone, Debug, PartialEq)]
pub enum ChangeLogEntry {
    V40(MigrationChange40),
    V41(MigrationChange41),
    V42(MigrationChange42),
}

/// A value rewritten by a migration step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationChangedValue<T> {
    pub old_value: T,
    pub new_value: T,
}

impl<T> MigrationChangedValue<T> {
    pub fn new(old_value: T, new_value: T) -> Self {
        Self {
            old_value,
            new_value,
        }
    }
}

/// Changes made by 3.3 → 4.0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationChange40 {
    pub scenarios: Vec<MigrationChange40Scenario>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationChange40Scenario {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed_existing_actions: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changed_vulnerabilities: Vec<VulnerabilityRemap>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changed_actions: Vec<MigrationChange40Action>,
}

impl MigrationChange40Scenario {
    pub fn is_empty(&self) -> bool {
        self.removed_existing_actions.is_none()
            && self.changed_vulnerabilities.is_empty()
            && self.changed_actions.is_empty()
    }
}

/// A 3.X vulnerability replaced by its 4.X counterpart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityRemap {
    pub old_value: Vulnerability3X,
    pub new_value: Vulnerability4X,
}

/// An action that lost its owner and/or deadline in 4.0.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationChange40Action {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed_owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed_deadline: Option<String>,
}

/// Changes made by 4.0 → 4.1.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationChange41 {
    pub scenarios: Vec<MigrationChange41Scenario>,
}

/// Rescaled risk values of one scenario. Only changed values are present.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationChange41Scenario {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_probability: Option<MigrationChangedValue<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_consequence: Option<MigrationChangedValue<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_remaining_probability: Option<MigrationChangedValue<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_remaining_consequence: Option<MigrationChangedValue<f64>>,
}

impl MigrationChange41Scenario {
    pub fn is_empty(&self) -> bool {
        self.change_probability.is_none()
            && self.change_consequence.is_none()
            && self.change_remaining_probability.is_none()
            && self.change_remaining_consequence.is_none()
    }
}

/// Changes made by 4.1 → 4.2.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationChange42 {
    pub scenarios: Vec<MigrationChange42Scenario>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationChange42Scenario {
    pub id: String,
    pub title: String,
    pub changed_actions: Vec<MigrationChange42Action>,
}

/// An action whose `lastUpdated` was stamped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationChange42Action {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_status_is_empty() {
        let status = MigrationStatus::default();
        assert!(status.is_empty());
        assert!(status.steps_applied().is_empty());
    }

    #[test]
    fn absorb_accumulates_flags_and_entries() {
        let change = MigrationChange41 { scenarios: vec![] };
        let status = MigrationStatus::default()
            .absorb(
                MigrationVersions::new(SchemaVersion::V3_2, SchemaVersion::V3_3),
                StepReport::unchanged(),
            )
            .absorb(
                MigrationVersions::new(SchemaVersion::V4_0, SchemaVersion::V4_1),
                StepReport {
                    changes: true,
                    requires_new_approval: true,
                    entry: Some(ChangeLogEntry::V41(change.clone())),
                },
            );
        assert!(status.migration_changes);
        assert!(status.migration_requires_new_approval);
        assert_eq!(status.migration_change41, Some(change));
        assert_eq!(status.steps_applied().len(), 2);
        assert!(!status.is_empty());
    }

    #[test]
    fn flags_never_reset() {
        let status = MigrationStatus::default()
            .absorb(
                MigrationVersions::new(SchemaVersion::V3_3, SchemaVersion::V4_0),
                StepReport {
                    changes: true,
                    requires_new_approval: true,
                    entry: None,
                },
            )
            .absorb(
                MigrationVersions::new(SchemaVersion::V4_0, SchemaVersion::V4_1),
                StepReport::unchanged(),
            );
        assert!(status.migration_changes);
        assert!(status.migration_requires_new_approval);
    }

    #[test]
    fn serializes_camel_case_and_skips_absent_logs() {
        let status = MigrationStatus {
            migration_changes: true,
            migration_versions: Some(MigrationVersions::new(
                SchemaVersion::V3_3,
                SchemaVersion::V4_0,
            )),
            ..Default::default()
        };
        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(
            value,
            json!({
                "migrationChanges": true,
                "migrationRequiresNewApproval": false,
                "migrationVersions": {"fromVersion": "3.3", "toVersion": "4.0"}
            })
        );
    }
}
