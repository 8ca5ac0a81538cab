use chrono::{DateTime, Utc};

use rsc_types::{Document4X, Scenario4X};

use crate::status::{
    ChangeLogEntry, MigrationChange42, MigrationChange42Action, MigrationChange42Scenario,
    StepReport,
};

/// 4.1 → 4.2: stamp every action's `lastUpdated` with the record's last
/// publication time, or clear it if the record was never published.
///
/// Never requires a new approval.
pub fn migrate_v4_1_to_v4_2(
    doc: Document4X,
    last_published: Option<DateTime<Utc>>,
) -> (Document4X, StepReport) {
    let mut log = Vec::new();
    let scenarios = doc
        .scenarios
        .into_iter()
        .map(|scenario| {
            let (migrated, change) = migrate_scenario(scenario, last_published);
            log.extend(change);
            migrated
        })
        .collect();

    let changed = !log.is_empty();
    let report = StepReport {
        changes: changed,
        requires_new_approval: false,
        entry: changed.then(|| ChangeLogEntry::V42(MigrationChange42 { scenarios: log })),
    };
    (Document4X { scenarios, ..doc }, report)
}

fn migrate_scenario(
    mut scenario: Scenario4X,
    last_published: Option<DateTime<Utc>>,
) -> (Scenario4X, Option<MigrationChange42Scenario>) {
    let mut changed_actions = Vec::new();
    for action in &mut scenario.actions {
        if action.last_updated != last_published {
            action.last_updated = last_published;
            changed_actions.push(MigrationChange42Action {
                id: action.id.clone(),
                title: action.title.clone(),
                last_updated: last_published,
            });
        }
    }

    let change = (!changed_actions.is_empty()).then(|| MigrationChange42Scenario {
        id: scenario.id.clone(),
        title: scenario.title.clone(),
        changed_actions,
    });
    (scenario, change)
}
