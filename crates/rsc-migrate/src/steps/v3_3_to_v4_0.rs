use rsc_types::{
    Action3X, Action4X, Document3X, Document4X, Scenario3X, Scenario4X, Vulnerability3X,
    Vulnerability4X,
};

use crate::status::{
    ChangeLogEntry, MigrationChange40, MigrationChange40Action, MigrationChange40Scenario,
    StepReport, VulnerabilityRemap,
};

/// 3.3 → 4.0: the breaking generation change.
///
/// Vulnerabilities are mapped onto the 4.X categories and de-duplicated in
/// first-seen order. `existingActions` and every action's `owner`/`deadline`
/// are dropped. The step always requires a new approval, but a scenario only
/// appears in the change log if it actually lost or remapped something.
pub fn migrate_v3_3_to_v4_0(doc: Document3X) -> (Document4X, StepReport) {
    let mut log = Vec::new();
    let scenarios = doc
        .scenarios
        .into_iter()
        .map(|scenario| {
            let (migrated, change) = migrate_scenario(scenario);
            if !change.is_empty() {
                log.push(change);
            }
            migrated
        })
        .collect();

    let migrated = Document4X {
        title: doc.title,
        scope: Some(doc.scope).filter(|s| !s.is_empty()),
        valuations: doc.valuations,
        scenarios,
    };

    let entry =
        (!log.is_empty()).then(|| ChangeLogEntry::V40(MigrationChange40 { scenarios: log }));
    let report = StepReport {
        changes: true,
        requires_new_approval: true,
        entry,
    };
    (migrated, report)
}

/// Map a 3.X vulnerability to its 4.X category.
///
/// The flag is `true` when the category was renamed rather than carried over.
pub fn remap_vulnerability(old: Vulnerability3X) -> (Vulnerability4X, bool) {
    match old {
        Vulnerability3X::UserRepudiation => (Vulnerability4X::UnmonitoredUse, true),
        Vulnerability3X::CompromisedAdminUser => (Vulnerability4X::UnauthorizedAccess, true),
        Vulnerability3X::EscalationOfRights => (Vulnerability4X::UnauthorizedAccess, true),
        Vulnerability3X::DisclosedSecret => (Vulnerability4X::InformationLeak, true),
        Vulnerability3X::DenialOfService => (Vulnerability4X::ExcessiveUse, true),
        Vulnerability3X::DependencyVulnerability => {
            (Vulnerability4X::DependencyVulnerability, false)
        }
        Vulnerability3X::Misconfiguration => (Vulnerability4X::Misconfiguration, false),
        Vulnerability3X::InputTampering => (Vulnerability4X::InputTampering, false),
        Vulnerability3X::InformationLeak => (Vulnerability4X::InformationLeak, false),
    }
}

fn migrate_scenario(scenario: Scenario3X) -> (Scenario4X, MigrationChange40Scenario) {
    let mut vulnerabilities = Vec::with_capacity(scenario.vulnerabilities.len());
    let mut changed_vulnerabilities = Vec::new();
    for old in scenario.vulnerabilities {
        let (new, renamed) = remap_vulnerability(old);
        if renamed {
            changed_vulnerabilities.push(VulnerabilityRemap {
                old_value: old,
                new_value: new,
            });
        }
        if !vulnerabilities.contains(&new) {
            vulnerabilities.push(new);
        }
    }

    let mut changed_actions = Vec::new();
    let actions = scenario
        .actions
        .into_iter()
        .map(|action| {
            let (migrated, change) = migrate_action(action);
            changed_actions.extend(change);
            migrated
        })
        .collect();

    let change = MigrationChange40Scenario {
        id: scenario.id.clone(),
        title: scenario.title.clone(),
        removed_existing_actions: scenario.existing_actions.filter(|text| !text.is_empty()),
        changed_vulnerabilities,
        changed_actions,
    };

    let migrated = Scenario4X {
        id: scenario.id,
        title: scenario.title,
        description: scenario.description,
        url: scenario.url,
        threat_actors: scenario.threat_actors,
        vulnerabilities,
        risk: scenario.risk,
        remaining_risk: scenario.remaining_risk,
        actions,
    };
    (migrated, change)
}

fn migrate_action(action: Action3X) -> (Action4X, Option<MigrationChange40Action>) {
    let removed_owner = action.owner.filter(|s| !s.is_empty());
    let removed_deadline = action.deadline.filter(|s| !s.is_empty());
    let change =
        (removed_owner.is_some() || removed_deadline.is_some()).then(|| MigrationChange40Action {
            id: action.id.clone(),
            title: action.title.clone(),
            removed_owner,
            removed_deadline,
        });

    let migrated = Action4X {
        id: action.id,
        title: action.title,
        description: action.description,
        url: action.url,
        status: action.status,
        last_updated: None,
    };
    (migrated, change)
}
