use rsc_types::{Document4X, Risk, Scenario4X};

use crate::status::{
    ChangeLogEntry, MigrationChange41, MigrationChange41Scenario, MigrationChangedValue, StepReport,
};

/// Preset probabilities (events per year) and their 4.1 replacements.
const PROBABILITY_PRESETS: [(f64, f64); 5] = [
    (0.01, 0.0025),
    (0.1, 0.05),
    (1.0, 1.0),
    (50.0, 20.0),
    (300.0, 400.0),
];

/// Preset consequences and their 4.1 replacements (powers of 20 times 1000).
const CONSEQUENCE_PRESETS: [(f64, f64); 5] = [
    (1_000.0, 8_000.0),
    (30_000.0, 160_000.0),
    (1_000_000.0, 3_200_000.0),
    (30_000_000.0, 64_000_000.0),
    (1_000_000_000.0, 1_280_000_000.0),
];

/// 4.0 → 4.1: move preset risk values onto the new scales.
///
/// Only exact preset values are rewritten. Custom values pass through.
pub fn migrate_v4_0_to_v4_1(doc: Document4X) -> (Document4X, StepReport) {
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

    let changed = !log.is_empty();
    let report = StepReport {
        changes: changed,
        requires_new_approval: changed,
        entry: changed.then(|| ChangeLogEntry::V41(MigrationChange41 { scenarios: log })),
    };
    (Document4X { scenarios, ..doc }, report)
}

pub fn rescale_probability(value: f64) -> f64 {
    lookup(&PROBABILITY_PRESETS, value)
}

pub fn rescale_consequence(value: f64) -> f64 {
    lookup(&CONSEQUENCE_PRESETS, value)
}

fn lookup(table: &[(f64, f64)], value: f64) -> f64 {
    table
        .iter()
        .find(|(preset, _)| *preset == value)
        .map_or(value, |(_, replacement)| *replacement)
}

fn migrate_scenario(scenario: Scenario4X) -> (Scenario4X, MigrationChange41Scenario) {
    let risk = rescale(&scenario.risk);
    let remaining_risk = rescale(&scenario.remaining_risk);

    let change = MigrationChange41Scenario {
        id: scenario.id.clone(),
        title: scenario.title.clone(),
        change_probability: changed_value(scenario.risk.probability, risk.probability),
        change_consequence: changed_value(scenario.risk.consequence, risk.consequence),
        change_remaining_probability: changed_value(
            scenario.remaining_risk.probability,
            remaining_risk.probability,
        ),
        change_remaining_consequence: changed_value(
            scenario.remaining_risk.consequence,
            remaining_risk.consequence,
        ),
    };

    let migrated = Scenario4X {
        risk,
        remaining_risk,
        ..scenario
    };
    (migrated, change)
}

fn rescale(risk: &Risk) -> Risk {
    Risk {
        summary: risk.summary.clone(),
        probability: rescale_probability(risk.probability),
        consequence: rescale_consequence(risk.consequence),
    }
}

fn changed_value(old: f64, new: f64) -> Option<MigrationChangedValue<f64>> {
    (old != new).then(|| MigrationChangedValue::new(old, new))
}
