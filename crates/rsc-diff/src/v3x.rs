//! Field-level comparison of 3.X records.
//!
//! Unlike the 4.X comparison, scalars are always reported, `Unchanged`
//! included.

use serde::Serialize;

use rsc_types::{
    Action3X, ActionStatus, Document3X, Identified, Risk, Scenario3X, ThreatActor, Valuation,
    Vulnerability3X,
};

use crate::tracked::{
    compare_scalar, diff_keyed, diff_risk, diff_values, RiskChange, ScalarPolicy, TrackedProperty,
};

const POLICY: ScalarPolicy = ScalarPolicy::AlwaysEmit;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentChange3X {
    pub title: Option<TrackedProperty<String>>,
    pub scope: Option<TrackedProperty<String>>,
    pub valuations: Vec<TrackedProperty<Valuation>>,
    pub scenarios: Vec<TrackedProperty<Scenario3X, ScenarioChange3X>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioChange3X {
    pub id: String,
    pub title: Option<TrackedProperty<String>>,
    pub description: Option<TrackedProperty<String>>,
    pub url: Option<TrackedProperty<Option<String>>>,
    pub threat_actors: Vec<TrackedProperty<ThreatActor>>,
    pub vulnerabilities: Vec<TrackedProperty<Vulnerability3X>>,
    pub risk: TrackedProperty<Risk, RiskChange>,
    pub remaining_risk: TrackedProperty<Risk, RiskChange>,
    pub existing_actions: Option<TrackedProperty<Option<String>>>,
    pub actions: Vec<TrackedProperty<Action3X, ActionChange3X>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionChange3X {
    pub id: String,
    pub title: Option<TrackedProperty<String>>,
    pub description: Option<TrackedProperty<String>>,
    pub url: Option<TrackedProperty<Option<String>>>,
    pub status: Option<TrackedProperty<ActionStatus>>,
    pub owner: Option<TrackedProperty<Option<String>>>,
    pub deadline: Option<TrackedProperty<Option<String>>>,
}

impl Identified for ScenarioChange3X {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for ActionChange3X {
    fn id(&self) -> &str {
        &self.id
    }
}

pub fn diff_document(old: &Document3X, new: &Document3X) -> DocumentChange3X {
    DocumentChange3X {
        title: compare_scalar(&old.title, &new.title, POLICY),
        scope: compare_scalar(&old.scope, &new.scope, POLICY),
        valuations: diff_values(&old.valuations, &new.valuations),
        scenarios: diff_keyed(&old.scenarios, &new.scenarios, diff_scenario),
    }
}

pub fn diff_scenario(old: &Scenario3X, new: &Scenario3X) -> ScenarioChange3X {
    ScenarioChange3X {
        id: new.id.clone(),
        title: compare_scalar(&old.title, &new.title, POLICY),
        description: compare_scalar(&old.description, &new.description, POLICY),
        url: compare_scalar(&old.url, &new.url, POLICY),
        threat_actors: diff_values(&old.threat_actors, &new.threat_actors),
        vulnerabilities: diff_values(&old.vulnerabilities, &new.vulnerabilities),
        risk: diff_risk(&old.risk, &new.risk),
        remaining_risk: diff_risk(&old.remaining_risk, &new.remaining_risk),
        existing_actions: compare_scalar(&old.existing_actions, &new.existing_actions, POLICY),
        actions: diff_keyed(&old.actions, &new.actions, diff_action),
    }
}

pub fn diff_action(old: &Action3X, new: &Action3X) -> ActionChange3X {
    ActionChange3X {
        id: new.id.clone(),
        title: compare_scalar(&old.title, &new.title, POLICY),
        description: compare_scalar(&old.description, &new.description, POLICY),
        url: compare_scalar(&old.url, &new.url, POLICY),
        status: compare_scalar(&old.status, &new.status, POLICY),
        owner: compare_scalar(&old.owner, &new.owner, POLICY),
        deadline: compare_scalar(&old.deadline, &new.deadline, POLICY),
    }
}
