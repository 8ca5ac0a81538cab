//! Field-level comparison of 4.X records.
//!
//! Unchanged scalars are left out of the result entirely.

use chrono::{DateTime, Utc};
use serde::Serialize;

use rsc_types::{
    Action4X, ActionStatus, Document4X, Identified, Risk, Scenario4X, ThreatActor, Valuation,
    Vulnerability4X,
};

use crate::tracked::{
    compare_scalar, diff_keyed, diff_risk, diff_values, RiskChange, ScalarPolicy, TrackedProperty,
};

const POLICY: ScalarPolicy = ScalarPolicy::OmitUnchanged;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentChange4X {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<TrackedProperty<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<TrackedProperty<Option<String>>>,
    pub valuations: Vec<TrackedProperty<Valuation>>,
    pub scenarios: Vec<TrackedProperty<Scenario4X, ScenarioChange4X>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioChange4X {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<TrackedProperty<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<TrackedProperty<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<TrackedProperty<Option<String>>>,
    pub threat_actors: Vec<TrackedProperty<ThreatActor>>,
    pub vulnerabilities: Vec<TrackedProperty<Vulnerability4X>>,
    pub risk: TrackedProperty<Risk, RiskChange>,
    pub remaining_risk: TrackedProperty<Risk, RiskChange>,
    pub actions: Vec<TrackedProperty<Action4X, ActionChange4X>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionChange4X {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<TrackedProperty<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<TrackedProperty<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<TrackedProperty<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TrackedProperty<ActionStatus>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<TrackedProperty<Option<DateTime<Utc>>>>,
}

impl Identified for ScenarioChange4X {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for ActionChange4X {
    fn id(&self) -> &str {
        &self.id
    }
}

pub fn diff_document(old: &Document4X, new: &Document4X) -> DocumentChange4X {
    DocumentChange4X {
        title: compare_scalar(&old.title, &new.title, POLICY),
        scope: compare_scalar(&old.scope, &new.scope, POLICY),
        valuations: diff_values(&old.valuations, &new.valuations),
        scenarios: diff_keyed(&old.scenarios, &new.scenarios, diff_scenario),
    }
}

pub fn diff_scenario(old: &Scenario4X, new: &Scenario4X) -> ScenarioChange4X {
    ScenarioChange4X {
        id: new.id.clone(),
        title: compare_scalar(&old.title, &new.title, POLICY),
        description: compare_scalar(&old.description, &new.description, POLICY),
        url: compare_scalar(&old.url, &new.url, POLICY),
        threat_actors: diff_values(&old.threat_actors, &new.threat_actors),
        vulnerabilities: diff_values(&old.vulnerabilities, &new.vulnerabilities),
        risk: diff_risk(&old.risk, &new.risk),
        remaining_risk: diff_risk(&old.remaining_risk, &new.remaining_risk),
        actions: diff_keyed(&old.actions, &new.actions, diff_action),
    }
}

pub fn diff_action(old: &Action4X, new: &Action4X) -> ActionChange4X {
    ActionChange4X {
        id: new.id.clone(),
        title: compare_scalar(&old.title, &new.title, POLICY),
        description: compare_scalar(&old.description, &new.description, POLICY),
        url: compare_scalar(&old.url, &new.url, POLICY),
        status: compare_scalar(&old.status, &new.status, POLICY),
        last_updated: compare_scalar(&old.last_updated, &new.last_updated, POLICY),
    }
}
