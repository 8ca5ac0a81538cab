//! Record shape shared by schema versions 3.2 and 3.3.

use serde::{Deserialize, Serialize};

use crate::enums::{ActionStatus, ThreatActor, Vulnerability3X};
use crate::record::{Identified, Risk, Valuation};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document3X {
    pub title: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub valuations: Vec<Valuation>,
    #[serde(default)]
    pub scenarios: Vec<Scenario3X>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario3X {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub threat_actors: Vec<ThreatActor>,
    #[serde(default)]
    pub vulnerabilities: Vec<Vulnerability3X>,
    pub risk: Risk,
    pub remaining_risk: Risk,
    /// Free-text note on measures already in place. Dropped in 4.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_actions: Option<String>,
    #[serde(default)]
    pub actions: Vec<Action3X>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action3X {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub status: ActionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

impl Identified for Scenario3X {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Action3X {
    fn id(&self) -> &str {
        &self.id
    }
}
