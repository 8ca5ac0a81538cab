//! Record shape shared by schema versions 4.0, 4.1 and 4.2.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{ActionStatus, ThreatActor, Vulnerability4X};
use crate::record::{Identified, Risk, Valuation};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document4X {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default)]
    pub valuations: Vec<Valuation>,
    #[serde(default)]
    pub scenarios: Vec<Scenario4X>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario4X {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub threat_actors: Vec<ThreatActor>,
    #[serde(default)]
    pub vulnerabilities: Vec<Vulnerability4X>,
    pub risk: Risk,
    pub remaining_risk: Risk,
    #[serde(default)]
    pub actions: Vec<Action4X>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action4X {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub status: ActionStatus,
    /// Set from the record's last publication when it is lifted to 4.2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Identified for Scenario4X {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Action4X {
    fn id(&self) -> &str {
        &self.id
    }
}
