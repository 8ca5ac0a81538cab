//! Value objects shared by every record shape.

use serde::{Deserialize, Serialize};

/// Anything with a stable identity key that survives edits and migrations.
pub trait Identified {
    fn id(&self) -> &str;
}

/// Classification of an asset the assessment covers. Has no identity key;
/// two valuations are the same valuation when every field matches.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Valuation {
    pub description: String,
    pub confidentiality: String,
    pub integrity: String,
    pub availability: String,
}

/// Probability (events per year) and consequence (cost per event).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub probability: f64,
    pub consequence: f64,
}

impl Risk {
    pub fn new(probability: f64, consequence: f64) -> Self {
        Self {
            summary: None,
            probability,
            consequence,
        }
    }
}
