//! Enumerated field values.
//!
//! Threat actors and action statuses are shared by every schema generation.
//! Vulnerability categories were redrawn in 4.0, so each family has its own set.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Who might exploit a scenario.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreatActor {
    ScriptKiddie,
    Hacktivist,
    RecklessEmployee,
    Insider,
    OrganisedCrime,
    TerroristOrganisation,
    NationOrGovernment,
}

/// Vulnerability categories of the 3.X schemas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Vulnerability3X {
    CompromisedAdminUser,
    DependencyVulnerability,
    DisclosedSecret,
    Misconfiguration,
    InputTampering,
    UserRepudiation,
    InformationLeak,
    DenialOfService,
    EscalationOfRights,
}

/// Vulnerability categories of the 4.X schemas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Vulnerability4X {
    FlawedDesign,
    Misconfiguration,
    DependencyVulnerability,
    UnauthorizedAccess,
    UnmonitoredUse,
    InputTampering,
    InformationLeak,
    ExcessiveUse,
}

/// Progress of a mitigating action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionStatus {
    NotStarted,
    InProgress,
    OnHold,
    Completed,
    Aborted,
}

impl fmt::Display for Vulnerability3X {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CompromisedAdminUser => "COMPROMISED_ADMIN_USER",
            Self::DependencyVulnerability => "DEPENDENCY_VULNERABILITY",
            Self::DisclosedSecret => "DISCLOSED_SECRET",
            Self::Misconfiguration => "MISCONFIGURATION",
            Self::InputTampering => "INPUT_TAMPERING",
            Self::UserRepudiation => "USER_REPUDIATION",
            Self::InformationLeak => "INFORMATION_LEAK",
            Self::DenialOfService => "DENIAL_OF_SERVICE",
            Self::EscalationOfRights => "ESCALATION_OF_RIGHTS",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Vulnerability4X {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FlawedDesign => "FLAWED_DESIGN",
            Self::Misconfiguration => "MISCONFIGURATION",
            Self::DependencyVulnerability => "DEPENDENCY_VULNERABILITY",
            Self::UnauthorizedAccess => "UNAUTHORIZED_ACCESS",
            Self::UnmonitoredUse => "UNMONITORED_USE",
            Self::InputTampering => "INPUT_TAMPERING",
            Self::InformationLeak => "INFORMATION_LEAK",
            Self::ExcessiveUse => "EXCESSIVE_USE",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&Vulnerability3X::DenialOfService).unwrap(),
            "\"DENIAL_OF_SERVICE\""
        );
        assert_eq!(
            serde_json::to_string(&ThreatActor::NationOrGovernment).unwrap(),
            "\"NATION_OR_GOVERNMENT\""
        );
        let status: ActionStatus = serde_json::from_str("\"IN_PROGRESS\"").unwrap();
        assert_eq!(status, ActionStatus::InProgress);
    }

    #[test]
    fn display_matches_wire_name() {
        let wire = serde_json::to_string(&Vulnerability4X::UnmonitoredUse).unwrap();
        assert_eq!(wire, format!("\"{}\"", Vulnerability4X::UnmonitoredUse));
        let wire = serde_json::to_string(&Vulnerability3X::EscalationOfRights).unwrap();
        assert_eq!(wire, format!("\"{}\"", Vulnerability3X::EscalationOfRights));
    }

    #[test]
    fn family_specific_values_are_rejected_across_families() {
        assert!(serde_json::from_str::<Vulnerability4X>("\"USER_REPUDIATION\"").is_err());
        assert!(serde_json::from_str::<Vulnerability3X>("\"EXCESSIVE_USE\"").is_err());
    }
}
