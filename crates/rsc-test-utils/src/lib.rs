//! Record builders shared by the test suites.
//!
//! Builders take an id and fill every other field with a fixed default, so a
//! test only spells out the fields it is about.

use rsc_types::{
    Action3X, Action4X, ActionStatus, Document3X, Document4X, Risk, Scenario3X, Scenario4X,
    ThreatActor, Valuation, Vulnerability3X, Vulnerability4X,
};

pub fn valuation() -> Valuation {
    Valuation {
        description: "Card data".into(),
        confidentiality: "Confidential".into(),
        integrity: "Critical".into(),
        availability: "Expected".into(),
    }
}

pub fn action3(id: &str) -> Action3X {
    Action3X {
        id: id.into(),
        title: format!("Action {id}"),
        description: String::new(),
        url: None,
        status: ActionStatus::NotStarted,
        owner: None,
        deadline: None,
    }
}

pub fn scenario3(id: &str) -> Scenario3X {
    Scenario3X {
        id: id.into(),
        title: format!("Scenario {id}"),
        description: "Something goes wrong".into(),
        url: None,
        threat_actors: vec![ThreatActor::Hacktivist],
        vulnerabilities: vec![Vulnerability3X::InputTampering],
        risk: Risk::new(0.3, 1234.5),
        remaining_risk: Risk::new(0.3, 1234.5),
        existing_actions: None,
        actions: vec![action3("a1")],
    }
}

/// One scenario with a remappable vulnerability, an existing-actions note,
/// and an action carrying owner and deadline.
pub fn v3_document() -> Document3X {
    let mut action = action3("a1");
    action.title = "Rotate key".into();
    action.owner = Some("team-payments".into());
    action.deadline = Some("2024-06-01".into());

    let mut scenario = scenario3("s1");
    scenario.title = "Leaked API key".into();
    scenario.description = "Key checked into git".into();
    scenario.vulnerabilities = vec![Vulnerability3X::DisclosedSecret];
    scenario.risk = Risk::new(1.0, 30_000.0);
    scenario.remaining_risk = Risk::new(0.1, 30_000.0);
    scenario.existing_actions = Some("Secret scanning in CI".into());
    scenario.actions = vec![action];

    Document3X {
        title: "Payment service".into(),
        scope: "Card processing".into(),
        valuations: vec![valuation()],
        scenarios: vec![scenario],
    }
}

pub fn action4(id: &str) -> Action4X {
    Action4X {
        id: id.into(),
        title: format!("Action {id}"),
        description: String::new(),
        url: None,
        status: ActionStatus::InProgress,
        last_updated: None,
    }
}

pub fn scenario4(id: &str) -> Scenario4X {
    Scenario4X {
        id: id.into(),
        title: format!("Scenario {id}"),
        description: "Something goes wrong".into(),
        url: None,
        threat_actors: vec![ThreatActor::Hacktivist],
        vulnerabilities: vec![Vulnerability4X::InputTampering],
        risk: Risk::new(0.3, 1234.5),
        remaining_risk: Risk::new(0.3, 1234.5),
        actions: vec![action4("a1")],
    }
}

pub fn v4_document() -> Document4X {
    Document4X {
        title: "Payment service".into(),
        scope: Some("Card processing".into()),
        valuations: vec![valuation()],
        scenarios: vec![scenario4("s1")],
    }
}
