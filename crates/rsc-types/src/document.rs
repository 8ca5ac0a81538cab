//! The version-tagged record union and the adapter that builds it from raw
//! payloads by reading `schemaVersion`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

use crate::error::{TypeError, TypeResult};
use crate::raw;
use crate::v3x::Document3X;
use crate::v4x::Document4X;
use crate::version::{SchemaVersion, VersionFamily};

/// Field carrying the schema version in every payload.
pub const SCHEMA_VERSION_FIELD: &str = "schemaVersion";

/// A risk scorecard record at one specific schema version.
///
/// `Unknown` holds payloads whose version has no record shape. It is kept so
/// callers can round-trip such records, but it never migrates or compares.
#[derive(Clone, Debug, PartialEq)]
pub enum RiskDocument {
    V3_2(Document3X),
    V3_3(Document3X),
    V4_0(Document4X),
    V4_1(Document4X),
    V4_2(Document4X),
    Unknown(UnknownDocument),
}

/// A payload whose `schemaVersion` is missing, malformed or unsupported.
#[derive(Clone, Debug, PartialEq)]
pub struct UnknownDocument {
    /// The raw `schemaVersion` as written, if any.
    pub schema_version: Option<String>,
    pub payload: Value,
}

impl RiskDocument {
    pub fn version(&self) -> Option<SchemaVersion> {
        match self {
            Self::V3_2(_) => Some(SchemaVersion::V3_2),
            Self::V3_3(_) => Some(SchemaVersion::V3_3),
            Self::V4_0(_) => Some(SchemaVersion::V4_0),
            Self::V4_1(_) => Some(SchemaVersion::V4_1),
            Self::V4_2(_) => Some(SchemaVersion::V4_2),
            Self::Unknown(_) => None,
        }
    }

    pub fn family(&self) -> Option<VersionFamily> {
        self.version().and_then(|v| v.family())
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    /// Version label for messages; unknown records report what they carried.
    pub fn version_label(&self) -> String {
        match self {
            Self::Unknown(unknown) => unknown
                .schema_version
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
            known => known
                .version()
                .map(|v| v.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Self::V3_2(d) | Self::V3_3(d) => Some(&d.title),
            Self::V4_0(d) | Self::V4_1(d) | Self::V4_2(d) => Some(&d.title),
            Self::Unknown(u) => u.payload.get("title").and_then(Value::as_str),
        }
    }

    pub fn scenario_count(&self) -> usize {
        match self {
            Self::V3_2(d) | Self::V3_3(d) => d.scenarios.len(),
            Self::V4_0(d) | Self::V4_1(d) | Self::V4_2(d) => d.scenarios.len(),
            Self::Unknown(_) => 0,
        }
    }

    /// Build a record from a generic tree.
    ///
    /// The payload must be an object. An unrecognised `schemaVersion` yields
    /// `Unknown`; a recognised one whose body does not fit the shape is an error.
    pub fn from_value(value: Value) -> TypeResult<Self> {
        if !value.is_object() {
            return Err(TypeError::NotAnObject);
        }

        let raw_version = match value.get(SCHEMA_VERSION_FIELD) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        // Padding is tolerated here only; `SchemaVersion::parse` rejects it.
        let Some(version) = raw_version
            .as_deref()
            .map(str::trim)
            .and_then(SchemaVersion::parse)
            .filter(SchemaVersion::is_supported)
        else {
            warn!(
                schema_version = ?raw_version,
                "unsupported schema version; keeping payload unparsed"
            );
            return Ok(Self::Unknown(UnknownDocument {
                schema_version: raw_version,
                payload: value,
            }));
        };

        let malformed = |e: serde_json::Error| TypeError::Malformed {
            version: version.to_string(),
            message: e.to_string(),
        };

        match version.family() {
            Some(VersionFamily::V3X) => {
                let doc: Document3X = serde_json::from_value(value).map_err(malformed)?;
                Ok(if version == SchemaVersion::V3_2 {
                    Self::V3_2(doc)
                } else {
                    Self::V3_3(doc)
                })
            }
            Some(VersionFamily::V4X) => {
                let doc: Document4X = serde_json::from_value(value).map_err(malformed)?;
                Ok(match version.minor {
                    0 => Self::V4_0(doc),
                    1 => Self::V4_1(doc),
                    _ => Self::V4_2(doc),
                })
            }
            None => Err(TypeError::InvalidVersion(version.to_string())),
        }
    }

    pub fn from_json(text: &str) -> TypeResult<Self> {
        Self::from_value(raw::parse_json(text)?)
    }

    pub fn from_yaml(text: &str) -> TypeResult<Self> {
        Self::from_value(raw::parse_yaml(text)?)
    }

    /// Parse JSON or YAML text.
    pub fn parse(text: &str) -> TypeResult<Self> {
        let (_, value) = raw::parse_value(text)?;
        Self::from_value(value)
    }

    /// Render back to a generic tree, including `schemaVersion`.
    pub fn to_value(&self) -> TypeResult<Value> {
        let body = match self {
            Self::V3_2(d) | Self::V3_3(d) => serde_json::to_value(d),
            Self::V4_0(d) | Self::V4_1(d) | Self::V4_2(d) => serde_json::to_value(d),
            Self::Unknown(u) => return Ok(u.payload.clone()),
        };
        let mut body = body.map_err(|e| TypeError::Malformed {
            version: self.version_label(),
            message: e.to_string(),
        })?;
        if let (Some(map), Some(version)) = (body.as_object_mut(), self.version()) {
            map.insert(
                SCHEMA_VERSION_FIELD.to_string(),
                Value::String(version.to_string()),
            );
        }
        Ok(body)
    }
}

impl Serialize for RiskDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RiskDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{ActionStatus, Vulnerability3X};
    use serde_json::json;

    fn v3_payload(version: &str) -> Value {
        json!({
            "schemaVersion": version,
            "title": "Payment service",
            "scope": "Card processing",
            "valuations": [{
                "description": "Card data",
                "confidentiality": "Confidential",
                "integrity": "Critical",
                "availability": "Expected"
            }],
            "scenarios": [{
                "id": "s1",
                "title": "Leaked API key",
                "description": "Key checked into git",
                "threatActors": ["SCRIPT_KIDDIE"],
                "vulnerabilities": ["DISCLOSED_SECRET"],
                "risk": {"probability": 1.0, "consequence": 30000.0},
                "remainingRisk": {"probability": 0.1, "consequence": 30000.0},
                "existingActions": "Secret scanning in CI",
                "actions": [{
                    "id": "a1",
                    "title": "Rotate key",
                    "description": "",
                    "status": "NOT_STARTED",
                    "owner": "team-payments",
                    "deadline": "2024-06-01"
                }]
            }]
        })
    }

    #[test]
    fn reads_v3_payload() {
        let doc = RiskDocument::from_value(v3_payload("3.2")).unwrap();
        let RiskDocument::V3_2(inner) = &doc else {
            panic!("expected 3.2, got {doc:?}");
        };
        assert_eq!(doc.version(), Some(SchemaVersion::V3_2));
        assert_eq!(doc.family(), Some(VersionFamily::V3X));
        let scenario = &inner.scenarios[0];
        assert_eq!(scenario.vulnerabilities, vec![Vulnerability3X::DisclosedSecret]);
        assert_eq!(scenario.actions[0].status, ActionStatus::NotStarted);
        assert_eq!(scenario.actions[0].owner.as_deref(), Some("team-payments"));
    }

    #[test]
    fn reads_v4_payload_with_timestamp() {
        let doc = RiskDocument::from_value(json!({
            "schemaVersion": "4.2",
            "title": "Payment service",
            "scenarios": [{
                "id": "s1",
                "title": "Leaked API key",
                "risk": {"probability": 1.0, "consequence": 160000.0},
                "remainingRisk": {"probability": 0.05, "consequence": 160000.0},
                "actions": [{
                    "id": "a1",
                    "title": "Rotate key",
                    "status": "COMPLETED",
                    "lastUpdated": "2024-05-01T12:00:00Z"
                }]
            }]
        }))
        .unwrap();
        let RiskDocument::V4_2(inner) = doc else {
            panic!("expected 4.2");
        };
        assert!(inner.scope.is_none());
        assert!(inner.scenarios[0].actions[0].last_updated.is_some());
    }

    #[test]
    fn numeric_schema_version_is_accepted() {
        let mut payload = v3_payload("3.3");
        payload["schemaVersion"] = json!(3.3);
        let doc = RiskDocument::from_value(payload).unwrap();
        assert_eq!(doc.version(), Some(SchemaVersion::V3_3));
    }

    #[test]
    fn padded_schema_version_is_trimmed_when_reading() {
        let doc = RiskDocument::from_value(v3_payload(" 3.2 ")).unwrap();
        assert_eq!(doc.version(), Some(SchemaVersion::V3_2));
    }

    #[test]
    fn unsupported_version_becomes_unknown() {
        let doc = RiskDocument::from_value(json!({"schemaVersion": "5.0", "title": "t"})).unwrap();
        assert!(doc.is_unknown());
        assert_eq!(doc.version(), None);
        assert_eq!(doc.version_label(), "5.0");
        assert_eq!(doc.title(), Some("t"));
    }

    #[test]
    fn missing_version_becomes_unknown() {
        let doc = RiskDocument::from_value(json!({"title": "t"})).unwrap();
        assert!(doc.is_unknown());
        assert_eq!(doc.version_label(), "unknown");
    }

    #[test]
    fn top_level_array_is_rejected() {
        let err = RiskDocument::from_value(json!([1, 2, 3])).unwrap_err();
        assert_eq!(err, TypeError::NotAnObject);
    }

    #[test]
    fn known_version_with_wrong_shape_is_malformed() {
        let err = RiskDocument::from_value(json!({
            "schemaVersion": "4.1",
            "title": "t",
            "scenarios": [{"id": "s1", "title": "x", "vulnerabilities": ["USER_REPUDIATION"],
                "risk": {"probability": 1.0, "consequence": 1.0},
                "remainingRisk": {"probability": 1.0, "consequence": 1.0}}]
        }))
        .unwrap_err();
        assert!(matches!(err, TypeError::Malformed { ref version, .. } if version == "4.1"));
    }

    #[test]
    fn serialization_writes_schema_version_back() {
        let doc = RiskDocument::from_value(v3_payload("3.3")).unwrap();
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["schemaVersion"], json!("3.3"));
        let reparsed: RiskDocument = serde_json::from_value(value).unwrap();
        assert_eq!(reparsed, doc);
    }

    #[test]
    fn unknown_serializes_payload_verbatim() {
        let payload = json!({"schemaVersion": "9.9", "anything": [1, 2]});
        let doc = RiskDocument::from_value(payload.clone()).unwrap();
        assert_eq!(doc.to_value().unwrap(), payload);
    }

    #[test]
    fn parses_yaml_text() {
        let text = "schemaVersion: '4.0'\ntitle: From YAML\nscenarios: []\n";
        let doc = RiskDocument::parse(text).unwrap();
        assert_eq!(doc.version(), Some(SchemaVersion::V4_0));
        assert_eq!(doc.title(), Some("From YAML"));
        assert_eq!(doc.scenario_count(), 0);
    }
}
