use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// External inputs to a migration run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationOptions {
    /// When the record was last published. Becomes every action's
    /// `lastUpdated` when a record is lifted to 4.2; `None` for records
    /// that were never published.
    #[serde(default)]
    pub last_published: Option<DateTime<Utc>>,
}

impl MigrationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_last_published(mut self, at: DateTime<Utc>) -> Self {
        self.last_published = Some(at);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn default_has_no_publication() {
        assert!(MigrationOptions::default().last_published.is_none());
    }

    #[test]
    fn deserializes_from_camel_case() {
        let opts: MigrationOptions =
            serde_json::from_str(r#"{"lastPublished": "2024-03-01T08:30:00Z"}"#).unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        assert_eq!(opts, MigrationOptions::new().with_last_published(expected));
    }

    #[test]
    fn missing_field_defaults_to_none() {
        let opts: MigrationOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, MigrationOptions::default());
    }
}
