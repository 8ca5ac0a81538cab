use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// A `major.minor` schema version.
///
/// Ordering is numeric on `(major, minor)`, so `4.10` sorts after `4.9`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaVersion {
    pub major: u32,
    pub minor: u32,
}

impl SchemaVersion {
    pub const V3_2: Self = Self::new(3, 2);
    pub const V3_3: Self = Self::new(3, 3);
    pub const V4_0: Self = Self::new(4, 0);
    pub const V4_1: Self = Self::new(4, 1);
    pub const V4_2: Self = Self::new(4, 2);

    /// Every version with a record shape, oldest first.
    pub const SUPPORTED: [Self; 5] = [Self::V3_2, Self::V3_3, Self::V4_0, Self::V4_1, Self::V4_2];

    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Parse a `<major>.<minor>` string.
    ///
    /// Never fails loudly: anything that is not two runs of ASCII digits
    /// joined by a single dot is `None`, surrounding whitespace included.
    pub fn parse(s: &str) -> Option<Self> {
        let (major, minor) = s.split_once('.')?;
        Some(Self::new(parse_component(major)?, parse_component(minor)?))
    }

    /// Returns `true` if a record shape exists for this version.
    pub fn is_supported(&self) -> bool {
        Self::SUPPORTED.contains(self)
    }

    /// The shape family this version belongs to, if supported.
    pub fn family(&self) -> Option<VersionFamily> {
        match (self.major, self.minor) {
            (3, 2 | 3) => Some(VersionFamily::V3X),
            (4, 0..=2) => Some(VersionFamily::V4X),
            _ => None,
        }
    }
}

fn parse_component(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl FromStr for SchemaVersion {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TypeError::InvalidVersion(s.to_string()))
    }
}

impl fmt::Debug for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SchemaVersion({}.{})", self.major, self.minor)
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl Serialize for SchemaVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SchemaVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Record shape family. Versions within a family share one shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VersionFamily {
    /// 3.2 and 3.3.
    V3X,
    /// 4.0 through 4.2.
    V4X,
}

impl fmt::Display for VersionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V3X => write!(f, "3.X"),
            Self::V4X => write!(f, "4.X"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cmp::Ordering;

    #[test]
    fn parses_dotted_versions() {
        assert_eq!(SchemaVersion::parse("3.2"), Some(SchemaVersion::V3_2));
        assert_eq!(SchemaVersion::parse("4.1"), Some(SchemaVersion::V4_1));
        assert_eq!(SchemaVersion::parse("4.10"), Some(SchemaVersion::new(4, 10)));
    }

    #[test]
    fn surrounding_whitespace_is_rejected() {
        for raw in [" 4.10 ", "4.1\n", "\t3.2", "4 .1", "4. 1"] {
            assert_eq!(SchemaVersion::parse(raw), None, "{raw:?} should not parse");
        }
    }

    #[test]
    fn rejects_malformed_strings() {
        for raw in ["", "4", "4.", ".1", "4.1.0", "v4.1", "4.x", "-4.1", "4.+1", "a.b"] {
            assert_eq!(SchemaVersion::parse(raw), None, "{raw:?} should not parse");
        }
    }

    #[test]
    fn rejects_overflowing_components() {
        assert_eq!(SchemaVersion::parse("99999999999.1"), None);
    }

    #[test]
    fn numeric_not_lexicographic_ordering() {
        let v49 = SchemaVersion::new(4, 9);
        let v410 = SchemaVersion::new(4, 10);
        assert_eq!(v410.cmp(&v49), Ordering::Greater);
        assert!(SchemaVersion::V3_3 < SchemaVersion::V4_0);
    }

    #[test]
    fn from_str_reports_invalid_version() {
        let err = "latest".parse::<SchemaVersion>().unwrap_err();
        assert_eq!(err, TypeError::InvalidVersion("latest".into()));
    }

    #[test]
    fn supported_versions_are_ascending() {
        assert!(SchemaVersion::SUPPORTED.windows(2).all(|w| w[0] < w[1]));
        assert!(SchemaVersion::V4_2.is_supported());
        assert!(!SchemaVersion::new(5, 0).is_supported());
    }

    #[test]
    fn family_assignment() {
        assert_eq!(SchemaVersion::V3_2.family(), Some(VersionFamily::V3X));
        assert_eq!(SchemaVersion::V3_3.family(), Some(VersionFamily::V3X));
        assert_eq!(SchemaVersion::V4_0.family(), Some(VersionFamily::V4X));
        assert_eq!(SchemaVersion::V4_2.family(), Some(VersionFamily::V4X));
        assert_eq!(SchemaVersion::new(5, 0).family(), None);
    }

    #[test]
    fn serde_as_string() {
        let json = serde_json::to_string(&SchemaVersion::V4_1).unwrap();
        assert_eq!(json, "\"4.1\"");
        let parsed: SchemaVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, SchemaVersion::V4_1);
    }

    proptest! {
        #[test]
        fn display_then_parse_is_identity(major in 0u32..10_000, minor in 0u32..10_000) {
            let v = SchemaVersion::new(major, minor);
            prop_assert_eq!(SchemaVersion::parse(&v.to_string()), Some(v));
        }

        #[test]
        fn ordering_matches_integer_tuples(a in (0u32..50, 0u32..50), b in (0u32..50, 0u32..50)) {
            let va = SchemaVersion::new(a.0, a.1);
            let vb = SchemaVersion::new(b.0, b.1);
            prop_assert_eq!(va.cmp(&vb), a.cmp(&b));
        }

        #[test]
        fn parse_never_panics(s in "\\PC*") {
            let _ = SchemaVersion::parse(&s);
        }
    }
}
