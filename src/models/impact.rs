use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Severity classification attached to an axe rule failure.
///
/// Values read from disk that are not one of the four axe levels are kept
/// verbatim in `Other` so they survive a merge round unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Impact {
    Critical,
    Serious,
    Moderate,
    Minor,
    #[default]
    Unset,
    Other(String),
}

impl Impact {
    /// Sort rank: critical 0 .. minor 3. Unset and unrecognized values share
    /// the lowest priority and sort after every known level.
    pub fn rank(&self) -> u8 {
        match self {
            Impact::Critical => 0,
            Impact::Serious => 1,
            Impact::Moderate => 2,
            Impact::Minor => 3,
            Impact::Unset | Impact::Other(_) => 4,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Impact::Critical => "critical",
            Impact::Serious => "serious",
            Impact::Moderate => "moderate",
            Impact::Minor => "minor",
            Impact::Unset => "",
            Impact::Other(label) => label,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Impact::Critical => "🔴",
            Impact::Serious => "🟠",
            Impact::Moderate => "🟡",
            Impact::Minor => "🟢",
            Impact::Unset | Impact::Other(_) => "⚪",
        }
    }

    fn from_label(label: &str) -> Self {
        match label {
            "critical" => Impact::Critical,
            "serious" => Impact::Serious,
            "moderate" => Impact::Moderate,
            "minor" => Impact::Minor,
            "" => Impact::Unset,
            other => Impact::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Impact::Unset => write!(f, "unset"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

impl FromStr for Impact {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Impact::from_label(&s.trim().to_lowercase()) {
            Impact::Other(label) => Err(format!("Invalid impact: {}", label)),
            impact => Ok(impact),
        }
    }
}

impl Serialize for Impact {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Impact::Unset => serializer.serialize_none(),
            other => serializer.serialize_str(other.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for Impact {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.map_or(Impact::Unset, |l| Impact::from_label(&l)))
    }
}
