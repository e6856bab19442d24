use crate::models::impact::Impact;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One rule failure exactly as the axe scanner reports it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViolationRecord {
    pub id: String,
    #[serde(default)]
    pub impact: Impact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<NodeResult>>,
}

/// An affected DOM node. `target` fragments are usually CSS selectors, but
/// axe emits nested arrays for shadow DOM and iframe paths.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NodeResult {
    #[serde(default)]
    pub target: Vec<Value>,
}

impl NodeResult {
    pub fn from_selectors(selectors: &[&str]) -> Self {
        Self {
            target: selectors.iter().map(|s| Value::from(*s)).collect(),
        }
    }

    /// String-typed target fragments; anything else is dropped.
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.target.iter().filter_map(Value::as_str)
    }
}

/// The shape an axe run serializes to: we only need the violations and the
/// scanned URL.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScanResults {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub violations: Vec<ViolationRecord>,
}

/// The `nodes` field of a projected violation: a count for console output,
/// the flattened selectors for persisted reports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum NodeSummary {
    Count(usize),
    Selectors(Vec<String>),
}

/// A violation reduced to the fields a caller asked for. Absent fields are
/// omitted from the serialized form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FilteredViolation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<Impact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<NodeSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A node reference as found in a per-test report file. Files written by this
/// tool carry plain selector strings; raw axe nodes with a `target` array are
/// accepted too.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum NodeEntry {
    Selector(String),
    Target { target: Vec<Value> },
}

impl NodeEntry {
    /// Identity of this node inside a dedup key.
    pub fn key(&self) -> String {
        match self {
            NodeEntry::Selector(selector) => selector.clone(),
            NodeEntry::Target { target } => target
                .iter()
                .map(|fragment| match fragment {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    pub fn selectors(&self) -> Vec<String> {
        match self {
            NodeEntry::Selector(selector) => vec![selector.clone()],
            NodeEntry::Target { target } => target
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        }
    }
}

/// A violation entry read back from a per-test report during a merge.
/// Every field is lenient: missing or null values fall back to empty defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportedViolation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default)]
    pub impact: Impact,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub help: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub help_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_nodes")]
    pub nodes: Vec<NodeEntry>,
    #[serde(default)]
    pub url: Option<String>,
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts any JSON for `nodes`; only an array yields entries, and array
/// items that are neither selectors nor target objects are ignored.
fn lenient_nodes<'de, D>(deserializer: D) -> Result<Vec<NodeEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageEntry {
    pub url: String,
    pub nodes: Vec<String>,
}

/// A rule failure after merging: one entry per rule, listing every page and
/// selector where it was observed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StructuredViolation {
    pub id: String,
    pub impact: Impact,
    pub description: String,
    pub help: String,
    pub help_url: String,
    pub tags: Vec<String>,
    pub pages: Vec<PageEntry>,
}
