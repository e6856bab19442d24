//! Violation deduplication
//!
//! Two entries are the same concrete violation when they share a rule id and
//! the exact ordered list of affected node selectors. The page URL is not part
//! of the key.

use crate::models::ReportedViolation;
use fnv::FnvHashSet;

/// `<id>-<node1>|<node2>|...`, where a raw axe node contributes its target
/// fragments joined by ','.
pub fn dedup_key(violation: &ReportedViolation) -> String {
    let nodes: Vec<String> = violation.nodes.iter().map(|n| n.key()).collect();
    format!("{}-{}", violation.id, nodes.join("|"))
}

/// First occurrence wins; input order is otherwise preserved.
pub fn deduplicate_violations(violations: Vec<ReportedViolation>) -> Vec<ReportedViolation> {
    let mut seen = FnvHashSet::default();
    violations
        .into_iter()
        .filter(|v| seen.insert(dedup_key(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::violation::NodeEntry;
    use serde_json::json;

    fn entry(id: &str, nodes: &[&str], url: &str) -> ReportedViolation {
        ReportedViolation {
            id: id.to_string(),
            nodes: nodes
                .iter()
                .map(|n| NodeEntry::Selector(n.to_string()))
                .collect(),
            url: Some(url.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_key_format() {
        assert_eq!(
            dedup_key(&entry("color-contrast", &["div.a", "div.b"], "/")),
            "color-contrast-div.a|div.b"
        );

        let raw = ReportedViolation {
            id: "label".to_string(),
            nodes: vec![NodeEntry::Target {
                target: vec![json!("iframe"), json!("input#q")],
            }],
            ..Default::default()
        };
        assert_eq!(dedup_key(&raw), "label-iframe,input#q");
    }

    #[test]
    fn test_same_rule_different_nodes_kept() {
        let result = deduplicate_violations(vec![
            entry("color-contrast", &["div.a"], "/home"),
            entry("color-contrast", &["div.c"], "/home"),
        ]);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_identical_entries_keep_first_seen() {
        let result = deduplicate_violations(vec![
            entry("color-contrast", &["div.a", "div.b"], "/home"),
            entry("color-contrast", &["div.a", "div.b"], "/about"),
            entry("image-alt", &["img"], "/home"),
        ]);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].url.as_deref(), Some("/home"));
        assert_eq!(result[1].id, "image-alt");
    }

    #[test]
    fn test_node_order_matters() {
        let result = deduplicate_violations(vec![
            entry("list", &["ul", "ol"], "/"),
            entry("list", &["ol", "ul"], "/"),
        ]);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let input = vec![
            entry("a", &["x"], "/1"),
            entry("a", &["x"], "/2"),
            entry("b", &["y"], "/1"),
            entry("a", &["z"], "/1"),
        ];
        let once = deduplicate_violations(input);
        let twice = deduplicate_violations(once.clone());
        assert_eq!(once, twice);
    }
}
