use crate::config::AccessibilityConfig;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-test adjustments to the configured scan.
#[derive(Debug, Clone, Default)]
pub struct ScanOverride {
    /// Replaces the configured tags when non-empty.
    pub tags: Vec<String>,
    /// Merged over the configured table; these entries win.
    pub ignored_rules: BTreeMap<String, bool>,
}

/// What an axe runner needs: tags to run and rule ids to disable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOptions {
    pub tags: Vec<String>,
    pub disabled_rules: Vec<String>,
}

pub fn resolve_scan_options(config: &AccessibilityConfig, ov: &ScanOverride) -> ScanOptions {
    let tags = if ov.tags.is_empty() {
        config.tags.clone()
    } else {
        ov.tags.clone()
    };

    let mut rules = config.ignored_rules.clone();
    rules.extend(ov.ignored_rules.iter().map(|(k, v)| (k.clone(), *v)));

    let disabled_rules = rules
        .into_iter()
        .filter_map(|(rule, ignored)| ignored.then_some(rule))
        .collect();

    ScanOptions {
        tags,
        disabled_rules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_pass_through() {
        let options = resolve_scan_options(&AccessibilityConfig::default(), &ScanOverride::default());

        assert_eq!(options.tags.len(), 7);
        assert!(!options.disabled_rules.contains(&"color-contrast".to_string()));
        assert!(options.disabled_rules.contains(&"heading-order".to_string()));
    }

    #[test]
    fn test_override_replaces_tags_and_merges_rules() {
        let mut ignored_rules = BTreeMap::new();
        ignored_rules.insert("color-contrast".to_string(), true);
        ignored_rules.insert("heading-order".to_string(), false);
        let ov = ScanOverride {
            tags: vec!["wcag2a".to_string()],
            ignored_rules,
        };

        let options = resolve_scan_options(&AccessibilityConfig::default(), &ov);

        assert_eq!(options.tags, vec!["wcag2a"]);
        assert_eq!(
            options.disabled_rules,
            vec![
                "aria-input-field-name",
                "color-contrast",
                "landmark-banner-is-top-level",
                "landmark-unique",
                "nested-interactive",
            ]
        );
    }

    #[test]
    fn test_serialized_shape() {
        let options = ScanOptions {
            tags: vec!["wcag2a".into()],
            disabled_rules: vec!["region".into()],
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            serde_json::json!({"tags": ["wcag2a"], "disabledRules": ["region"]})
        );
    }
}
