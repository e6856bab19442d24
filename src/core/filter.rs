use crate::models::{
    FilteredViolation, NodeSummary, ReportField, ReportFields, ViolationRecord,
};

/// Where a projection ends up. Console output keeps only a node count; files
/// keep every selector so a later merge can dedup on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Console,
    File,
}

/// Project `violation` onto the fields switched on in `fields`. A requested
/// field the record does not carry is left out rather than reported.
pub fn filter_violation(
    violation: &ViolationRecord,
    fields: &ReportFields,
    mode: OutputMode,
) -> FilteredViolation {
    let mut filtered = FilteredViolation::default();

    for field in fields.enabled() {
        match field {
            ReportField::Impact => filtered.impact = Some(violation.impact.clone()),
            ReportField::Id => filtered.id = Some(violation.id.clone()),
            ReportField::Description => filtered.description = violation.description.clone(),
            ReportField::Help => filtered.help = violation.help.clone(),
            ReportField::HelpUrl => filtered.help_url = violation.help_url.clone(),
            ReportField::Tags => filtered.tags = violation.tags.clone(),
            ReportField::Nodes => {
                filtered.nodes = violation.nodes.as_ref().map(|nodes| match mode {
                    OutputMode::Console => NodeSummary::Count(nodes.len()),
                    OutputMode::File => NodeSummary::Selectors(
                        nodes
                            .iter()
                            .flat_map(|node| node.selectors())
                            .map(str::to_string)
                            .collect(),
                    ),
                })
            }
        }
    }

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::violation::NodeResult;
    use crate::models::Impact;
    use serde_json::json;

    fn record() -> ViolationRecord {
        ViolationRecord {
            id: "color-contrast".to_string(),
            impact: Impact::Serious,
            description: Some("Ensures contrast".to_string()),
            help: Some("Elements must have sufficient contrast".to_string()),
            help_url: None,
            tags: Some(vec!["wcag2aa".to_string()]),
            nodes: Some(vec![
                NodeResult::from_selectors(&["div.a"]),
                NodeResult {
                    target: vec![json!("#host"), json!(["inner"]), json!(2)],
                },
            ]),
        }
    }

    #[test]
    fn test_console_mode_counts_nodes() {
        let filtered = filter_violation(&record(), &ReportFields::console_default(), OutputMode::Console);

        assert_eq!(filtered.id.as_deref(), Some("color-contrast"));
        assert_eq!(filtered.impact, Some(Impact::Serious));
        assert_eq!(filtered.nodes, Some(NodeSummary::Count(2)));
        assert_eq!(filtered.description, None);
    }

    #[test]
    fn test_file_mode_flattens_string_fragments() {
        let filtered = filter_violation(&record(), &ReportFields::all(), OutputMode::File);

        assert_eq!(
            filtered.nodes,
            Some(NodeSummary::Selectors(vec![
                "div.a".to_string(),
                "#host".to_string()
            ]))
        );
        assert_eq!(filtered.tags, Some(vec!["wcag2aa".to_string()]));
    }

    #[test]
    fn test_missing_source_field_is_omitted() {
        let fields = ReportFields {
            help_url: true,
            ..ReportFields::default()
        };
        let filtered = filter_violation(&record(), &fields, OutputMode::File);

        assert_eq!(filtered, FilteredViolation::default());
        assert_eq!(serde_json::to_value(&filtered).unwrap(), json!({}));
    }
}
