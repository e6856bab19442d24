use crate::error::{ReportError, Result};
use crate::models::{Impact, StructuredViolation};
use crate::utils::fs::write_text;
use fnv::FnvHasher;
use serde_sarif::sarif::{
    self, ArtifactLocation, Message, MultiformatMessageString, PhysicalLocation,
    ReportingDescriptor, Result as SarifResult, ResultLevel, Run, Sarif, ToolComponent, Version,
    SCHEMA_URL,
};
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};
use std::path::Path;

fn impact_to_level(impact: &Impact) -> ResultLevel {
    match impact {
        Impact::Critical | Impact::Serious => ResultLevel::Error,
        Impact::Moderate => ResultLevel::Warning,
        Impact::Minor | Impact::Unset | Impact::Other(_) => ResultLevel::Note,
    }
}

/// security-severity score GitHub code scanning uses to bucket alerts
fn impact_to_score(impact: &Impact) -> &'static str {
    match impact {
        Impact::Critical => "9.0",
        Impact::Serious => "7.0",
        Impact::Moderate => "5.0",
        Impact::Minor => "3.0",
        Impact::Unset | Impact::Other(_) => "0.0",
    }
}

/// Stable across runs and Rust versions; DefaultHasher is not.
fn generate_fingerprint(rule_id: &str, url: &str, selector: &str) -> String {
    let mut hasher = FnvHasher::default();
    rule_id.hash(&mut hasher);
    url.hash(&mut hasher);
    selector.trim().hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

/// One rule per violation id, one result per affected selector on each page.
pub fn generate_sarif_report(violations: &[StructuredViolation]) -> Sarif {
    let mut rules: Vec<ReportingDescriptor> = Vec::new();
    let mut rule_indices: HashMap<&str, i64> = HashMap::new();
    let mut results: Vec<SarifResult> = Vec::new();

    for violation in violations {
        let rule_index = *rule_indices.entry(&violation.id).or_insert_with(|| {
            let mut props = BTreeMap::new();
            props.insert(
                "security-severity".to_string(),
                serde_json::json!(impact_to_score(&violation.impact)),
            );
            props.insert("tags".to_string(), serde_json::json!(violation.tags));

            let rule = ReportingDescriptor::builder()
                .id(&violation.id)
                .short_description(&violation.help)
                .full_description(&violation.description)
                .help(
                    MultiformatMessageString::builder()
                        .text(&violation.help)
                        .build(),
                )
                .help_uri(&violation.help_url)
                .properties(
                    sarif::PropertyBag::builder()
                        .additional_properties(props)
                        .build(),
                )
                .build();

            rules.push(rule);
            (rules.len() - 1) as i64
        });

        for page in &violation.pages {
            for selector in &page.nodes {
                let location = sarif::Location::builder()
                    .physical_location(
                        PhysicalLocation::builder()
                            .artifact_location(ArtifactLocation::builder().uri(&page.url).build())
                            .build(),
                    )
                    .build();

                let mut partial_fingerprints = BTreeMap::new();
                partial_fingerprints.insert(
                    "primaryLocationLineHash".to_string(),
                    generate_fingerprint(&violation.id, &page.url, selector),
                );

                let result = SarifResult::builder()
                    .rule_id(&violation.id)
                    .rule_index(rule_index)
                    .level(impact_to_level(&violation.impact))
                    .message(
                        Message::builder()
                            .text(&format!("{} ({})", violation.help, selector))
                            .build(),
                    )
                    .locations(vec![location])
                    .partial_fingerprints(partial_fingerprints)
                    .build();

                results.push(result);
            }
        }
    }

    let tool_component = ToolComponent::builder()
        .name("axereport")
        .semantic_version(env!("CARGO_PKG_VERSION"))
        .rules(rules)
        .build();

    let run = Run::builder()
        .tool(tool_component)
        .results(results)
        .build();

    Sarif::builder()
        .version(Version::V2_1_0.to_string())
        .schema(SCHEMA_URL)
        .runs(vec![run])
        .build()
}

pub fn write_sarif(violations: &[StructuredViolation], path: &Path) -> Result<()> {
    let sarif = generate_sarif_report(violations);
    let content = serde_json::to_string_pretty(&sarif).map_err(|e| ReportError::json(path, e))?;
    write_text(path, &content)
}
