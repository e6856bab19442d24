use crate::error::Result;
use crate::models::report::summarize;
use crate::models::{Impact, StructuredViolation};
use crate::utils::fs::write_text;
use crate::utils::timestamp::local_display;
use chrono::Local;
use std::path::{Path, PathBuf};

pub const MARKDOWN_FILE_NAME: &str = "accessibility-report.md";

/// Writes `accessibility-report.md` into `folder`, replacing any previous one.
pub fn write_markdown(violations: &[StructuredViolation], folder: &Path) -> Result<PathBuf> {
    let markdown = render_markdown(violations, &local_display(Local::now()));
    let path = folder.join(MARKDOWN_FILE_NAME);
    write_text(&path, &markdown)?;
    Ok(path)
}

/// Render the merged violations as a markdown document.
pub fn render_markdown(violations: &[StructuredViolation], generated_at: &str) -> String {
    let mut markdown = String::new();

    markdown.push_str("# Accessibility Report\n\n");

    if violations.is_empty() {
        markdown.push_str("## ✅ No accessibility violations found!\n\n");
        markdown.push_str("Great job! All pages passed accessibility testing.\n\n");
    } else {
        let summary = summarize(violations);

        markdown.push_str("## Summary\n\n");
        markdown.push_str("| Metric | Count |\n");
        markdown.push_str("|--------|-------|\n");
        markdown.push_str(&format!("| **Total Issues** | {} |\n", summary.total));
        markdown.push_str(&format!("| **Pages Affected** | {} |\n", summary.pages));
        markdown.push_str(&format!(
            "| {} Critical | {} |\n",
            Impact::Critical.emoji(),
            summary.critical
        ));
        markdown.push_str(&format!(
            "| {} Serious | {} |\n",
            Impact::Serious.emoji(),
            summary.serious
        ));
        markdown.push_str(&format!(
            "| {} Moderate | {} |\n",
            Impact::Moderate.emoji(),
            summary.moderate
        ));
        markdown.push_str(&format!(
            "| {} Minor | {} |\n\n",
            Impact::Minor.emoji(),
            summary.minor
        ));
        markdown.push_str("---\n\n");

        for violation in violations {
            push_violation(&mut markdown, violation);
        }
    }

    markdown.push_str(&format!("*Generated on {}*\n", generated_at));
    markdown
}

fn push_violation(markdown: &mut String, violation: &StructuredViolation) {
    markdown.push_str(&format!(
        "> ### {} {}\n",
        violation.impact.emoji(),
        violation.id
    ));
    markdown.push_str(&format!("> {}\n\n", violation.description));

    markdown.push_str(&format!("**How to fix:** {}\n\n", violation.help));
    markdown.push_str(&format!(
        "**Documentation:** [{}]({})\n\n",
        violation.help_url, violation.help_url
    ));

    if !violation.tags.is_empty() {
        markdown.push_str(&format!("**Tags:** {}\n\n", violation.tags.join(", ")));
    }

    markdown.push_str(&format!(
        "**Pages Affected ({}) - with nested selectors:**\n\n",
        violation.pages.len()
    ));

    for page in &violation.pages {
        let count = page.nodes.len();
        let plural = if count == 1 { "" } else { "s" };

        markdown.push_str("<details>\n");
        markdown.push_str(&format!(
            "<summary><strong>🔍 {}</strong> ({} element{})</summary>\n\n",
            page.url, count, plural
        ));

        if !page.nodes.is_empty() {
            markdown.push_str("**CSS Selectors:**\n");
            for node in &page.nodes {
                markdown.push_str(&format!("- `{}`\n", node));
            }
        }

        markdown.push_str("\n</details>\n\n");
    }

    markdown.push_str("---\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PageEntry;

    fn violation(id: &str, impact: Impact, pages: Vec<(&str, Vec<&str>)>) -> StructuredViolation {
        StructuredViolation {
            id: id.to_string(),
            impact,
            description: format!("{} description", id),
            help: format!("Fix {}", id),
            help_url: format!("https://dequeuniversity.com/rules/axe/4.8/{}", id),
            tags: vec!["wcag2a".to_string(), "wcag412".to_string()],
            pages: pages
                .into_iter()
                .map(|(url, nodes)| PageEntry {
                    url: url.to_string(),
                    nodes: nodes.into_iter().map(str::to_string).collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_empty_report() {
        let markdown = render_markdown(&[], "01/01/2024 00:00:00");
        assert!(markdown.starts_with("# Accessibility Report\n\n"));
        assert!(markdown.contains("## ✅ No accessibility violations found!"));
        assert!(!markdown.contains("## Summary"));
        assert!(markdown.ends_with("*Generated on 01/01/2024 00:00:00*\n"));
    }

    #[test]
    fn test_summary_counts() {
        let violations = vec![
            violation("label", Impact::Critical, vec![("/", vec!["input"])]),
            violation(
                "color-contrast",
                Impact::Serious,
                vec![("/", vec!["p", "a"]), ("/careers", vec!["h2"])],
            ),
            violation("odd", Impact::Other("blocker".into()), vec![("/about", vec![])]),
        ];
        let markdown = render_markdown(&violations, "now");

        assert!(markdown.contains("| **Total Issues** | 3 |"));
        assert!(markdown.contains("| **Pages Affected** | 3 |"));
        assert!(markdown.contains("| 🔴 Critical | 1 |"));
        assert!(markdown.contains("| 🟠 Serious | 1 |"));
        assert!(markdown.contains("| 🟡 Moderate | 0 |"));
        assert!(markdown.contains("| 🟢 Minor | 0 |"));
        assert!(markdown.contains("> ### ⚪ odd"));
    }

    #[test]
    fn test_violation_block() {
        let violations = vec![violation(
            "color-contrast",
            Impact::Serious,
            vec![("/home", vec!["div.a", "div.b"]), ("/careers", vec!["div.c"])],
        )];
        let markdown = render_markdown(&violations, "now");

        assert!(markdown.contains("> ### 🟠 color-contrast\n> color-contrast description\n\n"));
        assert!(markdown.contains("**How to fix:** Fix color-contrast\n\n"));
        assert!(markdown.contains(
            "**Documentation:** [https://dequeuniversity.com/rules/axe/4.8/color-contrast](https://dequeuniversity.com/rules/axe/4.8/color-contrast)"
        ));
        assert!(markdown.contains("**Tags:** wcag2a, wcag412\n\n"));
        assert!(markdown.contains("**Pages Affected (2) - with nested selectors:**"));
        assert!(markdown.contains("<summary><strong>🔍 /home</strong> (2 elements)</summary>"));
        assert!(markdown.contains("<summary><strong>🔍 /careers</strong> (1 element)</summary>"));
        assert!(markdown.contains("- `div.c`\n"));
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MARKDOWN_FILE_NAME), "stale").unwrap();

        let path = write_markdown(&[], dir.path()).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(!content.contains("stale"));
        assert!(content.contains("No accessibility violations found!"));
    }
}
