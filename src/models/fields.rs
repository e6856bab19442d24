use serde::{Deserialize, Serialize};

/// Which violation fields a projection keeps. Unknown keys are rejected when
/// the configuration is parsed, so a misspelled field never silently drops
/// a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ReportFields {
    pub impact: bool,
    pub id: bool,
    pub description: bool,
    pub help: bool,
    pub help_url: bool,
    pub tags: bool,
    pub nodes: bool,
}

/// Projectable field names, in output column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportField {
    Impact,
    Id,
    Description,
    Help,
    HelpUrl,
    Tags,
    Nodes,
}

impl ReportField {
    pub const ALL: [ReportField; 7] = [
        ReportField::Impact,
        ReportField::Id,
        ReportField::Description,
        ReportField::Help,
        ReportField::HelpUrl,
        ReportField::Tags,
        ReportField::Nodes,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ReportField::Impact => "impact",
            ReportField::Id => "id",
            ReportField::Description => "description",
            ReportField::Help => "help",
            ReportField::HelpUrl => "helpUrl",
            ReportField::Tags => "tags",
            ReportField::Nodes => "nodes",
        }
    }
}

impl ReportFields {
    /// Every field on. Persisted reports always use this set.
    pub fn all() -> Self {
        Self {
            impact: true,
            id: true,
            description: true,
            help: true,
            help_url: true,
            tags: true,
            nodes: true,
        }
    }

    /// Terse column set printed while tests run.
    pub fn console_default() -> Self {
        Self {
            impact: true,
            id: true,
            help: true,
            nodes: true,
            ..Self::default()
        }
    }

    pub fn includes(&self, field: ReportField) -> bool {
        match field {
            ReportField::Impact => self.impact,
            ReportField::Id => self.id,
            ReportField::Description => self.description,
            ReportField::Help => self.help,
            ReportField::HelpUrl => self.help_url,
            ReportField::Tags => self.tags,
            ReportField::Nodes => self.nodes,
        }
    }

    pub fn enabled(&self) -> impl Iterator<Item = ReportField> + '_ {
        ReportField::ALL
            .into_iter()
            .filter(move |field| self.includes(*field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_field_rejected() {
        let err = toml::from_str::<ReportFields>("impact = true\nselector = true\n");
        assert!(err.is_err());
    }

    #[test]
    fn test_missing_fields_default_to_off() {
        let fields: ReportFields = toml::from_str("id = true\nhelpUrl = true\n").unwrap();
        let enabled: Vec<&str> = fields.enabled().map(|f| f.name()).collect();
        assert_eq!(enabled, vec!["id", "helpUrl"]);
    }
}
