use crate::config::Config;
use crate::core::scan_options::{resolve_scan_options, ScanOverride};
use clap::Args;

#[derive(Args, Debug, Default)]
pub struct ScanOptionsArgs {
    /// Replaces the configured tags (repeatable)
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    /// Disable a rule for this scan (repeatable)
    #[arg(long = "ignore-rule", value_name = "RULE")]
    pub ignore_rules: Vec<String>,

    /// Re-enable a rule the config ignores (repeatable)
    #[arg(long = "enable-rule", value_name = "RULE")]
    pub enable_rules: Vec<String>,
}

impl ScanOptionsArgs {
    pub fn to_override(&self) -> ScanOverride {
        let mut ov = ScanOverride {
            tags: self.tags.clone(),
            ..ScanOverride::default()
        };
        for rule in &self.enable_rules {
            ov.ignored_rules.insert(rule.clone(), false);
        }
        for rule in &self.ignore_rules {
            ov.ignored_rules.insert(rule.clone(), true);
        }
        ov
    }
}

pub fn handle_scan_options_command(config: &Config, args: ScanOptionsArgs) {
    let options = resolve_scan_options(&config.accessibility, &args.to_override());
    match serde_json::to_string_pretty(&options) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignore_beats_enable_for_same_rule() {
        let args = ScanOptionsArgs {
            ignore_rules: vec!["region".into()],
            enable_rules: vec!["region".into(), "heading-order".into()],
            ..ScanOptionsArgs::default()
        };

        let ov = args.to_override();
        assert!(ov.ignored_rules["region"]);
        assert!(!ov.ignored_rules["heading-order"]);
        assert!(ov.tags.is_empty());
    }
}
