mod accessibility;
mod performance;

pub use accessibility::AccessibilityConfig;
pub use performance::{DebugMode, FormFactor, PerformanceConfig};

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_CONFIG_FILE: &str = "axereport.toml";

pub const ENV_BUILD_DIR: &str = "AXEREPORT_BUILD_DIR";
pub const ENV_REPORTS_DIR: &str = "AXEREPORT_REPORTS_DIR";
pub const ENV_CONSOLE: &str = "AXEREPORT_CONSOLE";

pub const DEFAULT_CONFIG_CONTENT: &str = r#"# axereport.toml

# Directory holding every generated artifact. `axereport clean` removes it.
# If omitted, it defaults to "build".
# build_dir = "build"

[accessibility]
# axe rule tags to scan against. A test-level override replaces this list.
# tags = ["wcag2a", "wcag2aa", "wcag21a", "wcag21aa", "wcag22aa", "section508", "best-practice"]

# Print a violation table for every scan (env: AXEREPORT_CONSOLE).
# console = true

# Where per-test and merged reports go (env: AXEREPORT_REPORTS_DIR).
# If omitted, it defaults to "<build_dir>/accessibility-reports".
# reports_dir = "build/accessibility-reports"

# Also write accessibility-report.sarif when merging.
# sarif = false

# Rules to disable. Test-level overrides are merged on top of this table.
# Uncomment the header together with the entries; a present table replaces
# the built-in list.
# [accessibility.ignored_rules]
# "color-contrast" = false
# "aria-input-field-name" = true
# "nested-interactive" = true
# "landmark-unique" = true
# "heading-order" = true
# "landmark-banner-is-top-level" = true

# Columns of the console table. Unknown names are rejected and omitted
# names are off once the table is present.
# [accessibility.report_console]
# impact = true
# id = true
# description = false
# help = true
# helpUrl = false
# tags = false
# nodes = true

[performance]
# When to print the category table: "always", "never" or "if-fail".
# debug = "if-fail"

# "desktop" or "mobile"
# form_factor = "desktop"

# If omitted, it defaults to "<build_dir>/performance-reports".
# reports_dir = "build/performance-reports"

# Minimum Lighthouse scores, between 0 and 1.
# [performance.thresholds]
# performance = 0.4
# accessibility = 0.95
# "best-practices" = 0.8
# seo = 0.8
# pwa = 0.5
"#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,
    #[serde(default)]
    pub accessibility: AccessibilityConfig,
    #[serde(default)]
    pub performance: PerformanceConfig,
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("build")
}

impl Default for Config {
    fn default() -> Self {
        Config {
            build_dir: default_build_dir(),
            accessibility: AccessibilityConfig::default(),
            performance: PerformanceConfig::default(),
        }
    }
}

impl Config {
    pub fn accessibility_reports_dir(&self) -> PathBuf {
        self.accessibility.resolved_reports_dir(&self.build_dir)
    }

    pub fn performance_reports_dir(&self) -> PathBuf {
        self.performance.resolved_reports_dir(&self.build_dir)
    }

    /// Layer `overrides` on top of this (file or default) configuration.
    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(build_dir) = overrides.build_dir {
            self.build_dir = build_dir;
        }
        if let Some(reports_dir) = overrides.reports_dir {
            self.accessibility.reports_dir = Some(reports_dir);
        }
        if let Some(console) = overrides.console {
            self.accessibility.console = console;
        }
        self
    }
}

/// Values that beat the config file. Built once from the command line and
/// once from the environment; the command line wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub build_dir: Option<PathBuf>,
    pub reports_dir: Option<PathBuf>,
    pub console: Option<bool>,
}

impl Overrides {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Overrides {
            build_dir: non_empty(ENV_BUILD_DIR).map(PathBuf::from),
            reports_dir: non_empty(ENV_REPORTS_DIR).map(PathBuf::from),
            console: non_empty(ENV_CONSOLE).and_then(|v| {
                let parsed = parse_flag(&v);
                if parsed.is_none() {
                    warn!("Ignoring {}={}: expected true or false", ENV_CONSOLE, v);
                }
                parsed
            }),
        }
    }

    /// Fill every unset field from `fallback`.
    pub fn or(self, fallback: Overrides) -> Self {
        Overrides {
            build_dir: self.build_dir.or(fallback.build_dir),
            reports_dir: self.reports_dir.or(fallback.reports_dir),
            console: self.console.or(fallback.console),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Reads the config file if present, otherwise starts from defaults.
pub fn read_config_file(config_path: &Path) -> Result<Config> {
    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(config_path).map_err(|e| ReportError::io(config_path, e))?;
    let config = toml::from_str::<Config>(&content).map_err(|e| ReportError::Config {
        path: config_path.to_path_buf(),
        message: e.to_string(),
    })?;

    config
        .performance
        .validate()
        .map_err(|message| ReportError::Config {
            path: config_path.to_path_buf(),
            message,
        })?;

    Ok(config)
}

/// Precedence: command line > environment > config file > built-in default.
pub fn load_config(cli: Overrides, config_path: Option<PathBuf>) -> Result<Config> {
    let config_path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = read_config_file(&config_path)?;
    Ok(config.apply(cli.or(Overrides::from_env())))
}

pub fn initialize_config_file(config_path_override: Option<&Path>) -> Result<()> {
    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    let config_path = config_path_override.unwrap_or(default_path);

    if config_path.exists() {
        println!("INFO: '{}' already exists.", config_path.display());
        return Ok(());
    }

    println!(
        "Creating default config file at '{}'",
        config_path.display()
    );
    let mut file = fs::File::create(config_path).map_err(|e| ReportError::io(config_path, e))?;
    file.write_all(DEFAULT_CONFIG_CONTENT.as_bytes())
        .map_err(|e| ReportError::io(config_path, e))?;
    println!(
        "SUCCESS: Created default '{}' configuration file.",
        config_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_content_parses_to_defaults() {
        let config: Config = toml::from_str(DEFAULT_CONFIG_CONTENT).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = read_config_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.build_dir, PathBuf::from("build"));
        assert_eq!(
            config.accessibility_reports_dir(),
            PathBuf::from("build/accessibility-reports")
        );
    }

    #[test]
    fn test_file_values_and_unknown_console_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("axereport.toml");

        fs::write(
            &path,
            "build_dir = \"out\"\n[accessibility.report_console]\nid = true\n",
        )
        .unwrap();
        let config = read_config_file(&path).unwrap();
        assert_eq!(config.performance_reports_dir(), PathBuf::from("out/performance-reports"));
        assert!(config.accessibility.report_console.id);
        assert!(!config.accessibility.report_console.impact);

        fs::write(&path, "[accessibility.report_console]\nselector = true\n").unwrap();
        assert!(matches!(
            read_config_file(&path),
            Err(ReportError::Config { .. })
        ));
    }

    #[test]
    fn test_precedence_cli_over_env_over_file() {
        let file = Config {
            build_dir: PathBuf::from("from-file"),
            ..Config::default()
        };
        let env = Overrides::from_lookup(lookup(&[
            (ENV_BUILD_DIR, "from-env"),
            (ENV_REPORTS_DIR, "env-reports"),
            (ENV_CONSOLE, "off"),
        ]));
        let cli = Overrides {
            reports_dir: Some(PathBuf::from("cli-reports")),
            ..Overrides::default()
        };

        let config = file.apply(cli.or(env));

        assert_eq!(config.build_dir, PathBuf::from("from-env"));
        assert_eq!(config.accessibility_reports_dir(), PathBuf::from("cli-reports"));
        assert!(!config.accessibility.console);
    }

    #[test]
    fn test_invalid_env_flag_ignored() {
        let env = Overrides::from_lookup(lookup(&[(ENV_CONSOLE, "maybe"), (ENV_BUILD_DIR, " ")]));
        assert_eq!(env, Overrides::default());
    }

    #[test]
    fn test_initialize_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("axereport.toml");

        initialize_config_file(Some(&path)).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, DEFAULT_CONFIG_CONTENT);

        fs::write(&path, "build_dir = \"custom\"\n").unwrap();
        initialize_config_file(Some(&path)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "build_dir = \"custom\"\n");
    }
}
