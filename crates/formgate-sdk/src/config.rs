//! Configuration types for FormValidator

use crate::error::{Result, SdkError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Rule file path(s); `.json` files are read as JSON, everything else as YAML
    #[serde(default)]
    pub rule_files: Vec<PathBuf>,

    /// Rule contents (name, content) - alternative to file paths
    #[serde(skip)]
    pub rule_contents: Vec<(String, String)>,

    /// How re-evaluation after a field change is scoped
    #[serde(default)]
    pub evaluation_mode: EvaluationMode,

    /// Reject unknown keys and uncompilable patterns while loading rules
    #[serde(default)]
    pub strict: bool,

    /// Host-side change detection
    #[serde(default)]
    pub watch: WatchConfig,
}

/// Re-evaluation scope after a field change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationMode {
    /// Re-evaluate every rule on every change
    #[default]
    FullSweep,
    /// Re-evaluate only the rules that read a changed field
    Selective,
}

/// Change detection settings for [`crate::host::WatchLoop`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// How often participating fields are polled for changes
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Quiet period after the last change before re-evaluating
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_poll_interval_ms() -> u64 {
    250
}

fn default_debounce_ms() -> u64 {
    100
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl WatchConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// A zero poll interval would spin
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(SdkError::ConfigError(
                "watch.poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            rule_files: Vec::new(),
            rule_contents: Vec::new(),
            evaluation_mode: EvaluationMode::default(),
            strict: false,
            watch: WatchConfig::default(),
        }
    }

    /// Parse a YAML configuration document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| SdkError::ConfigError(e.to_string()))?;
        config.watch.validate()?;
        Ok(config)
    }

    /// Load a YAML configuration file; relative rule paths resolve against its directory
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = Self::from_yaml(&std::fs::read_to_string(path)?)?;

        if let Some(base) = path.parent() {
            config.rule_files = config
                .rule_files
                .into_iter()
                .map(|p| if p.is_relative() { base.join(p) } else { p })
                .collect();
        }

        Ok(config)
    }

    /// Add a rule file
    pub fn with_rule_file(mut self, path: PathBuf) -> Self {
        self.rule_files.push(path);
        self
    }

    /// Set the evaluation mode
    pub fn with_evaluation_mode(mut self, mode: EvaluationMode) -> Self {
        self.evaluation_mode = mode;
        self
    }

    /// Enable strict rule loading
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_builder() {
        let config = EngineConfig::new()
            .with_rule_file(PathBuf::from("rules.yaml"))
            .with_evaluation_mode(EvaluationMode::Selective)
            .strict(true);

        assert_eq!(config.rule_files.len(), 1);
        assert_eq!(config.evaluation_mode, EvaluationMode::Selective);
        assert!(config.strict);
    }

    #[test]
    fn test_from_yaml_defaults() {
        let config = EngineConfig::from_yaml("rule_files: [form.yaml]").unwrap();

        assert_eq!(config.evaluation_mode, EvaluationMode::FullSweep);
        assert_eq!(config.watch, WatchConfig::default());
        assert_eq!(config.watch.poll_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_from_yaml_full() {
        let yaml = r#"
rule_files:
  - rules/demographics.yaml
evaluation_mode: selective
strict: true
watch:
  poll_interval_ms: 500
  debounce_ms: 50
"#;

        let config = EngineConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.evaluation_mode, EvaluationMode::Selective);
        assert!(config.strict);
        assert_eq!(config.watch.debounce(), Duration::from_millis(50));
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let result = EngineConfig::from_yaml("watch:\n  poll_interval_ms: 0");
        assert!(matches!(result, Err(SdkError::ConfigError(_))));
    }

    #[test]
    fn test_from_file_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.yaml");
        std::fs::write(&path, "rule_files: [rules.yaml, /abs/rules.json]").unwrap();

        let config = EngineConfig::from_file(&path).unwrap();
        assert_eq!(config.rule_files[0], dir.path().join("rules.yaml"));
        assert_eq!(config.rule_files[1], PathBuf::from("/abs/rules.json"));
    }
}
