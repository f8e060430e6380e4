//! Builder pattern for FormValidator

use crate::config::{EngineConfig, EvaluationMode};
use crate::error::{Result, SdkError};
use crate::form_validator::FormValidator;
use formgate_core::RuleSet;
use formgate_parser::RuleSetParser;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Builder for FormValidator
///
/// # Example
///
/// ```rust,ignore
/// use formgate_sdk::{EvaluationMode, FormValidatorBuilder};
///
/// let validator = FormValidatorBuilder::new()
///     .add_rule_file("rules/demographics.yaml")
///     .evaluation_mode(EvaluationMode::Selective)
///     .build()
///     .await?;
/// ```
pub struct FormValidatorBuilder {
    config: EngineConfig,
    rules: RuleSet,
}

impl FormValidatorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            rules: RuleSet::new(),
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: EngineConfig) -> Self {
        Self {
            config,
            rules: RuleSet::new(),
        }
    }

    /// Add a rule file
    pub fn add_rule_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.rule_files.push(path.into());
        self
    }

    /// Add multiple rule files
    pub fn add_rule_files(mut self, paths: Vec<PathBuf>) -> Self {
        self.config.rule_files.extend(paths);
        self
    }

    /// Add rule content directly (alternative to file path)
    ///
    /// # Arguments
    /// * `name` - Name used in errors; a `.json` suffix selects the JSON parser
    /// * `content` - YAML or JSON rule configuration
    pub fn add_rule_content(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.config.rule_contents.push((name.into(), content.into()));
        self
    }

    /// Add already-parsed rules; they come before file and content rules
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Set the evaluation mode
    pub fn evaluation_mode(mut self, mode: EvaluationMode) -> Self {
        self.config.evaluation_mode = mode;
        self
    }

    /// Reject unknown keys and invalid patterns while loading
    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    /// Set the polling interval used by the watch loop
    ///
    /// Rounded up to whole milliseconds; only `Duration::ZERO` is rejected by `build()`.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.watch.poll_interval_ms = whole_millis(interval);
        self
    }

    /// Set the debounce window used by the watch loop, rounded up to whole milliseconds
    pub fn debounce(mut self, window: Duration) -> Self {
        self.config.watch.debounce_ms = whole_millis(window);
        self
    }

    /// Load every rule source and build the validator
    pub async fn build(self) -> Result<FormValidator> {
        self.config.watch.validate()?;

        let mut rules = self.rules;

        for path in &self.config.rule_files {
            let content = tokio::fs::read_to_string(path).await.map_err(|e| {
                SdkError::InvalidRuleFile(format!("{}: {}", path.display(), e))
            })?;
            rules.extend(parse_source(path, &content, self.config.strict)?);
        }

        for (name, content) in &self.config.rule_contents {
            rules.extend(parse_source(Path::new(name), content, self.config.strict)?);
        }

        Ok(FormValidator::new(rules, self.config))
    }
}

impl Default for FormValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn whole_millis(duration: Duration) -> u64 {
    let millis = duration.as_nanos().div_ceil(1_000_000);
    u64::try_from(millis).unwrap_or(u64::MAX)
}

fn parse_source(name: &Path, content: &str, strict: bool) -> Result<RuleSet> {
    let is_json = name
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

    let parsed = match (is_json, strict) {
        (true, true) => RuleSetParser::parse_json_strict(content),
        (true, false) => RuleSetParser::parse_json(content),
        (false, true) => RuleSetParser::parse_strict(content),
        (false, false) => RuleSetParser::parse(content),
    };

    parsed.map_err(|e| {
        tracing::error!("Failed to load rules from {}: {}", name.display(), e);
        SdkError::from(e)
    })
}
