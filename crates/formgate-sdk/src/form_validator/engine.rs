//! FormValidator implementation

use super::session::ValidationSession;
use crate::config::{EngineConfig, EvaluationMode};
use crate::error::Result;
use formgate_core::{FieldSnapshot, RuleSet};
use formgate_runtime::{
    CompiledRuleSet, FieldIndex, FieldValueReader, ResultAggregator, RuleEvaluator,
    ValidationReport,
};
use std::sync::Arc;

/// Loaded form rules, ready to validate any number of forms
#[derive(Debug, Clone)]
pub struct FormValidator {
    ruleset: Arc<RuleSet>,
    compiled: Arc<CompiledRuleSet>,
    index: Arc<FieldIndex>,
    config: EngineConfig,
}

impl FormValidator {
    /// Compile `ruleset` and build its field index
    pub fn new(ruleset: RuleSet, config: EngineConfig) -> Self {
        let compiled = CompiledRuleSet::compile(&ruleset);
        let index = FieldIndex::build(&ruleset);

        tracing::info!(
            rules = ruleset.len(),
            fields = index.participating_fields().len(),
            mode = ?config.evaluation_mode,
            "Form validator ready"
        );

        Self {
            ruleset: Arc::new(ruleset),
            compiled: Arc::new(compiled),
            index: Arc::new(index),
            config,
        }
    }

    /// Run a full sweep over every rule
    pub fn validate<R>(&self, reader: &R) -> ValidationReport
    where
        R: FieldValueReader + ?Sized,
    {
        let report = ResultAggregator::aggregate(RuleEvaluator::evaluate(&self.compiled, reader));
        tracing::debug!(errors = report.error_count(), "Validation pass complete");
        report
    }

    /// Validate a JSON object of field values
    pub fn validate_snapshot_json(&self, json: &str) -> Result<ValidationReport> {
        let snapshot = FieldSnapshot::from_json(json)?;
        Ok(self.validate(&snapshot))
    }

    /// Start a stateful session for one form instance
    pub fn session(&self) -> Result<ValidationSession> {
        ValidationSession::new(
            self.config.evaluation_mode,
            Arc::clone(&self.compiled),
            Arc::clone(&self.index),
        )
    }

    /// Fields read by at least one rule, in first-seen order
    pub fn participating_fields(&self) -> &[String] {
        self.index.participating_fields()
    }

    pub fn is_participating(&self, field: &str) -> bool {
        self.index.is_participating(field)
    }

    pub fn rule_count(&self) -> usize {
        self.ruleset.len()
    }

    pub fn ruleset(&self) -> &RuleSet {
        &self.ruleset
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn evaluation_mode(&self) -> EvaluationMode {
        self.config.evaluation_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formgate_core::{Condition, Rule, Trigger, Validation};

    fn validator() -> FormValidator {
        let rules = RuleSet::from(vec![
            Rule::new()
                .with_id("race_other_letters")
                .add_trigger(Trigger::new("race", "Other"))
                .add_validation(
                    Validation::new("race_other", "^[A-Za-z ]+$").with_message("Letters only"),
                ),
            Rule::new().add_validation(
                Validation::new("email", Condition::pattern("@")).with_message("Bad format"),
            ),
        ]);
        FormValidator::new(rules, EngineConfig::new())
    }

    #[test]
    fn test_validate_snapshot() {
        let validator = validator();
        let snapshot = FieldSnapshot::new()
            .with("race", "Other")
            .with("race_other", "123")
            .with("email", "a@b");

        let report = validator.validate(&snapshot);
        assert_eq!(report.joined_message("race_other", " "), Some("Letters only".to_string()));
        assert!(!report.is_failing("email"));
    }

    #[test]
    fn test_validate_snapshot_json() {
        let validator = validator();
        let report = validator
            .validate_snapshot_json(r#"{"race": "White", "email": "nope"}"#)
            .unwrap();

        assert_eq!(report.failing_fields().collect::<Vec<_>>(), vec!["email"]);
    }

    #[test]
    fn test_bare_at_sign_is_literal() {
        let rules = RuleSet::from(vec![Rule::new()
            .add_validation(Validation::new("email", "@").with_message("Bad format"))]);
        let validator = FormValidator::new(rules, EngineConfig::new());

        let report = validator.validate(&FieldSnapshot::new().with("email", "a@b"));
        assert_eq!(report.joined_message("email", " "), Some("Bad format".to_string()));
        assert!(!validator.validate(&FieldSnapshot::new().with("email", " @ ")).has_errors());
    }

    #[test]
    fn test_malformed_snapshot_json() {
        let validator = validator();
        assert!(validator.validate_snapshot_json("[1, 2").is_err());
    }

    #[test]
    fn test_participation() {
        let validator = validator();
        assert_eq!(validator.participating_fields(), &["race", "race_other", "email"]);
        assert!(!validator.is_participating("comments"));
        assert_eq!(validator.rule_count(), 2);
        assert_eq!(validator.evaluation_mode(), EvaluationMode::FullSweep);
    }
}
