//! Rule evaluation
//!
//! For each rule, in order:
//! 1. All triggers must match (AND, short-circuit on the first miss).
//! 2. If active, every validation whose target field is non-blank is
//!    matched; each mismatch is a [`ValidationFailure`].
//!
//! Inactive rules never read their validation targets.

use crate::compiled::{CompiledRule, CompiledRuleSet};
use crate::error::{Result, RuntimeError};
use crate::reader::FieldValueReader;
use formgate_core::{RuleSet, ValidationFailure};

/// Rule evaluator
pub struct RuleEvaluator;

impl RuleEvaluator {
    /// Evaluate every rule (full sweep)
    pub fn evaluate<R>(rules: &CompiledRuleSet, reader: &R) -> Vec<ValidationFailure>
    where
        R: FieldValueReader + ?Sized,
    {
        let failures: Vec<_> = rules
            .iter()
            .flat_map(|rule| Self::evaluate_rule(rule, reader))
            .collect();

        tracing::debug!(
            rules = rules.len(),
            failures = failures.len(),
            "Full evaluation pass finished"
        );
        failures
    }

    /// Compile and evaluate an uncompiled rule set in one go
    pub fn evaluate_ruleset<R>(ruleset: &RuleSet, reader: &R) -> Vec<ValidationFailure>
    where
        R: FieldValueReader + ?Sized,
    {
        Self::evaluate(&CompiledRuleSet::compile(ruleset), reader)
    }

    /// Evaluate only the rules at `indices`, in rule-set order
    pub fn evaluate_rules<R>(
        rules: &CompiledRuleSet,
        indices: &[usize],
        reader: &R,
    ) -> Result<Vec<ValidationFailure>>
    where
        R: FieldValueReader + ?Sized,
    {
        let mut ordered = indices.to_vec();
        ordered.sort_unstable();
        ordered.dedup();

        let mut failures = Vec::new();
        for index in ordered {
            let rule = rules.get(index).ok_or(RuntimeError::RuleIndexOutOfBounds {
                index,
                len: rules.len(),
            })?;
            failures.extend(Self::evaluate_rule(rule, reader));
        }

        Ok(failures)
    }

    /// Evaluate a single rule
    pub fn evaluate_rule<R>(rule: &CompiledRule, reader: &R) -> Vec<ValidationFailure>
    where
        R: FieldValueReader + ?Sized,
    {
        if !Self::is_active(rule, reader) {
            return Vec::new();
        }

        let mut failures = Vec::new();
        for validation in &rule.validations {
            let value = reader.get_field_value(&validation.field);

            // Blank targets are not checked yet
            if value.trim().is_empty() {
                continue;
            }

            if !validation.matcher.is_match(&value) {
                tracing::debug!(
                    rule = %rule.label,
                    field = %validation.field,
                    "Validation failed"
                );
                failures.push(ValidationFailure::new(
                    validation.field.clone(),
                    validation.message.clone(),
                ));
            }
        }

        failures
    }

    /// Are all triggers of `rule` satisfied?
    pub fn is_active<R>(rule: &CompiledRule, reader: &R) -> bool
    where
        R: FieldValueReader + ?Sized,
    {
        let active = rule
            .triggers
            .iter()
            .all(|trigger| trigger.matcher.is_match(&reader.get_field_value(&trigger.field)));

        tracing::trace!(rule = %rule.label, active, "Trigger check");
        active
    }
}
