//! Incremental evaluation state
//!
//! Keeps the failures of every rule from the last pass so that, after a
//! field change, only the rules reading that field are re-evaluated. A
//! rule's outcome depends only on the fields it reads, so the report is
//! always identical to a full sweep over the same values.

use crate::compiled::CompiledRuleSet;
use crate::error::{Result, RuntimeError};
use crate::evaluator::RuleEvaluator;
use crate::index::FieldIndex;
use crate::reader::FieldValueReader;
use crate::result::{ResultAggregator, ValidationReport};
use formgate_core::ValidationFailure;
use std::sync::Arc;

/// Per-rule outcomes of the most recent evaluation
#[derive(Debug, Clone)]
pub struct EvaluationState {
    rules: Arc<CompiledRuleSet>,
    index: Arc<FieldIndex>,
    outcomes: Vec<Vec<ValidationFailure>>,
    initialized: bool,
}

impl EvaluationState {
    /// Create a state for `rules`; `index` must be built from the same rule set
    pub fn new(rules: Arc<CompiledRuleSet>, index: Arc<FieldIndex>) -> Result<Self> {
        if index.rule_count() != rules.len() {
            return Err(RuntimeError::IndexMismatch {
                index_rules: index.rule_count(),
                rules: rules.len(),
            });
        }

        Ok(Self {
            outcomes: vec![Vec::new(); rules.len()],
            rules,
            index,
            initialized: false,
        })
    }

    /// Re-evaluate every rule
    pub fn refresh_all<R>(&mut self, reader: &R) -> ValidationReport
    where
        R: FieldValueReader + ?Sized,
    {
        for (slot, rule) in self.outcomes.iter_mut().zip(self.rules.iter()) {
            *slot = RuleEvaluator::evaluate_rule(rule, reader);
        }
        self.initialized = true;
        self.report()
    }

    /// Re-evaluate only the rules that read one of `changed`
    ///
    /// Falls back to a full sweep if nothing has been evaluated yet.
    pub fn refresh_fields<I, S, R>(&mut self, changed: I, reader: &R) -> ValidationReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        R: FieldValueReader + ?Sized,
    {
        if !self.initialized {
            return self.refresh_all(reader);
        }

        let affected = self.index.affected_rules(changed);
        tracing::debug!(rules = ?affected, "Selective re-evaluation");

        for rule_index in affected {
            if let (Some(slot), Some(rule)) =
                (self.outcomes.get_mut(rule_index), self.rules.get(rule_index))
            {
                *slot = RuleEvaluator::evaluate_rule(rule, reader);
            }
        }

        self.report()
    }

    /// Aggregate the cached outcomes in rule order
    pub fn report(&self) -> ValidationReport {
        ResultAggregator::aggregate(self.outcomes.iter().flatten().cloned())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}
