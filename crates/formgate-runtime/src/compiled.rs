//! Compiled rule set
//!
//! Conditions are turned into [`Matcher`]s once, when the rule set is
//! loaded, so evaluation passes never recompile patterns. Matching results
//! are identical to [`formgate_core::ConditionMatcher::matches`].

use formgate_core::{Condition, Matcher, Rule, RuleSet};

/// A trigger ready for evaluation
#[derive(Debug, Clone)]
pub struct CompiledTrigger {
    pub field: String,
    pub matcher: Matcher,
}

/// A validation ready for evaluation
#[derive(Debug, Clone)]
pub struct CompiledValidation {
    pub field: String,
    pub matcher: Matcher,
    pub message: String,
}

/// A rule ready for evaluation
#[derive(Debug, Clone)]
pub struct CompiledRule {
    /// Rule ID or positional label
    pub label: String,
    /// Triggers that take part in the AND (incomplete ones are dropped)
    pub triggers: Vec<CompiledTrigger>,
    /// Validations with a target field
    pub validations: Vec<CompiledValidation>,
}

/// Ordered compiled rules; index `i` corresponds to rule `i` of the source set
#[derive(Debug, Clone, Default)]
pub struct CompiledRuleSet {
    rules: Vec<CompiledRule>,
}

impl CompiledRuleSet {
    /// Compile every rule of `ruleset`
    pub fn compile(ruleset: &RuleSet) -> Self {
        let rules = ruleset
            .iter()
            .enumerate()
            .map(|(index, rule)| CompiledRule::compile(rule, index))
            .collect();

        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CompiledRule> {
        self.rules.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompiledRule> {
        self.rules.iter()
    }
}

impl CompiledRule {
    /// Compile one rule; `index` is its position in the rule set
    pub fn compile(rule: &Rule, index: usize) -> Self {
        let label = rule.label(index);

        let triggers = rule
            .trigger
            .iter()
            .filter(|t| !t.is_skipped())
            .filter_map(|t| {
                let field = t.field_id()?;
                Some(CompiledTrigger {
                    field: field.to_string(),
                    matcher: compile_condition(&label, field, t.condition.as_ref()),
                })
            })
            .collect();

        let validations = rule
            .validation
            .iter()
            .filter_map(|v| {
                let field = v.field_id()?;
                Some(CompiledValidation {
                    field: field.to_string(),
                    matcher: compile_condition(&label, field, v.condition.as_ref()),
                    message: v.message_or_default().to_string(),
                })
            })
            .collect();

        Self {
            label,
            triggers,
            validations,
        }
    }

    /// A rule without triggers is always active
    pub fn is_unconditional(&self) -> bool {
        self.triggers.is_empty()
    }
}

fn compile_condition(label: &str, field: &str, condition: Option<&Condition>) -> Matcher {
    match Matcher::try_compile(condition) {
        Ok(matcher) => matcher,
        Err(e) => {
            tracing::warn!(rule = label, field, "{}; comparing literally", e);
            Matcher::compile(condition)
        }
    }
}
