//! Field index
//!
//! Maps each field identifier to the rules that read it, as a trigger or a
//! validation target. Only used to narrow re-evaluation after a field
//! change; a full sweep never consults it.

use formgate_core::RuleSet;
use std::collections::HashMap;

/// Field -> rule indices
#[derive(Debug, Clone, Default)]
pub struct FieldIndex {
    by_field: HashMap<String, Vec<usize>>,
    /// Participating fields in first-seen order
    fields: Vec<String>,
    rule_count: usize,
}

impl FieldIndex {
    /// Build the index from a rule set
    pub fn build(ruleset: &RuleSet) -> Self {
        let mut index = Self {
            rule_count: ruleset.len(),
            ..Self::default()
        };

        for (rule_index, rule) in ruleset.iter().enumerate() {
            for field in rule.referenced_fields() {
                let entry = index.by_field.entry(field.to_string()).or_insert_with(|| {
                    index.fields.push(field.to_string());
                    Vec::new()
                });
                if entry.last() != Some(&rule_index) {
                    entry.push(rule_index);
                }
            }
        }

        index
    }

    /// Rules referencing `field`, ascending
    pub fn rules_for(&self, field: &str) -> &[usize] {
        self.by_field.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rules referencing any of `fields`, ascending and without duplicates
    pub fn affected_rules<I, S>(&self, fields: I) -> Vec<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules: Vec<usize> = fields
            .into_iter()
            .flat_map(|field| self.rules_for(field.as_ref()).to_vec())
            .collect();
        rules.sort_unstable();
        rules.dedup();
        rules
    }

    /// Every field referenced by any rule
    pub fn participating_fields(&self) -> &[String] {
        &self.fields
    }

    pub fn is_participating(&self, field: &str) -> bool {
        self.by_field.contains_key(field)
    }

    /// Number of rules in the set the index was built from
    pub fn rule_count(&self) -> usize {
        self.rule_count
    }
}
