//! Rule definitions

use super::condition::Condition;
use serde::{Deserialize, Serialize};

/// Message reported when a validation has none configured
pub const DEFAULT_MESSAGE: &str = "Invalid value.";

/// Rule definition
///
/// A rule is active when every trigger matches. Only active rules check
/// their validations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rule {
    /// Optional rule ID (used in logs only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Trigger conditions (AND)
    #[serde(default)]
    pub trigger: Vec<Trigger>,

    /// Validations checked while the rule is active
    #[serde(default)]
    pub validation: Vec<Validation>,
}

/// A condition on a field that gates the rule
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trigger {
    /// Field identifier
    #[serde(default)]
    pub field: Option<String>,

    /// Condition the field value must satisfy
    #[serde(default)]
    pub condition: Option<Condition>,
}

/// A condition on a field checked while the rule is active
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Validation {
    /// Field identifier
    #[serde(default)]
    pub field: Option<String>,

    /// Condition the field value must satisfy
    #[serde(default)]
    pub condition: Option<Condition>,

    /// Error message reported on mismatch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Rule {
    /// Create an empty rule
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rule ID
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a trigger
    pub fn add_trigger(mut self, trigger: Trigger) -> Self {
        self.trigger.push(trigger);
        self
    }

    /// Add a validation
    pub fn add_validation(mut self, validation: Validation) -> Self {
        self.validation.push(validation);
        self
    }

    /// Name used when logging about this rule
    pub fn label(&self, index: usize) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("rule#{}", index),
        }
    }

    /// All field identifiers this rule reads, triggers first
    ///
    /// Skipped triggers are left out since evaluation never reads their field.
    pub fn referenced_fields(&self) -> impl Iterator<Item = &str> {
        self.trigger
            .iter()
            .filter(|t| !t.is_skipped())
            .filter_map(Trigger::field_id)
            .chain(self.validation.iter().filter_map(Validation::field_id))
    }
}

impl Trigger {
    /// Create a trigger on `field`
    pub fn new(field: impl Into<String>, condition: impl Into<Condition>) -> Self {
        Self {
            field: Some(field.into()),
            condition: Some(condition.into()),
        }
    }

    /// Field identifier, treating an empty one as absent
    pub fn field_id(&self) -> Option<&str> {
        self.field.as_deref().filter(|f| !f.is_empty())
    }

    /// A trigger missing its field or condition does not take part in the AND
    pub fn is_skipped(&self) -> bool {
        self.field_id().is_none() || self.condition.as_ref().map_or(true, Condition::is_empty)
    }
}

impl Validation {
    /// Create a validation on `field` with the default message
    pub fn new(field: impl Into<String>, condition: impl Into<Condition>) -> Self {
        Self {
            field: Some(field.into()),
            condition: Some(condition.into()),
            message: None,
        }
    }

    /// Set the error message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Field identifier, treating an empty one as absent
    pub fn field_id(&self) -> Option<&str> {
        self.field.as_deref().filter(|f| !f.is_empty())
    }

    /// Configured message, or [`DEFAULT_MESSAGE`]
    pub fn message_or_default(&self) -> &str {
        match self.message.as_deref() {
            Some(m) if !m.is_empty() => m,
            _ => DEFAULT_MESSAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_creation() {
        let rule = Rule::new()
            .with_id("race_other")
            .add_trigger(Trigger::new("race", "Other"))
            .add_validation(
                Validation::new("race_other", "^[A-Za-z ]+$").with_message("Letters only"),
            );

        assert_eq!(rule.id.as_deref(), Some("race_other"));
        assert_eq!(rule.trigger.len(), 1);
        assert_eq!(rule.validation.len(), 1);
        assert_eq!(rule.validation[0].message_or_default(), "Letters only");
    }

    #[test]
    fn test_default_message() {
        let validation = Validation::new("gender", "Male");
        assert_eq!(validation.message_or_default(), DEFAULT_MESSAGE);

        let validation = Validation::new("gender", "Male").with_message("");
        assert_eq!(validation.message_or_default(), "Invalid value.");
    }

    #[test]
    fn test_trigger_skipped_when_incomplete() {
        let missing_field = Trigger {
            field: None,
            condition: Some(Condition::auto("x")),
        };
        let empty_field = Trigger {
            field: Some(String::new()),
            condition: Some(Condition::auto("x")),
        };
        let missing_condition = Trigger {
            field: Some("a".to_string()),
            condition: None,
        };

        assert!(missing_field.is_skipped());
        assert!(empty_field.is_skipped());
        assert!(missing_condition.is_skipped());
        assert!(!Trigger::new("a", "x").is_skipped());
    }

    #[test]
    fn test_referenced_fields_order() {
        let rule = Rule::new()
            .add_trigger(Trigger::new("a", "1"))
            .add_trigger(Trigger::default())
            .add_validation(Validation::new("b", "2"))
            .add_validation(Validation::new("a", "3"));

        let fields: Vec<&str> = rule.referenced_fields().collect();
        assert_eq!(fields, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_referenced_fields_ignore_skipped_triggers() {
        let rule = Rule::new()
            .add_trigger(Trigger {
                field: Some("ghost".to_string()),
                condition: None,
            })
            .add_trigger(Trigger::new("blank", ""))
            .add_validation(Validation::new("email", "x"));

        let fields: Vec<&str> = rule.referenced_fields().collect();
        assert_eq!(fields, vec!["email"]);
    }

    #[test]
    fn test_label() {
        assert_eq!(Rule::new().label(3), "rule#3");
        assert_eq!(Rule::new().with_id("x").label(3), "x");
    }
}
