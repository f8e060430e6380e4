//! Integration tests for rule configuration parsing
//!
//! Covers the configuration shapes a form page ships with.

use formgate_core::{Condition, MatchMode, DEFAULT_MESSAGE};
use formgate_parser::*;

// =============================================================================
// YAML
// =============================================================================

#[test]
fn test_parse_demographics_config() {
    let yaml = r#"
version: "1"
rules:
  - id: race_other_letters
    trigger:
      - field: race
        condition: Other
    validation:
      - field: race_other
        condition: "^[A-Za-z ]+$"
        message: Letters only
  - id: gender_literal
    trigger: []
    validation:
      - field: gender
        condition: Male
"#;

    let ruleset = RuleSetParser::parse(yaml).expect("config should parse");
    assert_eq!(ruleset.len(), 2);

    let second = &ruleset.rules[1];
    assert!(second.trigger.is_empty());
    assert_eq!(second.validation[0].message_or_default(), DEFAULT_MESSAGE);
    assert_eq!(
        second.validation[0].condition.as_ref().map(Condition::effective_mode),
        Some(MatchMode::Literal)
    );
}

#[test]
fn test_mixed_documents_and_lists() {
    let yaml = r#"
rule:
  id: one
  validation:
    - field: a
      condition: x
---
rules:
  - id: two
  - rule:
      id: three
"#;

    let ruleset = RuleSetParser::parse(yaml).unwrap();
    let ids: Vec<_> = ruleset.iter().filter_map(|r| r.id.clone()).collect();
    assert_eq!(ids, vec!["one", "two", "three"]);
}

#[test]
fn test_validation_entry_must_be_mapping() {
    let yaml = r#"
rules:
  - validation:
      - just-a-string
"#;

    let err = RuleSetParser::parse(yaml).unwrap_err();
    assert!(err.to_string().contains("rules[0].validation[0]"));
}

#[test]
fn test_lenient_mode_keeps_invalid_pattern() {
    let yaml = r#"
rules:
  - validation:
      - field: code
        condition: "([A-Z"
"#;

    let ruleset = RuleSetParser::parse(yaml).unwrap();
    assert_eq!(
        ruleset.rules[0].validation[0].condition,
        Some(Condition::auto("([A-Z"))
    );
    assert!(RuleSetParser::parse_strict(yaml).is_err());
}

// =============================================================================
// JSON
// =============================================================================

#[test]
fn test_json_and_yaml_agree() -> anyhow::Result<()> {
    let yaml = r#"
rules:
  - trigger:
      - field: race
        condition: Other
    validation:
      - field: race_other
        condition:
          literal: "N/A (pending)"
        message: Must be N/A
"#;
    let json = r#"{"rules": [{
        "trigger": [{"field": "race", "condition": "Other"}],
        "validation": [{"field": "race_other", "condition": {"literal": "N/A (pending)"}, "message": "Must be N/A"}]
    }]}"#;

    assert_eq!(RuleSetParser::parse(yaml)?, RuleSetParser::parse_json(json)?);
    Ok(())
}
