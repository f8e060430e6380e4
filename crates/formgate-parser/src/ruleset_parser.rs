//! Rule set parser
//!
//! Parses a whole rule configuration into an ordered [`RuleSet`].
//!
//! Accepted shapes (YAML or JSON):
//! - a `rules:` list
//! - one or more `rule:` documents (with or without `---` separators)
//! - a bare top-level list of rules

use crate::error::Result;
use crate::rule_parser::RuleParser;
use crate::yaml_parser::YamlParser;
use formgate_core::RuleSet;
use serde_yaml::Value as YamlValue;

const DOCUMENT_FIELDS: &[&str] = &["version", "rule", "rules"];

/// Rule set parser
pub struct RuleSetParser;

impl RuleSetParser {
    /// Parse YAML rule configuration; unknown fields are logged as warnings
    pub fn parse(yaml_str: &str) -> Result<RuleSet> {
        Self::parse_yaml(yaml_str, false)
    }

    /// Parse YAML rule configuration, failing on unknown fields and invalid patterns
    pub fn parse_strict(yaml_str: &str) -> Result<RuleSet> {
        Self::parse_yaml(yaml_str, true)
    }

    /// Parse JSON rule configuration (`[...]` or `{"rules": [...]}`)
    pub fn parse_json(json_str: &str) -> Result<RuleSet> {
        Self::parse_json_with(json_str, false)
    }

    /// Parse JSON rule configuration, failing on unknown fields and invalid patterns
    pub fn parse_json_strict(json_str: &str) -> Result<RuleSet> {
        Self::parse_json_with(json_str, true)
    }

    fn parse_json_with(json_str: &str, strict: bool) -> Result<RuleSet> {
        if json_str.trim().is_empty() {
            return Ok(RuleSet::new());
        }
        let json: serde_json::Value = serde_json::from_str(json_str)?;
        let yaml = serde_yaml::to_value(&json)?;
        Self::parse_document(&yaml, 0, strict)
    }

    fn parse_yaml(yaml_str: &str, strict: bool) -> Result<RuleSet> {
        let mut ruleset = RuleSet::new();
        if yaml_str.trim().is_empty() {
            return Ok(ruleset);
        }

        for (index, document) in YamlParser::parse_multi_document(yaml_str)?.iter().enumerate() {
            ruleset.extend(Self::parse_document(document, index, strict)?);
        }

        log::debug!("Parsed {} rule(s)", ruleset.len());
        Ok(ruleset)
    }

    /// Parse the rules held by one document
    pub fn parse_document(document: &YamlValue, index: usize, strict: bool) -> Result<RuleSet> {
        let mut ruleset = RuleSet::new();

        match document {
            YamlValue::Null => {}
            YamlValue::Sequence(items) => {
                for (i, item) in items.iter().enumerate() {
                    ruleset.rules.push(Self::parse_list_entry(item, &format!("rules[{}]", i), strict)?);
                }
            }
            _ => {
                let context = format!("document[{}]", index);
                YamlParser::check_fields(document, DOCUMENT_FIELDS, &context, strict)?;

                if document.get("rule").is_some() {
                    ruleset.rules.push(RuleParser::parse_from_yaml(document, strict)?);
                }
                if let Some(items) = YamlParser::get_optional_array(document, "rules", &context)? {
                    for (i, item) in items.iter().enumerate() {
                        ruleset
                            .rules
                            .push(Self::parse_list_entry(item, &format!("rules[{}]", i), strict)?);
                    }
                }
            }
        }

        Ok(ruleset)
    }

    /// A list entry is either a rule body or a `{rule: {...}}` wrapper
    fn parse_list_entry(
        item: &YamlValue,
        context: &str,
        strict: bool,
    ) -> Result<formgate_core::Rule> {
        match item.get("rule") {
            Some(body) => RuleParser::parse_rule_body(body, context, strict),
            None => RuleParser::parse_rule_body(item, context, strict),
        }
    }
}
