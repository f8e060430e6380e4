//! Rule parser
//!
//! Parses YAML rule definitions into [`Rule`] values.
//!
//! ```yaml
//! rule:
//!   id: race_other_letters
//!   trigger:
//!     - field: race
//!       condition: Other
//!   validation:
//!     - field: race_other
//!       condition: "^[A-Za-z ]+$"
//!       message: Letters only
//! ```
//!
//! A condition is a scalar (match mode inferred), or a mapping with exactly
//! one of `literal:`, `pattern:` or `value:` to pick the mode explicitly.
//!
//! Unquoted numeric conditions are matched against YAML's rendering of the
//! number, so `02134` becomes `2134`. Quote conditions such as zip codes.

use crate::error::{ParseError, Result};
use crate::yaml_parser::YamlParser;
use formgate_core::{Condition, Matcher, Rule, Trigger, Validation};
use serde_yaml::Value as YamlValue;

const RULE_FIELDS: &[&str] = &[
    "id",
    "description",
    "trigger",
    "triggers",
    "validation",
    "validations",
];
const TRIGGER_FIELDS: &[&str] = &["field", "condition"];
const VALIDATION_FIELDS: &[&str] = &["field", "condition", "message"];
const CONDITION_FIELDS: &[&str] = &["literal", "pattern", "value"];

/// Rule parser
pub struct RuleParser;

impl RuleParser {
    /// Parse a single `rule:` document
    pub fn parse(yaml_str: &str) -> Result<Rule> {
        let yaml = YamlParser::parse(yaml_str)?;
        Self::parse_from_yaml(&yaml, false)
    }

    /// Parse a single `rule:` document, rejecting unknown fields and bad patterns
    pub fn parse_strict(yaml_str: &str) -> Result<Rule> {
        let yaml = YamlParser::parse(yaml_str)?;
        Self::parse_from_yaml(&yaml, true)
    }

    /// Parse a document holding a `rule` object
    pub fn parse_from_yaml(yaml: &YamlValue, strict: bool) -> Result<Rule> {
        let rule_obj = yaml.get("rule").ok_or_else(|| ParseError::MissingField {
            field: "rule".to_string(),
        })?;

        Self::parse_rule_body(rule_obj, "rule", strict)
    }

    /// Parse the body of a rule (the mapping under `rule:` or a `rules:` list entry)
    pub fn parse_rule_body(rule_obj: &YamlValue, context: &str, strict: bool) -> Result<Rule> {
        if !rule_obj.is_mapping() {
            return Err(ParseError::InvalidValue {
                field: context.to_string(),
                message: "rule must be a mapping".to_string(),
            });
        }
        YamlParser::check_fields(rule_obj, RULE_FIELDS, context, strict)?;

        let id = YamlParser::get_optional_scalar(rule_obj, "id", context)?;
        let description = YamlParser::get_optional_scalar(rule_obj, "description", context)?;

        let trigger = match Self::get_list(rule_obj, "trigger", "triggers", context)? {
            Some((key, items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    Self::parse_trigger(item, &format!("{}.{}[{}]", context, key, i), strict)
                })
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        let validation = match Self::get_list(rule_obj, "validation", "validations", context)? {
            Some((key, items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    Self::parse_validation(item, &format!("{}.{}[{}]", context, key, i), strict)
                })
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        Ok(Rule {
            id,
            description,
            trigger,
            validation,
        })
    }

    /// Look up a list under its canonical key or its plural alias
    fn get_list<'a>(
        obj: &'a YamlValue,
        key: &'static str,
        alias: &'static str,
        context: &str,
    ) -> Result<Option<(&'static str, &'a Vec<YamlValue>)>> {
        if let Some(items) = YamlParser::get_optional_array(obj, key, context)? {
            return Ok(Some((key, items)));
        }
        Ok(YamlParser::get_optional_array(obj, alias, context)?.map(|items| (alias, items)))
    }

    fn parse_trigger(yaml: &YamlValue, context: &str, strict: bool) -> Result<Trigger> {
        Self::expect_mapping(yaml, context)?;
        YamlParser::check_fields(yaml, TRIGGER_FIELDS, context, strict)?;

        Ok(Trigger {
            field: YamlParser::get_optional_scalar(yaml, "field", context)?,
            condition: Self::parse_condition(yaml.get("condition"), context, strict)?,
        })
    }

    fn parse_validation(yaml: &YamlValue, context: &str, strict: bool) -> Result<Validation> {
        Self::expect_mapping(yaml, context)?;
        YamlParser::check_fields(yaml, VALIDATION_FIELDS, context, strict)?;

        Ok(Validation {
            field: YamlParser::get_optional_scalar(yaml, "field", context)?,
            condition: Self::parse_condition(yaml.get("condition"), context, strict)?,
            message: YamlParser::get_optional_scalar(yaml, "message", context)?,
        })
    }

    /// Parse a condition value
    pub fn parse_condition(
        yaml: Option<&YamlValue>,
        context: &str,
        strict: bool,
    ) -> Result<Option<Condition>> {
        let field = format!("{}.condition", context);
        let yaml = match yaml {
            None => return Ok(None),
            Some(value) => value,
        };

        let condition = if let Some(mapping) = yaml.as_mapping() {
            YamlParser::check_fields(yaml, CONDITION_FIELDS, &field, strict)?;

            let mut chosen = None;
            for (key, value) in mapping {
                let build: fn(String) -> Condition = match key.as_str() {
                    Some("literal") => |text| Condition::literal(text),
                    Some("pattern") => |text| Condition::pattern(text),
                    Some("value") => |text| Condition::auto(text),
                    _ => continue,
                };
                if chosen.is_some() {
                    return Err(ParseError::InvalidValue {
                        field,
                        message: "use exactly one of 'literal', 'pattern' or 'value'".to_string(),
                    });
                }
                Self::warn_if_numeric(value, &field);
                let text = YamlParser::scalar_to_string(value)
                    .map_err(|message| ParseError::InvalidValue {
                        field: field.clone(),
                        message,
                    })?
                    .unwrap_or_default();
                chosen = Some(build(text));
            }

            match chosen {
                Some(condition) => condition,
                None => {
                    return Err(ParseError::InvalidValue {
                        field,
                        message: "expected one of 'literal', 'pattern' or 'value'".to_string(),
                    })
                }
            }
        } else {
            Self::warn_if_numeric(yaml, &field);
            match YamlParser::scalar_to_string(yaml)
                .map_err(|message| ParseError::InvalidValue {
                    field: field.clone(),
                    message,
                })? {
                Some(text) => Condition::auto(text),
                None => return Ok(None),
            }
        };

        if let Err(e) = Matcher::try_compile(Some(&condition)) {
            if strict {
                return Err(ParseError::InvalidPattern { field, source: e });
            }
            log::warn!("{} will be compared literally: {}", field, e);
        }

        Ok(Some(condition))
    }

    fn warn_if_numeric(value: &YamlValue, field: &str) {
        if let YamlValue::Number(n) = value {
            log::warn!(
                "{} is the unquoted number {}; quote it to match the text exactly (e.g. leading zeros)",
                field,
                n
            );
        }
    }

    fn expect_mapping(yaml: &YamlValue, context: &str) -> Result<()> {
        if yaml.is_mapping() {
            Ok(())
        } else {
            Err(ParseError::InvalidValue {
                field: context.to_string(),
                message: "expected a mapping with 'field' and 'condition'".to_string(),
            })
        }
    }
}
