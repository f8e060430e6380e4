//! YAML Parser
//!
//! Provides utilities for reading rule configuration out of YAML values.

use crate::error::{ParseError, Result};
use serde_yaml::Value as YamlValue;

/// YAML parser utilities
pub struct YamlParser;

impl YamlParser {
    /// Parse YAML string into a YAML value
    pub fn parse(yaml_str: &str) -> Result<YamlValue> {
        Ok(serde_yaml::from_str(yaml_str)?)
    }

    /// Parse YAML string containing multiple documents
    ///
    /// Supports explicit `---` separators, and also auto-splits before every
    /// `rule:` / `rules:` key at column 0 so several rules can share one file
    /// without separators.
    pub fn parse_multi_document(yaml_str: &str) -> Result<Vec<YamlValue>> {
        use serde::Deserialize;

        let preprocessed = Self::preprocess_multi_document(yaml_str);

        let deserializer = serde_yaml::Deserializer::from_str(&preprocessed);
        let mut documents = Vec::new();

        for document in deserializer {
            documents.push(YamlValue::deserialize(document)?);
        }

        Ok(documents)
    }

    /// Insert `---` before column-0 `rule:` / `rules:` keys
    fn preprocess_multi_document(yaml_str: &str) -> String {
        let mut result = String::with_capacity(yaml_str.len() + 100);
        let mut seen_content = false;
        let mut recent_separator = false;

        for line in yaml_str.lines() {
            let trimmed = line.trim();

            let is_definition_start = !line.starts_with(' ')
                && !line.starts_with('\t')
                && (trimmed.starts_with("rule:") || trimmed.starts_with("rules:"));

            if is_definition_start && seen_content && !recent_separator {
                result.push_str("---\n");
            }

            result.push_str(line);
            result.push('\n');

            if trimmed == "---" {
                recent_separator = true;
            } else if !trimmed.is_empty() && !trimmed.starts_with('#') {
                recent_separator = false;
                seen_content = true;
            }
        }

        result
    }

    /// Get an optional scalar field rendered as a string
    ///
    /// Numbers and booleans are normalized to their text form, null is `None`.
    pub fn get_optional_scalar(obj: &YamlValue, field: &str, context: &str) -> Result<Option<String>> {
        match obj.get(field) {
            None => Ok(None),
            Some(value) => Self::scalar_to_string(value).map_err(|message| ParseError::InvalidValue {
                field: format!("{}.{}", context, field),
                message,
            }),
        }
    }

    /// Render a scalar YAML value as a string (`None` for null)
    pub fn scalar_to_string(value: &YamlValue) -> std::result::Result<Option<String>, String> {
        match value {
            YamlValue::Null => Ok(None),
            YamlValue::Bool(b) => Ok(Some(b.to_string())),
            YamlValue::Number(n) => Ok(Some(n.to_string())),
            YamlValue::String(s) => Ok(Some(s.clone())),
            YamlValue::Tagged(t) => Self::scalar_to_string(&t.value),
            YamlValue::Sequence(_) => Err("expected a scalar, found a list".to_string()),
            YamlValue::Mapping(_) => Err("expected a scalar, found a mapping".to_string()),
        }
    }

    /// Get an optional list field; present but not a list is an error
    pub fn get_optional_array<'a>(
        obj: &'a YamlValue,
        field: &str,
        context: &str,
    ) -> Result<Option<&'a Vec<YamlValue>>> {
        match obj.get(field) {
            None | Some(YamlValue::Null) => Ok(None),
            Some(YamlValue::Sequence(items)) => Ok(Some(items)),
            Some(_) => Err(ParseError::InvalidValue {
                field: format!("{}.{}", context, field),
                message: "expected a list".to_string(),
            }),
        }
    }

    /// Get all keys from a YAML mapping
    pub fn get_keys(obj: &YamlValue) -> Vec<String> {
        if let Some(mapping) = obj.as_mapping() {
            mapping
                .keys()
                .filter_map(|k| k.as_str())
                .map(|s| s.to_string())
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Validate fields in a YAML object against a list of known fields
    ///
    /// Returns one warning per unknown field, with a suggestion when one is close.
    pub fn validate_fields(obj: &YamlValue, known_fields: &[&str], context: &str) -> Vec<String> {
        let mut warnings = Vec::new();

        for field_name in Self::get_keys(obj) {
            if known_fields.contains(&field_name.as_str()) {
                continue;
            }

            let typo_correction = FIELD_CORRECTIONS
                .iter()
                .find(|(typo, _)| *typo == field_name)
                .map(|(_, correct)| *correct)
                .filter(|correct| known_fields.contains(correct));

            let suggestion = if let Some(correct) = typo_correction {
                format!(" Did you mean '{}'?", correct)
            } else if let Some(similar) = Self::find_similar_field(&field_name, known_fields) {
                format!(" Did you mean '{}'?", similar)
            } else {
                String::new()
            };

            warnings.push(format!(
                "Unknown field '{}' in {}.{}",
                field_name, context, suggestion
            ));
        }

        warnings
    }

    /// Validate fields strictly - returns error if unknown fields found
    pub fn validate_fields_strict(obj: &YamlValue, known_fields: &[&str], context: &str) -> Result<()> {
        let errors = Self::validate_fields(obj, known_fields, context);

        if !errors.is_empty() {
            for error in &errors {
                log::error!("Field validation error: {}", error);
            }

            return Err(ParseError::UnknownField {
                context: context.to_string(),
                message: errors.join("; "),
            });
        }

        Ok(())
    }

    /// Check known fields, logging warnings or failing depending on `strict`
    pub fn check_fields(obj: &YamlValue, known_fields: &[&str], context: &str, strict: bool) -> Result<()> {
        if strict {
            return Self::validate_fields_strict(obj, known_fields, context);
        }
        for warning in Self::validate_fields(obj, known_fields, context) {
            log::warn!("{}", warning);
        }
        Ok(())
    }

    /// Find similar field names using Levenshtein distance
    fn find_similar_field(field: &str, known_fields: &[&str]) -> Option<String> {
        known_fields
            .iter()
            .filter(|known| levenshtein_distance(field, known) <= 2)
            .min_by_key(|known| levenshtein_distance(field, known))
            .map(|s| s.to_string())
    }
}

/// Common field name mistakes and their corrections
const FIELD_CORRECTIONS: &[(&str, &str)] = &[
    ("msg", "message"),
    ("error", "message"),
    ("error_message", "message"),
    ("conditions", "condition"),
    ("cond", "condition"),
    ("regex", "condition"),
    ("field_id", "field"),
    ("field_name", "field"),
    ("name", "id"),
    ("when", "trigger"),
    ("checks", "validation"),
];

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut matrix = vec![vec![0; len2 + 1]; len1 + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=len2 {
        matrix[0][j] = j;
    }

    for (i, &c1) in s1_chars.iter().enumerate() {
        for (j, &c2) in s2_chars.iter().enumerate() {
            let cost = if c1 == c2 { 0 } else { 1 };
            matrix[i + 1][j + 1] = std::cmp::min(
                std::cmp::min(
                    matrix[i][j + 1] + 1, // deletion
                    matrix[i + 1][j] + 1, // insertion
                ),
                matrix[i][j] + cost, // substitution
            );
        }
    }

    matrix[len1][len2]
}
