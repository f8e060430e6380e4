//! Field value types
//!
//! `FieldValue` is what a form control holds. The matcher only ever sees
//! its observed string form, see [`FieldValue::to_observed`].

use serde::{Deserialize, Serialize};

/// Separator used to join multi-valued controls (checkbox groups, multi-selects)
pub const MULTI_VALUE_SEPARATOR: &str = ",";

/// Current value of a form field
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// No value / control not present
    #[default]
    Null,
    /// Checkbox-like value
    Bool(bool),
    /// Numeric input
    Number(f64),
    /// Text input or single selection
    Text(String),
    /// All selected values of a multi-valued control
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Normalize to the string the condition matcher operates on
    pub fn to_observed(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Number(n) => format_number(*n),
            FieldValue::Text(s) => s.clone(),
            FieldValue::List(items) => items
                .iter()
                .map(FieldValue::to_observed)
                .collect::<Vec<_>>()
                .join(MULTI_VALUE_SEPARATOR),
        }
    }

    /// Empty or whitespace-only once observed
    pub fn is_blank(&self) -> bool {
        self.to_observed().trim().is_empty()
    }
}

fn format_number(n: f64) -> String {
    // Integral values print without a trailing ".0", as a form control would show them
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        FieldValue::List(items.into_iter().map(FieldValue::from).collect())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items.into_iter().map(FieldValue::from).collect())
    }
}
