//! Condition definitions
//!
//! A condition is the value a field must satisfy. Whether it is compared
//! literally or as a regular expression is decided by its [`MatchMode`].

use crate::condition::is_pattern_like;
use serde::{Deserialize, Serialize};

/// How a condition value is compared against an observed field value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Infer the mode from the condition text (pattern metacharacters => pattern)
    #[default]
    Auto,
    /// Exact string equality
    Literal,
    /// Unanchored, case-sensitive regular expression
    Pattern,
}

/// A condition value with its match mode
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Condition {
    /// Raw condition text (never trimmed)
    pub value: String,

    /// Match mode
    #[serde(default)]
    pub mode: MatchMode,
}

impl Condition {
    /// Create a condition whose mode is inferred from its text
    pub fn auto(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            mode: MatchMode::Auto,
        }
    }

    /// Create a condition compared by exact equality
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            mode: MatchMode::Literal,
        }
    }

    /// Create a condition compared as a regular expression
    pub fn pattern(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            mode: MatchMode::Pattern,
        }
    }

    /// An empty condition imposes no constraint
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Resolve `Auto` into `Literal` or `Pattern`
    pub fn effective_mode(&self) -> MatchMode {
        match self.mode {
            MatchMode::Auto if is_pattern_like(&self.value) => MatchMode::Pattern,
            MatchMode::Auto => MatchMode::Literal,
            explicit => explicit,
        }
    }
}

impl From<&str> for Condition {
    fn from(value: &str) -> Self {
        Condition::auto(value)
    }
}

impl From<String> for Condition {
    fn from(value: String) -> Self {
        Condition::auto(value)
    }
}
