//! Literal / pattern condition matcher

use crate::ast::{Condition, MatchMode};
use crate::error::{CoreError, Result};
use regex::Regex;

/// Characters whose presence makes an `Auto` condition a pattern
pub const PATTERN_CHARS: &[char] = &[
    '\\', '^', '$', '.', '*', '+', '?', '(', ')', '[', ']', '{', '}', '|',
];

/// Heuristic: does this condition text look like a regular expression?
///
/// Literals that happen to contain one of [`PATTERN_CHARS`] (e.g. `N/A (pending)`)
/// are misread as patterns; use [`MatchMode::Literal`] for those.
pub fn is_pattern_like(condition: &str) -> bool {
    condition.contains(PATTERN_CHARS)
}

/// A condition prepared for repeated matching
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Absent or empty condition
    Always,
    /// Exact equality against the trimmed observed value
    Literal(String),
    /// Unanchored regular expression
    Pattern(Regex),
}

impl Matcher {
    /// Prepare a condition, degrading uncompilable patterns to literal equality
    pub fn compile(condition: Option<&Condition>) -> Matcher {
        match Self::try_compile(condition) {
            Ok(matcher) => matcher,
            Err(_) => match condition {
                Some(cond) => Matcher::Literal(cond.value.clone()),
                None => Matcher::Always,
            },
        }
    }

    /// Prepare a condition, reporting uncompilable patterns
    pub fn try_compile(condition: Option<&Condition>) -> Result<Matcher> {
        let cond = match condition {
            Some(cond) if !cond.is_empty() => cond,
            _ => return Ok(Matcher::Always),
        };

        match cond.effective_mode() {
            MatchMode::Pattern => Regex::new(&cond.value)
                .map(Matcher::Pattern)
                .map_err(|e| CoreError::InvalidPattern {
                    pattern: cond.value.clone(),
                    message: e.to_string(),
                }),
            _ => Ok(Matcher::Literal(cond.value.clone())),
        }
    }

    /// Test an observed value (trimmed before comparison)
    pub fn is_match(&self, observed: &str) -> bool {
        let observed = observed.trim();
        match self {
            Matcher::Always => true,
            Matcher::Literal(expected) => observed == expected,
            Matcher::Pattern(re) => re.is_match(observed),
        }
    }
}

/// One-shot condition matching
pub struct ConditionMatcher;

impl ConditionMatcher {
    /// Does `observed` satisfy `condition`?
    ///
    /// Never fails: an invalid pattern is compared literally.
    pub fn matches(observed: &str, condition: Option<&Condition>) -> bool {
        Matcher::compile(condition).is_match(observed)
    }
}
