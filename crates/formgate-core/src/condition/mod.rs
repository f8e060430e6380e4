//! Condition Matching Module
//!
//! Decides whether a single observed field value satisfies a single
//! condition. Used by the runtime for both triggers and validations.
//!
//! # Rules
//!
//! - An absent or empty condition always matches.
//! - The observed value is trimmed; the condition text is not.
//! - `Auto` conditions containing any of `\ ^ $ . * + ? ( ) [ ] { } |`
//!   are regular expressions, everything else is compared literally.
//! - Patterns are unanchored and case-sensitive. A pattern that does not
//!   compile is compared literally instead.

mod matcher;

pub use matcher::{is_pattern_like, ConditionMatcher, Matcher, PATTERN_CHARS};
