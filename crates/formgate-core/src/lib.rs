//! formgate Core - Core types and condition matching for the formgate rule engine
//!
//! This crate provides the fundamental types used across the formgate crates:
//! - Rule definitions (triggers, validations, conditions)
//! - Field values and snapshots as observed by the engine
//! - The condition matcher (literal vs. pattern)
//! - Error types

pub mod ast;
pub mod condition;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use ast::{Condition, MatchMode, Rule, RuleSet, Trigger, Validation, DEFAULT_MESSAGE};
pub use condition::{is_pattern_like, ConditionMatcher, Matcher};
pub use error::CoreError;
pub use types::{FieldSnapshot, FieldValue, ValidationFailure};
