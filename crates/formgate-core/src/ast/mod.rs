//! Rule definitions for formgate
//!
//! This module contains the configuration-time model:
//! - Conditions (with literal/pattern match mode)
//! - Rules (trigger and validation lists)
//! - Rule sets (ordered collection of rules)

pub mod condition;
pub mod rule;
pub mod ruleset;

pub use condition::{Condition, MatchMode};
pub use rule::{Rule, Trigger, Validation, DEFAULT_MESSAGE};
pub use ruleset::RuleSet;
