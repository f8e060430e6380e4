//! formgate Parser - rule configuration parser
//!
//! Converts YAML (or JSON) rule configuration into the typed
//! [`formgate_core::RuleSet`] the engine evaluates.

pub mod error;
pub mod rule_parser;
pub mod ruleset_parser;
pub mod yaml_parser;

// Re-export main parser types
pub use error::{ParseError, Result};
pub use rule_parser::RuleParser;
pub use ruleset_parser::RuleSetParser;
pub use yaml_parser::YamlParser;
