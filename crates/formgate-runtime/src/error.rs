//! Runtime error types

use thiserror::Error;

/// Runtime error
///
/// Evaluating rules never fails; these cover misuse of the runtime API.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Rule index outside the compiled rule set
    #[error("Rule index {index} out of bounds (rule count {len})")]
    RuleIndexOutOfBounds { index: usize, len: usize },

    /// Field index built from a different rule set
    #[error("Field index covers {index_rules} rules but the rule set has {rules}")]
    IndexMismatch { index_rules: usize, rules: usize },

    /// Report serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
