//! Parser error types

use thiserror::Error;

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Missing required field
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Invalid field value
    #[error("Invalid value for field '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Explicit pattern condition that does not compile (strict mode only)
    #[error("Invalid pattern at '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: formgate_core::CoreError,
    },

    /// Unknown fields (strict mode only)
    #[error("Unknown field(s) in {context}: {message}")]
    UnknownField { context: String, message: String },
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
