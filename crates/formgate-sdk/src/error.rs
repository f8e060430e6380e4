//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Rule configuration could not be parsed
    #[error("Parser error: {0}")]
    ParseError(#[from] formgate_parser::ParseError),

    /// Runtime error
    #[error("Runtime error: {0}")]
    RuntimeError(#[from] formgate_runtime::RuntimeError),

    /// Core error (e.g. malformed snapshot)
    #[error("Core error: {0}")]
    CoreError(#[from] formgate_core::CoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid rule file
    #[error("Invalid rule file: {0}")]
    InvalidRuleFile(String),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
