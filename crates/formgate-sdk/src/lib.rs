//! formgate SDK
//!
//! High-level API for loading form rules, validating field snapshots and
//! keeping a live form's error state up to date.

pub mod builder;
pub mod config;
pub mod error;
pub mod form_validator;
pub mod host;

// Re-export main types
pub use builder::FormValidatorBuilder;
pub use config::{EngineConfig, EvaluationMode, WatchConfig};
pub use error::{Result, SdkError};
pub use form_validator::{FormValidator, ValidationSession};
pub use host::{FieldWatcher, ReportSink, WatchLoop};

// Re-export commonly used types from dependencies
pub use formgate_core::{Condition, FieldSnapshot, FieldValue, Rule, RuleSet, Trigger, Validation};
pub use formgate_runtime::{FieldValueReader, ValidationReport};
