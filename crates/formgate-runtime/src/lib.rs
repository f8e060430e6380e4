//! formgate Runtime - Rule evaluation engine
//!
//! Evaluates a compiled rule set against a snapshot of field values:
//! trigger matching, validation matching, and aggregation of the
//! resulting failures into a per-field report.
//!
//! Evaluation is synchronous and stateless. [`EvaluationState`] is the only
//! stateful piece and it only caches per-rule outcomes for selective
//! re-evaluation.

pub mod compiled;
pub mod error;
pub mod evaluator;
pub mod index;
pub mod reader;
pub mod result;
pub mod state;

// Re-export main types
pub use compiled::{CompiledRule, CompiledRuleSet, CompiledTrigger, CompiledValidation};
pub use error::{Result, RuntimeError};
pub use evaluator::RuleEvaluator;
pub use index::FieldIndex;
pub use reader::FieldValueReader;
pub use result::{FieldErrors, ResultAggregator, ValidationReport};
pub use state::EvaluationState;
