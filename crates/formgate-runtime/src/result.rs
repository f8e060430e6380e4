//! Validation result aggregation
//!
//! Folds the failures of one evaluation pass into a per-field report that
//! a rendering layer can paint and use to gate submission.

use crate::error::Result;
use formgate_core::ValidationFailure;
use serde::{Deserialize, Serialize};

/// Distinct messages for one field, in first-seen order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    pub field: String,
    pub messages: Vec<String>,
}

/// Per-field failures of one evaluation pass
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Failing fields in first-seen order
    pub fields: Vec<FieldErrors>,
}

impl ValidationReport {
    /// True iff at least one field failed
    pub fn has_errors(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Submission is allowed while there are no errors
    pub fn submit_allowed(&self) -> bool {
        !self.has_errors()
    }

    /// Messages recorded for `field`
    pub fn messages_for(&self, field: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.messages.as_slice())
    }

    /// Messages for `field` concatenated with `separator` (tooltip text)
    pub fn joined_message(&self, field: &str, separator: &str) -> Option<String> {
        self.messages_for(field).map(|m| m.join(separator))
    }

    pub fn is_failing(&self, field: &str) -> bool {
        self.messages_for(field).is_some()
    }

    /// Failing field identifiers
    pub fn failing_fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.field.as_str())
    }

    /// Total number of distinct (field, message) pairs
    pub fn error_count(&self) -> usize {
        self.fields.iter().map(|f| f.messages.len()).sum()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Result aggregator
pub struct ResultAggregator;

impl ResultAggregator {
    /// Group failures by field, dropping repeated messages for the same field
    pub fn aggregate<I>(failures: I) -> ValidationReport
    where
        I: IntoIterator<Item = ValidationFailure>,
    {
        let mut report = ValidationReport::default();

        for failure in failures {
            match report.fields.iter_mut().find(|f| f.field == failure.field) {
                Some(entry) => {
                    if !entry.messages.contains(&failure.message) {
                        entry.messages.push(failure.message);
                    }
                }
                None => report.fields.push(FieldErrors {
                    field: failure.field,
                    messages: vec![failure.message],
                }),
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(field: &str, message: &str) -> ValidationFailure {
        ValidationFailure::new(field, message)
    }

    #[test]
    fn test_duplicate_messages_suppressed() {
        let report = ResultAggregator::aggregate(vec![
            failure("email", "Bad format"),
            failure("email", "Bad format"),
        ]);

        assert_eq!(report.messages_for("email"), Some(&["Bad format".to_string()][..]));
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn test_order_preserved() {
        let report = ResultAggregator::aggregate(vec![
            failure("b", "first"),
            failure("a", "x"),
            failure("b", "second"),
            failure("b", "first"),
        ]);

        let fields: Vec<_> = report.failing_fields().collect();
        assert_eq!(fields, vec!["b", "a"]);
        assert_eq!(report.joined_message("b", " "), Some("first second".to_string()));
        assert_eq!(report.joined_message("c", " "), None);
    }

    #[test]
    fn test_has_errors_flag() {
        let empty = ResultAggregator::aggregate(Vec::new());
        assert!(!empty.has_errors());
        assert!(empty.submit_allowed());

        let report = ResultAggregator::aggregate(vec![failure("a", "x")]);
        assert!(report.has_errors());
        assert!(!report.submit_allowed());
        assert!(report.is_failing("a"));
    }

    #[test]
    fn test_to_json() {
        let report = ResultAggregator::aggregate(vec![failure("race_other", "Letters only")]);
        let json = report.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"fields":[{"field":"race_other","messages":["Letters only"]}]}"#
        );
    }
}
