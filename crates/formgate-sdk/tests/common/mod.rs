//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use formgate_sdk::{
    EvaluationMode, FieldSnapshot, FormValidator, FormValidatorBuilder, ValidationReport,
};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

/// The demographics form used across the SDK tests
pub const DEMOGRAPHICS_RULES: &str = r#"
rules:
  - id: race_other_letters
    trigger:
      - field: race
        condition: Other
    validation:
      - field: race_other
        condition: "^[A-Za-z ]+$"
        message: Letters only
  - id: email_format
    validation:
      - field: email
        condition:
          pattern: "@"
        message: Bad format
  - id: email_duplicate
    validation:
      - field: email
        condition:
          pattern: "@"
        message: Bad format
  - id: language_other
    trigger:
      - field: language
        condition: Other
    validation:
      - field: language_other
        condition: ".+"
"#;

/// Test helper to create a FormValidator from inline YAML definitions
pub struct TestForm {
    contents: Vec<String>,
    mode: EvaluationMode,
    poll: Duration,
    debounce: Duration,
}

impl TestForm {
    pub fn new() -> Self {
        Self {
            contents: Vec::new(),
            mode: EvaluationMode::FullSweep,
            poll: Duration::from_millis(20),
            debounce: Duration::from_millis(100),
        }
    }

    /// Load a rules document from YAML string
    pub fn with_rules(mut self, yaml: &str) -> Self {
        self.contents.push(yaml.trim().to_string());
        self
    }

    pub fn poll_every(mut self, interval: Duration) -> Self {
        self.poll = interval;
        self
    }

    pub fn selective(mut self) -> Self {
        self.mode = EvaluationMode::Selective;
        self
    }

    pub async fn build(self) -> FormValidator {
        let mut builder = FormValidatorBuilder::new()
            .evaluation_mode(self.mode)
            .poll_interval(self.poll)
            .debounce(self.debounce);

        for (i, content) in self.contents.into_iter().enumerate() {
            builder = builder.add_rule_content(format!("test_{}.yaml", i), content);
        }

        builder.build().await.expect("Failed to build form validator")
    }
}

/// Form values shared between a test and a running watch loop
#[derive(Clone, Default)]
pub struct SharedForm {
    values: Arc<RwLock<FieldSnapshot>>,
}

impl SharedForm {
    pub fn new(snapshot: FieldSnapshot) -> Self {
        Self {
            values: Arc::new(RwLock::new(snapshot)),
        }
    }

    pub fn set(&self, field: &str, value: &str) {
        self.values.write().unwrap().insert(field, value);
    }

    /// A reader closure suitable for the watch loop
    pub fn reader(&self) -> impl Fn(&str) -> String + Send + Sync + 'static {
        let values = Arc::clone(&self.values);
        move |field: &str| values.read().unwrap().observed(field)
    }
}

/// Collects every rendered report
#[derive(Clone, Default)]
pub struct RenderLog {
    reports: Arc<Mutex<Vec<ValidationReport>>>,
}

impl RenderLog {
    pub fn sink(&self) -> impl FnMut(&ValidationReport) + Send + 'static {
        let reports = Arc::clone(&self.reports);
        move |report: &ValidationReport| reports.lock().unwrap().push(report.clone())
    }

    pub fn count(&self) -> usize {
        self.reports.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<ValidationReport> {
        self.reports.lock().unwrap().last().cloned()
    }
}

/// Assertion helpers for ValidationReport
pub trait ReportAssertions {
    fn assert_clean(&self);
    fn assert_failing(&self, field: &str, message: &str);
    fn assert_not_failing(&self, field: &str);
}

impl ReportAssertions for ValidationReport {
    fn assert_clean(&self) {
        assert!(!self.has_errors(), "Expected no errors, got {:?}", self.fields);
        assert!(self.submit_allowed());
    }

    fn assert_failing(&self, field: &str, message: &str) {
        let messages = self
            .messages_for(field)
            .unwrap_or_else(|| panic!("Expected {} to fail, report: {:?}", field, self.fields));
        assert!(
            messages.iter().any(|m| m == message),
            "Expected message {:?} on {}, got {:?}",
            message,
            field,
            messages
        );
        assert!(!self.submit_allowed());
    }

    fn assert_not_failing(&self, field: &str) {
        assert!(
            !self.is_failing(field),
            "Expected {} to pass, got {:?}",
            field,
            self.messages_for(field)
        );
    }
}
