//! Live form validation example
//!
//! This example demonstrates:
//! - Building a FormValidator from inline YAML rules
//! - Validating a one-off snapshot
//! - Running the watch loop against a form that changes underneath it

use formgate_sdk::host::watch;
use formgate_sdk::{EvaluationMode, FieldSnapshot, FormValidatorBuilder, ValidationReport};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::watch as signal;

const RULES: &str = r#"
rules:
  - id: race_other_letters
    trigger:
      - field: race
        condition: Other
    validation:
      - field: race_other
        condition: "^[A-Za-z ]+$"
        message: Please use letters only
  - id: email_format
    validation:
      - field: email
        condition:
          pattern: "^[^@ ]+@[^@ ]+$"
        message: Enter a valid email address
"#;

fn print_report(label: &str, report: &ValidationReport) {
    println!("{}:", label);
    if !report.has_errors() {
        println!("  no errors, submit enabled");
        return;
    }
    for field in &report.fields {
        println!("  {} -> {}", field.field, field.messages.join(" "));
    }
    println!("  submit disabled");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formgate_sdk=info".into()),
        )
        .init();

    let validator = FormValidatorBuilder::new()
        .add_rule_content("demographics.yaml", RULES)
        .evaluation_mode(EvaluationMode::Selective)
        .poll_interval(Duration::from_millis(50))
        .debounce(Duration::from_millis(100))
        .build()
        .await?;

    let snapshot = FieldSnapshot::new()
        .with("race", "Other")
        .with("race_other", "R2D2")
        .with("email", "someone@example.com");
    print_report("One-off validation", &validator.validate(&snapshot));

    // A form whose values change while the watch loop is running
    let form = Arc::new(RwLock::new(FieldSnapshot::new().with("race", "White")));
    let reader = {
        let form = Arc::clone(&form);
        move |field: &str| form.read().map(|f| f.observed(field)).unwrap_or_default()
    };

    let (stop, shutdown) = signal::channel(false);
    let sink = |report: &ValidationReport| print_report("Form state", report);
    let handle = tokio::spawn(watch(Arc::new(validator), reader, sink, shutdown));

    tokio::time::sleep(Duration::from_millis(200)).await;
    if let Ok(mut values) = form.write() {
        values.insert("race", "Other");
        values.insert("race_other", "123");
    }

    tokio::time::sleep(Duration::from_millis(300)).await;
    if let Ok(mut values) = form.write() {
        values.insert("race_other", "Klingon");
        values.insert("email", "not-an-email");
    }

    tokio::time::sleep(Duration::from_millis(300)).await;
    stop.send(true)?;
    handle.await??;

    Ok(())
}
