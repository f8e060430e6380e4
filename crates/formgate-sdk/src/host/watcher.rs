//! Polling change detection

use crate::form_validator::FormValidator;
use formgate_runtime::FieldValueReader;
use std::collections::HashMap;

/// Remembers the last observed value of each watched field
///
/// Polling catches changes made programmatically as well as user edits.
#[derive(Debug, Clone, Default)]
pub struct FieldWatcher {
    fields: Vec<String>,
    last_known: HashMap<String, String>,
}

impl FieldWatcher {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut watcher = Self::default();
        for field in fields {
            let field = field.into();
            if !watcher.fields.contains(&field) {
                watcher.fields.push(field);
            }
        }
        watcher
    }

    /// Watch every field the validator's rules read
    pub fn for_validator(validator: &FormValidator) -> Self {
        Self::new(validator.participating_fields().iter().cloned())
    }

    /// Record current values without reporting anything
    pub fn prime<R>(&mut self, reader: &R)
    where
        R: FieldValueReader + ?Sized,
    {
        for field in &self.fields {
            self.last_known.insert(field.clone(), reader.get_field_value(field));
        }
    }

    /// Fields whose value differs from the last poll, in watch order
    pub fn poll<R>(&mut self, reader: &R) -> Vec<String>
    where
        R: FieldValueReader + ?Sized,
    {
        let mut changed = Vec::new();

        for field in &self.fields {
            let current = reader.get_field_value(field);
            if self.last_known.get(field) != Some(&current) {
                self.last_known.insert(field.clone(), current);
                changed.push(field.clone());
            }
        }

        if !changed.is_empty() {
            tracing::debug!(fields = ?changed, "Field changes detected");
        }
        changed
    }

    /// Re-read a single field; returns whether its value changed
    pub fn observe<R>(&mut self, field: &str, reader: &R) -> bool
    where
        R: FieldValueReader + ?Sized,
    {
        if !self.fields.iter().any(|f| f == field) {
            return false;
        }

        let current = reader.get_field_value(field);
        match self.last_known.get(field) {
            Some(previous) if *previous == current => false,
            _ => {
                self.last_known.insert(field.to_string(), current);
                true
            }
        }
    }

    pub fn last_value(&self, field: &str) -> Option<&str> {
        self.last_known.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formgate_core::FieldSnapshot;

    #[test]
    fn test_poll_reports_changes_once() {
        let mut watcher = FieldWatcher::new(["race", "email"]);
        let mut snapshot = FieldSnapshot::new().with("race", "White");
        watcher.prime(&snapshot);

        assert!(watcher.poll(&snapshot).is_empty());

        snapshot.insert("race", "Other");
        snapshot.insert("comments", "ignored");
        assert_eq!(watcher.poll(&snapshot), vec!["race".to_string()]);
        assert!(watcher.poll(&snapshot).is_empty());
        assert_eq!(watcher.last_value("race"), Some("Other"));
    }

    #[test]
    fn test_unprimed_poll_reports_everything() {
        let mut watcher = FieldWatcher::new(["a", "b", "a"]);
        assert_eq!(watcher.fields(), &["a", "b"]);

        let snapshot = FieldSnapshot::new();
        assert_eq!(watcher.poll(&snapshot), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_observe_single_field() {
        let mut watcher = FieldWatcher::new(["email"]);
        let mut snapshot = FieldSnapshot::new().with("email", "a");
        watcher.prime(&snapshot);

        assert!(!watcher.observe("email", &snapshot));
        snapshot.insert("email", "a@b");
        assert!(watcher.observe("email", &snapshot));
        assert!(watcher.poll(&snapshot).is_empty());
        assert!(!watcher.observe("unwatched", &snapshot));
    }
}
