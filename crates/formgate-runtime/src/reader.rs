//! Field value access
//!
//! The engine reads field values through [`FieldValueReader`]. Whoever owns
//! the form supplies it; multi-valued controls must already be joined with
//! commas.

use formgate_core::FieldSnapshot;
use std::collections::HashMap;

/// Reads the current observed value of a field
pub trait FieldValueReader {
    /// Current value of `field`; a field that does not exist reads as `""`
    fn get_field_value(&self, field: &str) -> String;
}

impl FieldValueReader for FieldSnapshot {
    fn get_field_value(&self, field: &str) -> String {
        self.observed(field)
    }
}

impl FieldValueReader for HashMap<String, String> {
    fn get_field_value(&self, field: &str) -> String {
        self.get(field).cloned().unwrap_or_default()
    }
}

impl<F> FieldValueReader for F
where
    F: Fn(&str) -> String,
{
    fn get_field_value(&self, field: &str) -> String {
        self(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read<R: FieldValueReader + ?Sized>(reader: &R, field: &str) -> String {
        reader.get_field_value(field)
    }

    #[test]
    fn test_snapshot_reader() {
        let snapshot = FieldSnapshot::new().with("race", vec!["White", "Asian"]);
        assert_eq!(read(&snapshot, "race"), "White,Asian");
        assert_eq!(read(&snapshot, "missing"), "");
    }

    #[test]
    fn test_hashmap_reader() {
        let mut map = HashMap::new();
        map.insert("a".to_string(), "1".to_string());
        assert_eq!(read(&map, "a"), "1");
        assert_eq!(read(&map, "b"), "");
    }

    #[test]
    fn test_closure_reader() {
        let reader = |field: &str| format!("value-of-{}", field);
        assert_eq!(read(&reader, "x"), "value-of-x");
    }
}
