//! Health record input type

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AssessmentError;

/// A single individual's vital-sign record.
///
/// Modeled as a JSON object rather than a fixed struct: callers may attach
/// extra keys, which are tolerated, echoed back in the result, and listed in
/// the result metadata, but never used for inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HealthRecord(pub Map<String, Value>);

impl HealthRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Set a numeric field, replacing any previous value.
    pub fn set_number(&mut self, key: &str, value: f64) -> &mut Self {
        self.0.insert(
            key.to_string(),
            Value::Number(serde_json::Number::from_f64(value).unwrap_or_else(|| 0.into())),
        );
        self
    }

    /// Set a string field, replacing any previous value.
    pub fn set_string(&mut self, key: &str, value: &str) -> &mut Self {
        self.0.insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    /// Whether the record contains the given key.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Read a field as `f64`.
    ///
    /// Absence is a validation failure; a present but non-numeric value is
    /// reported as an invalid field.
    pub fn number(&self, key: &'static str) -> Result<f64, AssessmentError> {
        let value = self.0.get(key).ok_or(AssessmentError::MissingField(key))?;
        value.as_f64().ok_or_else(|| AssessmentError::InvalidField {
            field: key.to_string(),
            reason: format!("expected a number, got {value}"),
        })
    }

    /// Read a field as a string slice.
    pub fn string(&self, key: &'static str) -> Result<&str, AssessmentError> {
        let value = self.0.get(key).ok_or(AssessmentError::MissingField(key))?;
        value.as_str().ok_or_else(|| AssessmentError::InvalidField {
            field: key.to_string(),
            reason: format!("expected a string, got {value}"),
        })
    }

    /// All keys present in the record, in input order.
    ///
    /// Used for the result metadata's `features_used` list, which mirrors
    /// the record rather than the actual feature vector.
    pub fn keys(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }
}

impl Default for HealthRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Map<String, Value>> for HealthRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_access() {
        let mut record = HealthRecord::new();
        record.set_number("bmi", 27.5);

        assert_eq!(record.number("bmi").unwrap(), 27.5);
        assert_eq!(
            record.number("age"),
            Err(AssessmentError::MissingField("age"))
        );
    }

    #[test]
    fn test_non_numeric_value_is_invalid_not_missing() {
        let mut record = HealthRecord::new();
        record.set_string("age", "forty");

        match record.number("age") {
            Err(AssessmentError::InvalidField { field, .. }) => assert_eq!(field, "age"),
            other => panic!("expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn test_keys_preserve_input_order() {
        let mut record = HealthRecord::new();
        record.set_number("age", 45.0);
        record.set_string("gender", "male");
        record.set_number("bmi", 24.0);

        assert_eq!(record.keys(), vec!["age", "gender", "bmi"]);
    }
}
