//! Raw inputs accepted by the parser.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One raw test as supplied by the extractor or a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTestInput {
    /// Free-form line such as `"Hemoglobin 9.5 g/dL (low)"`.
    Text(String),
    /// Pre-structured record.
    Record(StructuredRecord),
}

impl RawTestInput {
    /// Convert an arbitrary JSON value.
    ///
    /// Strings become [`RawTestInput::Text`]; objects with a `name` and a
    /// defined `value` become [`RawTestInput::Record`]. Anything else is
    /// `None` and is meant to be skipped silently.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(RawTestInput::Text(s.clone())),
            Value::Object(_) => serde_json::from_value::<StructuredRecord>(value.clone())
                .ok()
                .map(RawTestInput::Record),
            _ => None,
        }
    }

    /// Convert every element of a JSON array, dropping unusable ones.
    pub fn from_json_array(values: &[Value]) -> Vec<Self> {
        values.iter().filter_map(Self::from_json).collect()
    }
}

impl From<&str> for RawTestInput {
    fn from(s: &str) -> Self {
        RawTestInput::Text(s.to_string())
    }
}

impl From<String> for RawTestInput {
    fn from(s: String) -> Self {
        RawTestInput::Text(s)
    }
}

impl From<StructuredRecord> for RawTestInput {
    fn from(record: StructuredRecord) -> Self {
        RawTestInput::Record(record)
    }
}

/// A loosely-structured test record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredRecord {
    pub name: String,
    pub value: RecordValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl StructuredRecord {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: RecordValue::Number(value),
            unit: None,
            status: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Record values arrive either as JSON numbers or as numeric strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordValue {
    Number(f64),
    Text(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_string_and_record() {
        let text = RawTestInput::from_json(&json!("WBC 12000 /uL (high)"));
        assert_eq!(text, Some(RawTestInput::Text("WBC 12000 /uL (high)".to_string())));

        let record = RawTestInput::from_json(&json!({"name": "Glucose", "value": 110}));
        match record {
            Some(RawTestInput::Record(r)) => {
                assert_eq!(r.name, "Glucose");
                assert_eq!(r.value, RecordValue::Number(110.0));
                assert!(r.unit.is_none());
            }
            other => panic!("expected record, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_drops_unusable_values() {
        assert!(RawTestInput::from_json(&json!(42)).is_none());
        assert!(RawTestInput::from_json(&json!(null)).is_none());
        assert!(RawTestInput::from_json(&json!({"name": "Glucose"})).is_none());
        assert!(RawTestInput::from_json(&json!({"value": 3})).is_none());

        let inputs = RawTestInput::from_json_array(&[
            json!("Hemoglobin 9.5 g/dL"),
            json!(false),
            json!({"name": "RBC", "value": "4.2"}),
        ]);
        assert_eq!(inputs.len(), 2);
    }
}
