//! Stateless helpers for materializing records from raw JSON documents.

use serde_json::{Map, Value};

use crate::spec::{EnumFieldValue, SpecRecord};

/// Convert one JSON document object into an ordered record.
///
/// Scalar JSON values map to scalar field variants; arrays and objects stay
/// composite. Provider timestamps arrive as typed values upstream and are
/// not re-detected here.
pub fn derive_record_from_json_object(document: &Map<String, Value>) -> SpecRecord {
    let mut record = SpecRecord::new();
    for (field_name, value) in document {
        record.insert(field_name.as_str(), derive_field_value_from_json(value));
    }
    record
}

/// Convert one JSON value into its field-value variant.
pub fn derive_field_value_from_json(value: &Value) -> EnumFieldValue {
    match value {
        Value::Null => EnumFieldValue::Null,
        Value::Bool(val) => EnumFieldValue::Boolean(*val),
        Value::Number(val) => match val.as_f64() {
            Some(num) => EnumFieldValue::Number(num),
            // u64 above f64 precision keeps its decimal text form.
            None => EnumFieldValue::Text(val.to_string()),
        },
        Value::String(val) => EnumFieldValue::Text(val.clone()),
        Value::Array(_) | Value::Object(_) => EnumFieldValue::Composite(value.clone()),
    }
}
