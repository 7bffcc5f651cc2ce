//! Record and field-value specification models.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

////////////////////////////////////////////////////////////////////////////////
// #region FieldValueSpecification

/// One field value as materialized from a document snapshot.
///
/// Date-like inputs form a closed set of variants rather than a duck-typed
/// "has a `toDate` member" probe: either a resolved [`DateTime`] or the
/// provider's epoch-seconds timestamp wrapper.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumFieldValue {
    /// Missing/null field.
    Null,
    /// Boolean field.
    Boolean(bool),
    /// Numeric field.
    Number(f64),
    /// Text field.
    Text(String),
    /// Resolved date value.
    Date(DateTime<Utc>),
    /// Provider timestamp wrapper.
    Timestamp {
        /// Seconds since the Unix epoch.
        seconds: i64,
        /// Nanosecond fraction within the second.
        nanos: u32,
    },
    /// Nested mapping or sequence kept as raw JSON.
    Composite(Value),
}

impl EnumFieldValue {
    /// Resolve a date-like variant to a concrete UTC date value.
    ///
    /// Returns `None` for non-date variants and for wrappers outside the
    /// representable date range.
    pub fn resolve_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(value) => Some(*value),
            Self::Timestamp { seconds, nanos } => Utc.timestamp_opt(*seconds, *nanos).single(),
            _ => None,
        }
    }

    /// Short lowercase tag used in diagnostics and fallback text.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::Date(_) => "date",
            Self::Timestamp { .. } => "timestamp",
            Self::Composite(value) => match value {
                Value::Array(_) => "array",
                Value::Object(_) => "object",
                _ => "json",
            },
        }
    }
}

impl From<bool> for EnumFieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for EnumFieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for EnumFieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for EnumFieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for EnumFieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DateTime<Utc>> for EnumFieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl From<Value> for EnumFieldValue {
    fn from(value: Value) -> Self {
        Self::Composite(value)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RecordSpecification

/// Ordered field-name to value mapping representing one exportable row.
///
/// Field order is insertion order. Re-inserting an existing name overwrites
/// the value in place and keeps the original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecRecord {
    fields: Vec<(String, EnumFieldValue)>,
}

impl SpecRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite one field.
    pub fn insert(&mut self, field_name: impl Into<String>, value: impl Into<EnumFieldValue>) {
        let field_name = field_name.into();
        let value = value.into();
        match self
            .fields
            .iter_mut()
            .find(|(name_existing, _)| *name_existing == field_name)
        {
            Some((_, value_existing)) => *value_existing = value,
            None => self.fields.push((field_name, value)),
        }
    }

    /// Builder-style insert.
    pub fn with_(mut self, field_name: impl Into<String>, value: impl Into<EnumFieldValue>) -> Self {
        self.insert(field_name, value);
        self
    }

    /// Look up one field by name.
    pub fn get(&self, field_name: &str) -> Option<&EnumFieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field_name)
            .map(|(_, value)| value)
    }

    /// Iterate field names in insertion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Iterate `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EnumFieldValue)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_keeps_insertion_order() {
        let record = SpecRecord::new()
            .with_("name", "Alice")
            .with_("blood_type", "O-")
            .with_("city", "Austin");

        assert_eq!(
            record.field_names().collect::<Vec<_>>(),
            vec!["name", "blood_type", "city"]
        );
    }

    #[test]
    fn test_record_overwrite_keeps_position() {
        let mut record = SpecRecord::new();
        record.insert("name", "Alice");
        record.insert("city", "Austin");
        record.insert("name", "Bob");

        assert_eq!(
            record.field_names().collect::<Vec<_>>(),
            vec!["name", "city"]
        );
        assert_eq!(
            record.get("name"),
            Some(&EnumFieldValue::Text("Bob".to_string()))
        );
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_resolve_date_from_timestamp_wrapper() {
        let value = EnumFieldValue::Timestamp {
            seconds: 1_705_276_800,
            nanos: 0,
        };
        let date = value.resolve_date().unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_resolve_date_rejects_out_of_range_wrapper() {
        let value = EnumFieldValue::Timestamp {
            seconds: i64::MAX,
            nanos: 0,
        };
        assert_eq!(value.resolve_date(), None);
    }

    #[test]
    fn test_resolve_date_is_none_for_plain_values() {
        assert_eq!(EnumFieldValue::Text("2024".to_string()).resolve_date(), None);
        assert_eq!(EnumFieldValue::Null.resolve_date(), None);
    }

    #[test]
    fn test_kind_name_distinguishes_composite_shapes() {
        assert_eq!(EnumFieldValue::Composite(json!([1, 2])).kind_name(), "array");
        assert_eq!(
            EnumFieldValue::Composite(json!({"a": 1})).kind_name(),
            "object"
        );
        assert_eq!(EnumFieldValue::Composite(json!(3)).kind_name(), "json");
        assert_eq!(
            EnumFieldValue::Timestamp {
                seconds: 0,
                nanos: 0
            }
            .kind_name(),
            "timestamp"
        );
    }

    #[test]
    fn test_from_impls_cover_scalar_types() {
        assert_eq!(EnumFieldValue::from(true), EnumFieldValue::Boolean(true));
        assert_eq!(EnumFieldValue::from(3_i64), EnumFieldValue::Number(3.0));
        assert_eq!(
            EnumFieldValue::from("x"),
            EnumFieldValue::Text("x".to_string())
        );
    }
}
