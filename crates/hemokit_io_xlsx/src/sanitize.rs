//! Field-value sanitization pass preparing rows for tabular serialization.

use chrono::SecondsFormat;
use serde_json::Value;

use hemokit_record::{EnumFieldValue, SpecRecord, derive_field_value_from_json};

use crate::conf::N_LEN_CELL_TEXT_MAX;
use crate::spec::{EnumCellValue, EnumOversizeTextRule, SpecExportReport, SpecSanitizedRecord};

/// Sanitize one record field by field.
///
/// The output keeps the source field order and key set. Oversized text is
/// truncated according to `rule_oversize_text`; `TruncateWarn` records one
/// report warning per truncated field.
pub fn sanitize_record(
    record: &SpecRecord,
    rule_oversize_text: EnumOversizeTextRule,
    report: &mut SpecExportReport,
) -> SpecSanitizedRecord {
    let mut record_sanitized = SpecSanitizedRecord::new();
    for (field_name, value) in record.iter() {
        let (cell, if_truncated) = convert_field_value(value);
        if if_truncated && rule_oversize_text == EnumOversizeTextRule::TruncateWarn {
            report.warn(format!(
                "Field {field_name:?}: text truncated to {N_LEN_CELL_TEXT_MAX} characters."
            ));
        }
        record_sanitized.insert(field_name, cell);
    }
    record_sanitized
}

/// Convert one field value into an export-safe cell value.
///
/// Returns the cell plus whether text truncation occurred.
pub fn convert_field_value(value: &EnumFieldValue) -> (EnumCellValue, bool) {
    match value {
        EnumFieldValue::Null => (EnumCellValue::Text(String::new()), false),
        EnumFieldValue::Boolean(val) => (EnumCellValue::Boolean(*val), false),
        EnumFieldValue::Number(val) => {
            if val.is_finite() {
                (EnumCellValue::Number(*val), false)
            } else {
                // Non-finite numbers have no xlsx numeric form.
                (EnumCellValue::Text(derive_nonfinite_text(*val)), false)
            }
        }
        EnumFieldValue::Text(val) => {
            let (text, if_truncated) = truncate_cell_text(val.clone());
            (EnumCellValue::Text(text), if_truncated)
        }
        EnumFieldValue::Date(_) | EnumFieldValue::Timestamp { .. } => match value.resolve_date() {
            Some(date) => (
                EnumCellValue::Text(date.to_rfc3339_opts(SecondsFormat::Millis, true)),
                false,
            ),
            None => (
                EnumCellValue::Text(format!("[{} out-of-range]", value.kind_name())),
                false,
            ),
        },
        EnumFieldValue::Composite(json) => match json {
            Value::Array(_) | Value::Object(_) => {
                let (text, if_truncated) =
                    truncate_cell_text(derive_json_text(json, value.kind_name()));
                (EnumCellValue::Text(text), if_truncated)
            }
            // Scalar JSON smuggled inside a composite: treat as its scalar form.
            _ => convert_field_value(&derive_field_value_from_json(json)),
        },
    }
}

/// Cap text at the cell limit; returns `(text, if_truncated)`.
pub fn truncate_cell_text(text: String) -> (String, bool) {
    if text.chars().count() <= N_LEN_CELL_TEXT_MAX {
        return (text, false);
    }
    (text.chars().take(N_LEN_CELL_TEXT_MAX).collect(), true)
}

/// Serialize a composite value to compact JSON text with a deterministic
/// fallback tag instead of a caught-exception side path.
fn derive_json_text(json: &Value, kind_name: &'static str) -> String {
    match serde_json::to_string(json) {
        Ok(text) => text,
        Err(_) => format!("[{kind_name} value]"),
    }
}

fn derive_nonfinite_text(x: f64) -> String {
    if x.is_nan() {
        "NaN".to_string()
    } else if x.is_sign_positive() {
        "Inf".to_string()
    } else {
        "-Inf".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn convert_cell(value: EnumFieldValue) -> EnumCellValue {
        convert_field_value(&value).0
    }

    #[test]
    fn test_null_maps_to_empty_text() {
        assert_eq!(
            convert_cell(EnumFieldValue::Null),
            EnumCellValue::Text(String::new())
        );
    }

    #[test]
    fn test_finite_numbers_and_booleans_pass_through() {
        assert_eq!(
            convert_cell(EnumFieldValue::Number(2.5)),
            EnumCellValue::Number(2.5)
        );
        assert_eq!(
            convert_cell(EnumFieldValue::Boolean(true)),
            EnumCellValue::Boolean(true)
        );
    }

    #[test]
    fn test_nonfinite_numbers_become_policy_text() {
        assert_eq!(
            convert_cell(EnumFieldValue::Number(f64::NAN)),
            EnumCellValue::Text("NaN".to_string())
        );
        assert_eq!(
            convert_cell(EnumFieldValue::Number(f64::INFINITY)),
            EnumCellValue::Text("Inf".to_string())
        );
        assert_eq!(
            convert_cell(EnumFieldValue::Number(f64::NEG_INFINITY)),
            EnumCellValue::Text("-Inf".to_string())
        );
    }

    #[test]
    fn test_timestamp_wrapper_normalizes_to_iso_text() {
        let cell = convert_cell(EnumFieldValue::Timestamp {
            seconds: 1_705_276_800,
            nanos: 0,
        });
        assert_eq!(
            cell,
            EnumCellValue::Text("2024-01-15T00:00:00.000Z".to_string())
        );
    }

    #[test]
    fn test_timestamp_wrapper_keeps_millisecond_precision() {
        let cell = convert_cell(EnumFieldValue::Timestamp {
            seconds: 1_705_276_800,
            nanos: 123_000_000,
        });
        assert_eq!(
            cell,
            EnumCellValue::Text("2024-01-15T00:00:00.123Z".to_string())
        );
    }

    #[test]
    fn test_native_date_normalizes_to_iso_text() {
        let date = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(
            convert_cell(EnumFieldValue::Date(date)),
            EnumCellValue::Text("2023-06-01T00:00:00.000Z".to_string())
        );
    }

    #[test]
    fn test_out_of_range_timestamp_gets_deterministic_tag() {
        let cell = convert_cell(EnumFieldValue::Timestamp {
            seconds: i64::MAX,
            nanos: 0,
        });
        assert_eq!(
            cell,
            EnumCellValue::Text("[timestamp out-of-range]".to_string())
        );
    }

    #[test]
    fn test_composite_object_flattens_to_json_text() {
        assert_eq!(
            convert_cell(EnumFieldValue::Composite(json!({"b": 1}))),
            EnumCellValue::Text("{\"b\":1}".to_string())
        );
    }

    #[test]
    fn test_composite_array_flattens_to_json_text() {
        assert_eq!(
            convert_cell(EnumFieldValue::Composite(json!(["a", "b"]))),
            EnumCellValue::Text("[\"a\",\"b\"]".to_string())
        );
    }

    #[test]
    fn test_composite_scalar_uses_scalar_form() {
        assert_eq!(
            convert_cell(EnumFieldValue::Composite(json!(3))),
            EnumCellValue::Number(3.0)
        );
        assert_eq!(
            convert_cell(EnumFieldValue::Composite(json!(null))),
            EnumCellValue::Text(String::new())
        );
    }

    #[test]
    fn test_text_at_limit_is_untouched() {
        let text = "a".repeat(N_LEN_CELL_TEXT_MAX);
        let (out, if_truncated) = truncate_cell_text(text.clone());
        assert_eq!(out, text);
        assert!(!if_truncated);
    }

    #[test]
    fn test_text_over_limit_keeps_first_32760_chars() {
        let text = "a".repeat(N_LEN_CELL_TEXT_MAX + 1);
        let (out, if_truncated) = truncate_cell_text(text);
        assert_eq!(out.chars().count(), N_LEN_CELL_TEXT_MAX);
        assert!(if_truncated);
    }

    #[test]
    fn test_truncate_warn_rule_records_one_warning_per_field() {
        let record = SpecRecord::new()
            .with_("notes", "a".repeat(N_LEN_CELL_TEXT_MAX + 10))
            .with_("name", "Alice");

        let mut report = SpecExportReport::default();
        sanitize_record(&record, EnumOversizeTextRule::TruncateWarn, &mut report);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("notes"));

        let mut report_silent = SpecExportReport::default();
        sanitize_record(&record, EnumOversizeTextRule::Truncate, &mut report_silent);
        assert!(report_silent.warnings.is_empty());
    }

    #[test]
    fn test_sanitizing_plain_text_record_is_idempotent() {
        let record = SpecRecord::new()
            .with_("name", "Alice")
            .with_("city", "Austin");

        let mut report = SpecExportReport::default();
        let sanitized = sanitize_record(&record, EnumOversizeTextRule::Truncate, &mut report);

        assert_eq!(
            sanitized.iter().collect::<Vec<_>>(),
            vec![
                ("name", &EnumCellValue::Text("Alice".to_string())),
                ("city", &EnumCellValue::Text("Austin".to_string())),
            ]
        );
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_sanitized_record_keeps_source_order() {
        let record = SpecRecord::new()
            .with_("b", EnumFieldValue::Null)
            .with_("a", 1_i64);

        let mut report = SpecExportReport::default();
        let sanitized = sanitize_record(&record, EnumOversizeTextRule::Truncate, &mut report);
        assert_eq!(sanitized.field_names().collect::<Vec<_>>(), vec!["b", "a"]);
    }
}
