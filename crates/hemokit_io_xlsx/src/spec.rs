//! Shared export specification models and error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::conf::SHEET_NAME_DEFAULT;

////////////////////////////////////////////////////////////////////////////////
// #region CellSpecification

/// Export-safe cell value produced by the sanitization pass.
///
/// Invariant: `Text` never exceeds [`crate::conf::N_LEN_CELL_TEXT_MAX`]
/// characters; no variant carries a composite or missing value.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Text value (includes empty-string null substitution and ISO dates).
    Text(String),
    /// Finite numeric value written with the workbook's own cell typing.
    Number(f64),
    /// Boolean value written with the workbook's own cell typing.
    Boolean(bool),
}

/// One sanitized row; same field names and order as its source record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecSanitizedRecord {
    fields: Vec<(String, EnumCellValue)>,
}

impl SpecSanitizedRecord {
    /// Create an empty sanitized row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sanitized field.
    pub fn insert(&mut self, field_name: impl Into<String>, cell: EnumCellValue) {
        self.fields.push((field_name.into(), cell));
    }

    /// Look up one cell by field name.
    pub fn get(&self, field_name: &str) -> Option<&EnumCellValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field_name)
            .map(|(_, cell)| cell)
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Iterate `(name, cell)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EnumCellValue)> {
        self.fields.iter().map(|(name, cell)| (name.as_str(), cell))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ExportOptions

/// Oversized-text handling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumOversizeTextRule {
    /// Truncate silently (reference behavior).
    #[default]
    Truncate,
    /// Truncate and record one report warning per truncated field.
    TruncateWarn,
}

/// Options for one export call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecExportOptions {
    /// Name of the single produced sheet.
    pub sheet_name: String,
    /// Oversized-text handling.
    pub rule_oversize_text: EnumOversizeTextRule,
}

impl Default for SpecExportOptions {
    fn default() -> Self {
        Self {
            sheet_name: SHEET_NAME_DEFAULT.to_string(),
            rule_oversize_text: EnumOversizeTextRule::default(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Summary of one written sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetWritten {
    /// Sheet name in the workbook.
    pub sheet_name: String,
    /// Body row count (header excluded).
    pub n_rows_body: usize,
    /// Column count.
    pub n_cols: usize,
}

/// Per-export call report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecExportReport {
    /// Output path, set once the workbook is saved.
    pub path_file_out: Option<PathBuf>,
    /// Sheets written by this call.
    pub sheets: Vec<SpecSheetWritten>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecExportReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Export failures surfaced to the caller.
#[derive(Debug, Error)]
pub enum SpecExportError {
    /// Workbook assembly or save failed.
    #[error("xlsx write error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
    /// Body rows plus header exceed the Excel sheet row limit.
    #[error("row count {0} exceeds Excel sheet limit")]
    RowOverflow(usize),
    /// Header width exceeds the Excel sheet column limit.
    #[error("column count {0} exceeds Excel sheet limit")]
    ColumnOverflow(usize),
    /// Cell coordinates no longer fit xlsx index types.
    #[error("cell index overflow: {0}")]
    CellIndexOverflow(usize),
    /// Writer reused after `close()`.
    #[error("cannot write after close()")]
    WriterClosed,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
