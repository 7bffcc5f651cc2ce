//! XLSX export constants and default option factories.

use crate::spec::SpecExportOptions;

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Maximum character count kept in one exported cell.
pub const N_LEN_CELL_TEXT_MAX: usize = 32_760;
/// Sheet name used for single-sheet exports.
pub const SHEET_NAME_DEFAULT: &str = "Sheet1";
/// Output filename used when the caller omits one.
pub const FILENAME_XLSX_DEFAULT: &str = "data.xlsx";

/// Build default export options.
pub fn derive_default_export_options() -> SpecExportOptions {
    SpecExportOptions::default()
}
