//! `hemokit_io_xlsx` v1:
//! XLSX export kernel for donation records.
//!
//! Architecture:
//! - `conf`     : constants and default presets
//! - `spec`     : cell models, options, report, errors
//! - `sanitize` : field-value sanitization pass
//! - `util`     : pure helper functions
//! - `writer`   : workbook writer kernel

pub mod conf;
pub mod sanitize;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    FILENAME_XLSX_DEFAULT, N_LEN_CELL_TEXT_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    SHEET_NAME_DEFAULT,
};
pub use sanitize::{convert_field_value, sanitize_record, truncate_cell_text};
pub use spec::{
    EnumCellValue, EnumOversizeTextRule, SpecExportError, SpecExportOptions, SpecExportReport,
    SpecSanitizedRecord, SpecSheetWritten,
};
pub use util::{derive_header_fields, validate_sheet_shape};
pub use writer::{XlsxExportWriter, export_to_tabular};
