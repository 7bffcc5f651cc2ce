//! Stateless helpers for header derivation and sheet-shape validation.

use std::collections::BTreeSet;

use crate::conf::{N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX};
use crate::spec::{SpecExportError, SpecSanitizedRecord};

/// Derive the header field list as the first-seen union across rows.
pub fn derive_header_fields(rows: &[SpecSanitizedRecord]) -> Vec<String> {
    let mut set_fields_seen = BTreeSet::new();
    let mut l_fields_header = Vec::new();
    for row in rows {
        for field_name in row.field_names() {
            if set_fields_seen.insert(field_name.to_string()) {
                l_fields_header.push(field_name.to_string());
            }
        }
    }
    l_fields_header
}

/// Validate body/header shape against Excel sheet limits.
pub fn validate_sheet_shape(n_rows_body: usize, n_cols: usize) -> Result<(), SpecExportError> {
    if n_rows_body + 1 > N_NROWS_EXCEL_MAX {
        return Err(SpecExportError::RowOverflow(n_rows_body));
    }
    if n_cols > N_NCOLS_EXCEL_MAX {
        return Err(SpecExportError::ColumnOverflow(n_cols));
    }
    Ok(())
}
