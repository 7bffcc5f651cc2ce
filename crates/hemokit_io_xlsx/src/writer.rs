//! XLSX writer kernel and the top-level tabular export operation.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use tracing::{debug, warn};

use hemokit_record::SpecRecord;

use crate::conf::FILENAME_XLSX_DEFAULT;
use crate::sanitize::sanitize_record;
use crate::spec::{
    EnumCellValue, SpecExportError, SpecExportOptions, SpecExportReport, SpecSanitizedRecord,
    SpecSheetWritten,
};
use crate::util::{derive_header_fields, validate_sheet_shape};

/// Stateful single-workbook writer.
///
/// The workbook is buffered in memory until [`Self::close`] is called.
pub struct XlsxExportWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    if_closed: bool,
}

impl XlsxExportWriter {
    /// Create writer bound to an output path.
    pub fn new(path_file_out: PathBuf) -> Self {
        Self {
            path_file_out,
            workbook: Workbook::new(),
            if_closed: false,
        }
    }

    /// Return output file path as string.
    pub fn file_out(&self) -> String {
        self.path_file_out.to_string_lossy().to_string()
    }

    /// Write one sheet with `header` as first row and `rows` as body.
    ///
    /// Fields absent from an individual row leave that row's cell blank.
    pub fn write_sheet(
        &mut self,
        sheet_name: &str,
        header: &[String],
        rows: &[SpecSanitizedRecord],
        report: &mut SpecExportReport,
    ) -> Result<(), SpecExportError> {
        if self.if_closed {
            return Err(SpecExportError::WriterClosed);
        }
        validate_sheet_shape(rows.len(), header.len())?;

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(sheet_name)?;

        for (n_idx_col, field_name) in header.iter().enumerate() {
            worksheet.write_string(0, cast_col_num(n_idx_col)?, field_name)?;
        }

        for (n_idx_row, row) in rows.iter().enumerate() {
            let n_row_sheet = cast_row_num(n_idx_row + 1)?;
            for (n_idx_col, field_name) in header.iter().enumerate() {
                let Some(cell) = row.get(field_name) else {
                    continue;
                };
                let n_col_sheet = cast_col_num(n_idx_col)?;
                match cell {
                    EnumCellValue::Text(val) => {
                        worksheet.write_string(n_row_sheet, n_col_sheet, val)?;
                    }
                    EnumCellValue::Number(val) => {
                        worksheet.write_number(n_row_sheet, n_col_sheet, *val)?;
                    }
                    EnumCellValue::Boolean(val) => {
                        worksheet.write_boolean(n_row_sheet, n_col_sheet, *val)?;
                    }
                }
            }
        }

        report.sheets.push(SpecSheetWritten {
            sheet_name: sheet_name.to_string(),
            n_rows_body: rows.len(),
            n_cols: header.len(),
        });
        Ok(())
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> Result<(), SpecExportError> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook.save(&self.path_file_out)?;
        self.if_closed = true;
        Ok(())
    }
}

/// Export records to a single-sheet workbook on disk.
///
/// Missing or empty `rows` is a logged no-op: no file is produced and the
/// returned report carries one warning. `path_file_out` defaults to
/// [`FILENAME_XLSX_DEFAULT`] in the current directory.
pub fn export_to_tabular(
    rows: Option<&[SpecRecord]>,
    path_file_out: Option<&Path>,
    options: &SpecExportOptions,
) -> Result<SpecExportReport, SpecExportError> {
    let mut report = SpecExportReport::default();

    let Some(rows) = rows.filter(|l_rows| !l_rows.is_empty()) else {
        warn!("xlsx export skipped: row collection is missing or empty");
        report.warn("Export skipped: row collection is missing or empty.");
        return Ok(report);
    };

    let l_rows_sanitized: Vec<SpecSanitizedRecord> = rows
        .iter()
        .map(|record| sanitize_record(record, options.rule_oversize_text, &mut report))
        .collect();
    let l_fields_header = derive_header_fields(&l_rows_sanitized);

    let path_file_out = path_file_out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(FILENAME_XLSX_DEFAULT));

    let mut writer = XlsxExportWriter::new(path_file_out.clone());
    writer.write_sheet(
        &options.sheet_name,
        &l_fields_header,
        &l_rows_sanitized,
        &mut report,
    )?;
    writer.close()?;

    debug!(
        path = %path_file_out.display(),
        n_rows = l_rows_sanitized.len(),
        n_cols = l_fields_header.len(),
        "xlsx export complete"
    );
    report.path_file_out = Some(path_file_out);
    Ok(report)
}

fn cast_row_num(value: usize) -> Result<u32, SpecExportError> {
    u32::try_from(value).map_err(|_| SpecExportError::CellIndexOverflow(value))
}

fn cast_col_num(value: usize) -> Result<u16, SpecExportError> {
    u16::try_from(value).map_err(|_| SpecExportError::CellIndexOverflow(value))
}
