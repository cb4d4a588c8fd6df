//! # Spreadsheet Module
//!
//! Reads the first selected worksheet of an Office Open XML workbook into a
//! [`Table`] and writes a [`Table`] back out as a single-sheet workbook.
//! Cell types are detected from the workbook's number formats so date and
//! time cells come back as dates and times rather than serial numbers.

pub(crate) mod cell;
pub mod criteria;
pub(crate) mod excel;
pub(crate) mod reference;
pub(crate) mod sheet;
pub(crate) mod writer;
pub(crate) mod xlsx;

pub use criteria::Criteria;
pub use criteria::DEFAULT_NULLS;
pub use writer::write_workbook;

use crate::error::ConsolidatorError;
use crate::helpers::reader::UnifiedReader;
use crate::spreadsheet::xlsx::XlsxSpreadsheet;
use crate::table::Table;
use thiserror::Error;
use tracing::debug;

/// Errors raised while reading a workbook
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    #[error("File '{0}' not found in workbook")]
    FileError(String),

    #[error("Workbook '{0}' has no worksheets")]
    SpreadsheetEmptyError(String),

    #[error("Workbook '{0}' is password protected")]
    SpreadsheetPasswordProtectedError(String),

    #[error("No matching worksheet in '{0}'")]
    SheetNotFound(String),

    #[error("Invalid value in '{0}' sheet '{1}' at {2}: {3}")]
    CellValueError(String, String, String, String),

    #[error("Invalid cell reference in '{0}' sheet '{1}': {2}")]
    CellReferenceError(String, String, String),
}

/// Reads one worksheet of the workbook `name` as a table.
///
/// The worksheet is the first one accepted by `criteria`; its first non-empty
/// row supplies the column names.
pub(crate) fn read_table(name: &str, reader: UnifiedReader, criteria: &Criteria) -> Result<Table, ConsolidatorError> {
    let mut spreadsheet = XlsxSpreadsheet::open(name, reader)?;
    debug!(file = %spreadsheet.name, sheets = ?spreadsheet.sheet_names(), "Opened workbook");
    let table = spreadsheet.read_table(criteria)?;
    debug!(file = %name, rows = table.height(), columns = table.width(), "Parsed worksheet");
    Ok(table)
}
