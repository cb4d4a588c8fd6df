use crate::consolidator::ConsolidatedTable;
use crate::error::ConsolidatorError;
use crate::spreadsheet::write_workbook;

/// Worksheet name of the exported workbook.
pub const SHEET_NAME: &str = "Consolidated";

/// Suggested file name of the download.
pub const DOWNLOAD_FILE_NAME: &str = "consolidated_data.xlsx";

/// Media type of the download.
pub const MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// An exported workbook ready to hand to the user.
#[derive(Clone, Debug, PartialEq)]
pub struct Download {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Serializes the consolidated table as an xlsx workbook with a single
/// `Consolidated` sheet. The header row is the column names; no index
/// column is written.
pub fn export(table: &ConsolidatedTable) -> Result<Vec<u8>, ConsolidatorError> {
    write_workbook(SHEET_NAME, table.table())
}

/// Exports the table and attaches the fixed download metadata.
pub fn download(table: &ConsolidatedTable) -> Result<Download, ConsolidatorError> {
    Ok(Download {
        file_name: DOWNLOAD_FILE_NAME,
        mime_type: MIME_TYPE,
        bytes: export(table)?,
    })
}
