use crate::consolidator::label::extract_label;
use crate::consolidator::schema::FILE_NAME_COLUMN;
use crate::consolidator::schema::HEADER_COLUMN_COUNT;
use crate::consolidator::SourceFile;
use crate::table::Table;
use crate::table::Value;
use tracing::debug;
use tracing::warn;

/// Prepares one source file for consolidation.
///
/// Returns `None` for a sheet without rows. Otherwise the leading header
/// columns are filled down and every row is stamped with the file's label in
/// the `File name` column. The source sheet is left untouched.
pub fn prepare(file: &SourceFile) -> Option<Table> {
    if file.sheet.is_empty() {
        warn!(file = %file.name, "Skipping file without data rows");
        return None;
    }

    let mut table = file.sheet.clone();
    let header_columns = HEADER_COLUMN_COUNT.min(table.width());
    for position in 0..header_columns {
        if let Some(column) = table.column_at_mut(position) {
            column.forward_fill();
        }
    }

    let label = extract_label(&file.name);
    debug!(file = %file.name, %label, rows = table.height(), header_columns, "Prepared file");
    table.set_constant(FILE_NAME_COLUMN, Value::Text(label));
    Some(table)
}
