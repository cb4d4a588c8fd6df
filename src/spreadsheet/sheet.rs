use crate::error::ConsolidatorError;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::criteria::Criteria;
use crate::spreadsheet::SpreadsheetError;
use crate::table::Table;
use crate::table::Value;
use std::collections::BTreeMap;
use std::collections::HashMap;

/// Represents a worksheet read from a workbook, before it is shaped into a table.
pub(crate) struct Sheet {
    /// Source file name
    pub(crate) file_name: String,
    /// Sheet name
    pub(crate) name: String,
    /// All non-empty cells in the sheet
    pub(crate) cells: Vec<Cell>,
    /// Actual data range (determined from cell data)
    pub(crate) row_lower_bound: Option<usize>,
    pub(crate) row_upper_bound: Option<usize>,
    pub(crate) col_upper_bound: Option<usize>,
}

impl Sheet {
    pub(super) fn new(file_name: &str, name: &str) -> Self {
        Self {
            file_name: file_name.to_owned(),
            name: name.to_owned(),
            cells: Vec::new(),
            row_lower_bound: None,
            row_upper_bound: None,
            col_upper_bound: None,
        }
    }

    /// Returns true if the sheet contains no cells.
    pub(crate) fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Adds a cell to the sheet, updating the data range.
    pub(super) fn push(&mut self, cell: Cell) {
        self.update_bound(cell.row, cell.col);
        self.cells.push(cell);
    }

    fn update_bound(&mut self, row: usize, col: usize) {
        if self.row_lower_bound.map(|row_lower_bound| row < row_lower_bound).unwrap_or(true) {
            self.row_lower_bound = Some(row);
        }
        if self.row_upper_bound.map(|row_upper_bound| row_upper_bound < row).unwrap_or(true) {
            self.row_upper_bound = Some(row);
        }
        if self.col_upper_bound.map(|col_upper_bound| col_upper_bound < col).unwrap_or(true) {
            self.col_upper_bound = Some(col);
        }
    }

    /// Shapes the sheet into a table.
    ///
    /// The first non-empty row is the header; columns span from column `A` to
    /// the right-most used column. Empty header cells are named `Unnamed: {index}`
    /// and repeated names get a `.1`, `.2`, ... suffix. Text cells matching a
    /// null literal become null in the data rows.
    pub(crate) fn into_table(self, shared_strings: &[String], criteria: &Criteria) -> Result<Table, ConsolidatorError> {
        if self.is_empty() {
            return Ok(Table::new());
        }
        let width = self.col_upper_bound.map_or(0, |col_upper_bound| col_upper_bound + 1);

        let mut rows = BTreeMap::<usize, Vec<Option<Value>>>::new();
        for cell in &self.cells {
            let value = cell.to_value(shared_strings).map_err(|message| {
                SpreadsheetError::CellValueError(
                    self.file_name.to_owned(),
                    self.name.to_owned(),
                    cell.reference(),
                    message,
                )
            })?;
            rows.entry(cell.row).or_insert_with(|| vec![None; width])[cell.col] = value;
        }

        let mut rows = rows.into_iter();
        let (header_row, header) = match rows.next() {
            Some(first) => first,
            None => return Ok(Table::new()),
        };
        let names = header_names(header);

        let mut records = Vec::<Vec<Option<Value>>>::new();
        let mut last_row = header_row;
        for (row, cells) in rows {
            if !criteria.skip_empty_rows {
                for _ in (last_row + 1)..row {
                    records.push(vec![None; width]);
                }
            }
            records.push(
                cells
                    .into_iter()
                    .map(|cell| cell.filter(|value| !value.as_text().is_some_and(|text| criteria.is_null(text))))
                    .collect(),
            );
            last_row = row;
        }

        Ok(Table::from_rows(names, records)?)
    }
}

/// Column names from the header row cells. Blank header text counts as missing.
fn header_names(header: Vec<Option<Value>>) -> Vec<String> {
    let mut counts = HashMap::<String, usize>::new();
    header
        .into_iter()
        .enumerate()
        .map(|(index, cell)| {
            let mut name = cell
                .filter(|value| !value.as_text().is_some_and(|text| text.trim().is_empty()))
                .map(|value| value.to_string())
                .unwrap_or_else(|| format!("Unnamed: {}", index));
            let mut count = counts.get(&name).copied().unwrap_or(0);
            while count > 0 {
                counts.insert(name.to_owned(), count + 1);
                name = format!("{}.{}", name, count);
                count = counts.get(&name).copied().unwrap_or(0);
            }
            counts.insert(name.to_owned(), count + 1);
            name
        })
        .collect()
}
