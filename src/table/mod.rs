//! # Column Table
//!
//! An in-memory table of named, ordered columns. Column order is carried by the
//! column vector; lookups go through a name → position map so that projections
//! and unions never depend on hash iteration order.

pub mod column;
pub mod value;

pub use column::Column;
pub use value::Value;

use std::collections::HashMap;
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised while assembling a table.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Duplicate column name '{0}'")]
    DuplicateColumn(String),

    #[error("Column '{name}' has {actual} rows, expected {expected}")]
    ColumnLengthMismatch { name: String, expected: usize, actual: usize },

    #[error("Row {row} has {actual} cells, expected {expected}")]
    RowWidthMismatch { row: usize, expected: usize, actual: usize },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    index: HashMap<String, usize>,
    height: usize,
}

impl Table {
    /// An empty table with no columns and no rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from equally long, uniquely named columns.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, TableError> {
        let mut table = Table::new();
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// Builds a table from a header and row-major cells.
    pub fn from_rows<S>(names: Vec<S>, rows: Vec<Vec<Option<Value>>>) -> Result<Self, TableError>
    where
        S: Into<String>,
    {
        let width = names.len();
        let mut columns: Vec<Column> = names
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(rows.len())))
            .collect();
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != width {
                Err(TableError::RowWidthMismatch {
                    row,
                    expected: width,
                    actual: cells.len(),
                })?
            }
            for (column, cell) in columns.iter_mut().zip(cells) {
                column.values.push(cell);
            }
        }
        Table::from_columns(columns)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// True when the table has no rows, whatever its columns.
    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.position(name).map(|position| &self.columns[position])
    }

    pub fn column_at_mut(&mut self, position: usize) -> Option<&mut Column> {
        self.columns.get_mut(position)
    }

    /// Cell in column `name` at `row`, `None` when null or absent.
    pub fn get(&self, row: usize, name: &str) -> Option<&Value> {
        self.column(name).and_then(|column| column.get(row))
    }

    /// Appends a column on the right.
    pub fn push_column(&mut self, column: Column) -> Result<(), TableError> {
        if self.index.contains_key(&column.name) {
            Err(TableError::DuplicateColumn(column.name.to_owned()))?
        }
        if self.columns.is_empty() {
            self.height = column.len();
        } else if column.len() != self.height {
            Err(TableError::ColumnLengthMismatch {
                name: column.name.to_owned(),
                expected: self.height,
                actual: column.len(),
            })?
        }
        self.index.insert(column.name.to_owned(), self.columns.len());
        self.columns.push(column);
        Ok(())
    }

    /// Sets every row of column `name` to `value`. An existing column is
    /// overwritten in place, otherwise the column is appended.
    pub fn set_constant(&mut self, name: &str, value: Value) {
        let column = Column::constant(name, value, self.height);
        match self.position(name) {
            Some(position) => self.columns[position] = column,
            None => {
                self.index.insert(name.to_owned(), self.columns.len());
                self.columns.push(column);
            }
        }
    }

    /// Appends the rows of `other` below this table. Columns are unioned in
    /// order of first appearance; cells a table lacks become null.
    pub fn append(&mut self, other: Table) {
        let height = self.height;
        let added = other.height;
        for column in self.columns.iter_mut() {
            if !other.index.contains_key(&column.name) {
                column.extend_nulls(added);
            }
        }
        for column in other.columns {
            match self.index.get(&column.name) {
                Some(&position) => self.columns[position].values.extend(column.values),
                None => {
                    let mut values = vec![None; height];
                    values.extend(column.values);
                    self.index.insert(column.name.to_owned(), self.columns.len());
                    self.columns.push(Column::new(column.name, values));
                }
            }
        }
        self.height += added;
    }

    /// Row-wise concatenation of `tables` in order.
    pub fn concat<I>(tables: I) -> Table
    where
        I: IntoIterator<Item = Table>,
    {
        let mut result = Table::new();
        for table in tables {
            result.append(table);
        }
        result
    }

    /// Projects onto `names` in that order. A name the table lacks becomes an
    /// all-null column; a repeated name is kept once.
    pub fn select(&self, names: &[&str]) -> Table {
        let mut seen = HashSet::new();
        let mut table = Table {
            columns: Vec::with_capacity(names.len()),
            index: HashMap::with_capacity(names.len()),
            height: self.height,
        };
        for name in names.iter().filter(|name| seen.insert(**name)) {
            let column = self
                .column(name)
                .cloned()
                .unwrap_or_else(|| Column::nulls(*name, self.height));
            table.index.insert((*name).to_owned(), table.columns.len());
            table.columns.push(column);
        }
        table
    }

    /// The first `rows` rows.
    pub fn head(&self, rows: usize) -> Table {
        let height = rows.min(self.height);
        Table {
            columns: self
                .columns
                .iter()
                .map(|column| Column::new(column.name.to_owned(), column.values[..height].to_vec()))
                .collect(),
            index: self.index.clone(),
            height,
        }
    }

    /// Row-major view of the cells.
    pub fn rows(&self) -> impl Iterator<Item = Vec<Option<&Value>>> + '_ {
        (0..self.height).map(move |row| {
            self.columns
                .iter()
                .map(|column| column.values[row].as_ref())
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Option<Value> {
        Some(Value::from(value))
    }

    fn table(names: &[&str], rows: Vec<Vec<Option<Value>>>) -> Table {
        Table::from_rows(names.to_vec(), rows).unwrap()
    }

    #[test]
    fn from_rows_builds_columns() {
        let table = table(
            &["POD", "POL"],
            vec![vec![text("USLAX"), text("CNSHA")], vec![None, text("CNNGB")]],
        );
        assert_eq!(table.height(), 2);
        assert_eq!(table.column_names(), vec!["POD", "POL"]);
        assert_eq!(table.get(1, "POL"), Some(&Value::from("CNNGB")));
        assert_eq!(table.get(1, "POD"), None);
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let error = Table::from_rows(vec!["POD"], vec![vec![text("USLAX"), None]]).unwrap_err();
        assert!(matches!(error, TableError::RowWidthMismatch { row: 0, expected: 1, actual: 2 }));
    }

    #[test]
    fn push_column_rejects_duplicates_and_length_mismatch() {
        let mut table = table(&["POD"], vec![vec![text("USLAX")]]);
        assert!(matches!(
            table.push_column(Column::nulls("POD", 1)),
            Err(TableError::DuplicateColumn(_))
        ));
        assert!(matches!(
            table.push_column(Column::nulls("POL", 2)),
            Err(TableError::ColumnLengthMismatch { .. })
        ));
    }

    #[test]
    fn set_constant_overwrites_in_place() {
        let mut table = table(
            &["File name", "POD"],
            vec![vec![text("old"), text("USLAX")], vec![None, text("USLGB")]],
        );
        table.set_constant("File name", Value::from("X1"));
        assert_eq!(table.column_names(), vec!["File name", "POD"]);
        assert_eq!(table.column("File name").unwrap().values(), &[text("X1"), text("X1")]);

        table.set_constant("Batch", Value::from(1.0));
        assert_eq!(table.column_names(), vec!["File name", "POD", "Batch"]);
        assert_eq!(table.column("Batch").unwrap().len(), 2);
    }

    #[test]
    fn concat_unions_columns_in_first_appearance_order() {
        let first = table(&["POD", "Remarks"], vec![vec![text("USLAX"), text("fragile")]]);
        let second = table(&["Extra", "POD"], vec![vec![text("e1"), text("USLGB")], vec![None, text("USOAK")]]);
        let result = Table::concat(vec![first, second]);

        assert_eq!(result.height(), 3);
        assert_eq!(result.column_names(), vec!["POD", "Remarks", "Extra"]);
        assert_eq!(result.column("POD").unwrap().values(), &[text("USLAX"), text("USLGB"), text("USOAK")]);
        assert_eq!(result.column("Remarks").unwrap().values(), &[text("fragile"), None, None]);
        assert_eq!(result.column("Extra").unwrap().values(), &[None, text("e1"), None]);
    }

    #[test]
    fn concat_of_nothing_is_empty() {
        let result = Table::concat(Vec::new());
        assert!(result.is_empty());
        assert_eq!(result.width(), 0);
    }

    #[test]
    fn select_projects_and_materializes_missing_columns() {
        let source = table(&["POL", "POD"], vec![vec![text("CNSHA"), text("USLAX")]]);
        let projected = source.select(&["POD", "Vessel Name", "POL", "POD"]);

        assert_eq!(projected.column_names(), vec!["POD", "Vessel Name", "POL"]);
        assert_eq!(projected.height(), 1);
        assert_eq!(projected.get(0, "POD"), Some(&Value::from("USLAX")));
        assert_eq!(projected.column("Vessel Name").unwrap().null_count(), 1);
        assert_eq!(projected.position("POL"), Some(2));
    }

    #[test]
    fn head_truncates_rows_only() {
        let source = table(
            &["Line Number"],
            (0..7).map(|n| vec![Some(Value::Number(n as f64))]).collect(),
        );
        let head = source.head(5);
        assert_eq!(head.height(), 5);
        assert_eq!(head.width(), 1);
        assert_eq!(source.head(50).height(), 7);
    }

    #[test]
    fn rows_are_row_major() {
        let source = table(&["A", "B"], vec![vec![text("a1"), None], vec![None, text("b2")]]);
        let rows: Vec<_> = source.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![Some(&Value::from("a1")), None]);
        assert_eq!(rows[1], vec![None, Some(&Value::from("b2"))]);
    }
}
