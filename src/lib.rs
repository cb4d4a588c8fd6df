//! # Sheet Consolidator
//!
//! Merges the first worksheet of many xlsx files into one table and writes it
//! back out as a single-sheet workbook.
//!
//! ## Pipeline
//!
//! 1. Each uploaded workbook is read into a [`SourceFile`]: the first non-empty
//!    row of its worksheet names the columns.
//! 2. [`consolidate`] prepares every non-empty file. Its first 33 columns are
//!    filled down and each row gets the file's label in the `File name` column.
//!    The label is the last `_`-separated part of the file name, extension
//!    removed.
//! 3. The prepared tables are stacked in upload order and reordered to
//!    [`REQUIRED_SCHEMA`]. Columns outside the schema follow at the end.
//! 4. [`export`] serializes the result as an xlsx workbook with a
//!    `Consolidated` sheet.
//!
//! ```no_run
//! use sheet_consolidator::{consolidate, export, Consolidation, Criteria, SourceFile};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), sheet_consolidator::error::ConsolidatorError> {
//! let criteria = Criteria::default();
//! let files = vec![
//!     SourceFile::open(Path::new("shipment_2024_ABC123.xlsx"), &criteria)?,
//!     SourceFile::open(Path::new("shipment_2024_DEF456.xlsx"), &criteria)?,
//! ];
//! if let Consolidation::Consolidated(table) = consolidate(&files) {
//!     std::fs::write("consolidated_data.xlsx", export(&table)?)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod consolidator;
pub mod error;
pub(crate) mod helpers;
pub mod logging;
pub mod spreadsheet;
pub mod table;

pub use consolidator::consolidate;
pub use consolidator::download;
pub use consolidator::export;
pub use consolidator::ConsolidatedTable;
pub use consolidator::Consolidation;
pub use consolidator::Download;
pub use consolidator::SourceFile;
pub use consolidator::REQUIRED_SCHEMA;
pub use error::ConsolidatorError;
pub use spreadsheet::Criteria;
pub use table::Table;
pub use table::Value;
