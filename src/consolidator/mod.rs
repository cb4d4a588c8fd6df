//! # Consolidator
//!
//! Merges the worksheets of a batch of uploaded files into one table:
//! each file's leading header columns are filled down, every row is stamped
//! with a label taken from its file name, the tables are stacked in upload
//! order and the result is reordered to the required schema.

pub mod export;
pub mod label;
pub mod prepare;
pub mod schema;
pub mod source;

pub use export::download;
pub use export::export;
pub use export::Download;
pub use label::extract_label;
pub use prepare::prepare;
pub use schema::reorder;
pub use schema::FILE_NAME_COLUMN;
pub use schema::HEADER_COLUMN_COUNT;
pub use schema::REQUIRED_SCHEMA;
pub use source::expand_paths;
pub use source::SourceFile;

use crate::table::Table;
use tracing::info;
use tracing::warn;

/// Row-wise union of the prepared files, in required schema order.
#[derive(Clone, Debug, PartialEq)]
pub struct ConsolidatedTable {
    table: Table,
}

impl ConsolidatedTable {
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn into_inner(self) -> Table {
        self.table
    }

    /// The first `rows` rows, for display.
    pub fn preview(&self, rows: usize) -> Table {
        self.table.head(rows)
    }
}

/// Outcome of consolidating one batch.
#[derive(Clone, Debug, PartialEq)]
pub enum Consolidation {
    /// Nothing was uploaded.
    NoFiles,
    /// Every uploaded file was empty.
    NoData,
    Consolidated(ConsolidatedTable),
}

impl Consolidation {
    /// Message shown to the user when there is no table.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Consolidation::NoFiles => Some("Please upload one or more XLSX files."),
            Consolidation::NoData => Some("No data found in uploaded files."),
            Consolidation::Consolidated(_) => None,
        }
    }
}

/// Consolidates `files` in upload order.
pub fn consolidate(files: &[SourceFile]) -> Consolidation {
    if files.is_empty() {
        info!("No files to consolidate");
        return Consolidation::NoFiles;
    }

    let prepared: Vec<Table> = files.iter().filter_map(prepare).collect();
    if prepared.is_empty() {
        warn!(files = files.len(), "No data found in uploaded files");
        return Consolidation::NoData;
    }

    let used = prepared.len();
    let union = Table::concat(prepared);
    let table = reorder(&union);
    info!(
        files = files.len(),
        used,
        rows = table.height(),
        extra_columns = table.width() - REQUIRED_SCHEMA.len(),
        "Consolidated batch"
    );
    Consolidation::Consolidated(ConsolidatedTable { table })
}
