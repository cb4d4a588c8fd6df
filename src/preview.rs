use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use sheet_consolidator::{ConsolidatedTable, Value};

pub fn print_preview(table: &ConsolidatedTable, rows: usize) {
    let data = table.table();
    println!("Consolidated Data Preview");
    println!("{}", render_preview(table, rows));
    println!("{} rows x {} columns", data.height(), data.width());
}

pub fn render_preview(table: &ConsolidatedTable, rows: usize) -> Table {
    let head = table.preview(rows);
    let mut preview = Table::new();
    preview
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
    preview.set_header(
        head.column_names()
            .into_iter()
            .map(|name| Cell::new(name).add_attribute(Attribute::Bold)),
    );
    for row in head.rows() {
        preview.add_row(row.into_iter().map(value_cell));
    }
    preview
}

fn value_cell(value: Option<&Value>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => Cell::new(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_consolidator::{consolidate, Consolidation, SourceFile};

    fn consolidated(rows: usize) -> ConsolidatedTable {
        let sheet = sheet_consolidator::Table::from_rows(
            vec!["POD"],
            (0..rows).map(|row| vec![Some(Value::from(format!("PORT{row}")))]).collect(),
        )
        .unwrap();
        match consolidate(&[SourceFile::new("A_X1.xlsx", sheet)]) {
            Consolidation::Consolidated(table) => table,
            other => panic!("expected a table, got {other:?}"),
        }
    }

    #[test]
    fn preview_shows_requested_rows() {
        let mut rendered = render_preview(&consolidated(7), 5);
        assert_eq!(rendered.row_iter().count(), 5);
        assert_eq!(rendered.column_count(), 44);
    }

    #[test]
    fn nulls_render_as_empty_cells() {
        assert_eq!(value_cell(None).content(), "");
        assert_eq!(value_cell(Some(&Value::Number(12.5))).content(), "12.5");
    }
}
