//! End-to-end tests: workbooks in, consolidated workbook out.

use sheet_consolidator::consolidator::export::{DOWNLOAD_FILE_NAME, MIME_TYPE};
use sheet_consolidator::spreadsheet::write_workbook;
use sheet_consolidator::{
    consolidate, download, export, Consolidation, Criteria, SourceFile, Table, Value, REQUIRED_SCHEMA,
};

fn text(value: &str) -> Option<Value> {
    Some(Value::from(value))
}

fn upload(name: &str, sheet: &Table) -> SourceFile {
    let bytes = write_workbook("Sheet1", sheet).unwrap();
    SourceFile::from_bytes(name, bytes, &Criteria::default()).unwrap()
}

fn consolidated(files: &[SourceFile]) -> sheet_consolidator::ConsolidatedTable {
    match consolidate(files) {
        Consolidation::Consolidated(table) => table,
        other => panic!("expected a table, got {other:?}"),
    }
}

#[test]
fn test_two_uploads_round_trip() {
    let a = Table::from_rows(
        vec!["Sea Waybill No", "POD"],
        vec![vec![text("MAEU1"), text("USLAX")], vec![None, text("USNYC")]],
    )
    .unwrap();
    let b = Table::from_rows(vec!["POD"], vec![vec![text("NLRTM")]]).unwrap();
    let files = vec![upload("A_X1.xlsx", &a), upload("B_X2.xlsx", &b)];

    let table = consolidated(&files);
    let bytes = export(&table).unwrap();
    let read_back = SourceFile::from_bytes("consolidated_data.xlsx", bytes, &Criteria::default()).unwrap();

    let sheet = read_back.sheet;
    assert_eq!(sheet.height(), 3);
    // all-null schema columns survive as header-only columns
    assert_eq!(sheet.column_names(), REQUIRED_SCHEMA.to_vec());
    assert_eq!(
        sheet.column("Sea Waybill No").unwrap().values(),
        &[text("MAEU1"), text("MAEU1"), None]
    );
    assert_eq!(sheet.column("POD").unwrap().values(), &[text("USLAX"), text("USNYC"), text("NLRTM")]);
    assert_eq!(sheet.column("File name").unwrap().values(), &[text("X1"), text("X1"), text("X2")]);
    assert_eq!(&sheet, table.table());
}

#[test]
fn test_exported_workbook_sheet_name() {
    let a = Table::from_rows(vec!["POD"], vec![vec![text("USLAX")]]).unwrap();
    let table = consolidated(&[upload("A_X1.xlsx", &a)]);

    let renamed = Criteria::default().with_sheet_patterns(&["Consolidated"]).unwrap();
    let read_back = SourceFile::from_bytes("out.xlsx", export(&table).unwrap(), &renamed).unwrap();
    assert_eq!(read_back.sheet.get(0, "File name"), Some(&Value::from("X1")));
}

#[test]
fn test_download_metadata() {
    let a = Table::from_rows(vec!["POD"], vec![vec![text("USLAX")]]).unwrap();
    let table = consolidated(&[upload("A_X1.xlsx", &a)]);

    let download = download(&table).unwrap();
    assert_eq!(download.file_name, DOWNLOAD_FILE_NAME);
    assert_eq!(download.file_name, "consolidated_data.xlsx");
    assert_eq!(download.mime_type, MIME_TYPE);
    assert_eq!(&download.bytes[..2], b"PK");
}

#[test]
fn test_header_only_uploads_have_no_data() {
    let empty = Table::from_rows(vec!["Sea Waybill No", "POD"], Vec::new()).unwrap();
    let files = vec![upload("A_X1.xlsx", &empty), upload("B_X2.xlsx", &empty)];
    assert!(files.iter().all(|file| file.sheet.is_empty()));
    assert_eq!(consolidate(&files), Consolidation::NoData);
}

#[test]
fn test_no_uploads() {
    assert_eq!(consolidate(&[]), Consolidation::NoFiles);
}

#[test]
fn test_extra_columns_and_mixed_values() {
    let a = Table::from_rows(
        vec!["Quantity", "Agent", "Contains CY/DOOR?"],
        vec![
            vec![Some(Value::Number(12.0)), text("ACME"), Some(Value::Bool(true))],
            vec![None, text("ACME Logistics"), None],
        ],
    )
    .unwrap();
    let files = vec![upload("shipment_2024_ABC123.xlsx", &a)];

    let table = consolidated(&files);
    let read_back = SourceFile::from_bytes("out.xlsx", export(&table).unwrap(), &Criteria::default()).unwrap();
    let sheet = read_back.sheet;

    assert_eq!(sheet.height(), 2);
    assert_eq!(sheet.column_names().last(), Some(&"Agent"));
    assert_eq!(
        sheet.column("Quantity").unwrap().values(),
        &[Some(Value::Number(12.0)), Some(Value::Number(12.0))]
    );
    assert_eq!(sheet.get(1, "Contains CY/DOOR?"), Some(&Value::Bool(true)));
    assert_eq!(sheet.get(1, "Agent"), Some(&Value::from("ACME Logistics")));
    assert_eq!(sheet.get(1, "File name"), Some(&Value::from("ABC123")));
}

#[test]
fn test_rows_without_values_are_dropped_on_read() {
    let a = Table::from_rows(
        vec!["POD"],
        vec![vec![text("USLAX")], vec![None], vec![text("NLRTM")]],
    )
    .unwrap();
    let bytes = write_workbook("Sheet1", &a).unwrap();

    let skipped = SourceFile::from_bytes("A_X1.xlsx", bytes.clone(), &Criteria::default()).unwrap();
    assert_eq!(skipped.sheet.height(), 2);

    let keep = Criteria {
        skip_empty_rows: false,
        ..Criteria::default()
    };
    let kept = SourceFile::from_bytes("A_X1.xlsx", bytes, &keep).unwrap();
    assert_eq!(kept.sheet, a);
}

#[test]
fn test_malformed_upload_aborts() {
    let error = SourceFile::from_bytes("A_X1.xlsx", b"Sea Waybill No;POD".to_vec(), &Criteria::default())
        .unwrap_err();
    assert!(error.to_string().starts_with("A_X1.xlsx: "));
}
