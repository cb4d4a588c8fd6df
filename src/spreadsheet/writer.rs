//! Single-sheet xlsx serialization of a [`Table`].

use crate::error::ConsolidatorError;
use crate::spreadsheet::cell::datetime_to_serial;
use crate::spreadsheet::reference::index_to_reference;
use crate::table::Table;
use crate::table::Value;
use chrono::NaiveTime;
use chrono::Timelike;
use quick_xml::escape::escape;
use std::io::Cursor;
use std::io::Write;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

/// Style index of date-time cells (built-in number format 22)
const STYLE_DATETIME: usize = 1;
/// Style index of date cells (built-in number format 14)
const STYLE_DATE: usize = 2;
/// Style index of time cells (built-in number format 21)
const STYLE_TIME: usize = 3;

/// Writes `table` as a workbook with a single worksheet named `sheet_name`.
///
/// The first row holds the column names; every following row is one table
/// row in order. Null cells are left out of the sheet.
pub fn write_workbook(sheet_name: &str, table: &Table) -> Result<Vec<u8>, ConsolidatorError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES.as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(PACKAGE_RELATIONSHIPS.as_bytes())?;

    zip.start_file("xl/workbook.xml", options)?;
    zip.write_all(workbook_xml(sheet_name).as_bytes())?;

    zip.start_file("xl/_rels/workbook.xml.rels", options)?;
    zip.write_all(WORKBOOK_RELATIONSHIPS.as_bytes())?;

    zip.start_file("xl/styles.xml", options)?;
    zip.write_all(STYLES.as_bytes())?;

    zip.start_file("xl/worksheets/sheet1.xml", options)?;
    zip.write_all(worksheet_xml(table).as_bytes())?;

    Ok(zip.finish()?.into_inner())
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
  <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
  <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
</Types>
"#;

const PACKAGE_RELATIONSHIPS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>
"#;

const WORKBOOK_RELATIONSHIPS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>
"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>
  <fills count="1"><fill><patternFill patternType="none"/></fill></fills>
  <borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>
  <cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
  <cellXfs count="4">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>
    <xf numFmtId="22" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/>
    <xf numFmtId="14" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/>
    <xf numFmtId="21" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/>
  </cellXfs>
  <cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>
</styleSheet>
"#;

fn workbook_xml(sheet_name: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"
          xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="{}" sheetId="1" r:id="rId1"/>
  </sheets>
</workbook>
"#,
        escape(sheet_name)
    )
}

fn worksheet_xml(table: &Table) -> String {
    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#);
    out.push('\n');
    out.push_str("<sheetData>\n");

    out.push_str(r#"<row r="1">"#);
    for (col, name) in table.column_names().into_iter().enumerate() {
        push_text(&mut out, &index_to_reference(0, col), name);
    }
    out.push_str("</row>\n");

    for (index, row) in table.rows().enumerate() {
        let row_number = index + 1;
        out.push_str(&format!(r#"<row r="{}">"#, row_number + 1));
        for (col, value) in row.into_iter().enumerate() {
            if let Some(value) = value {
                push_value(&mut out, &index_to_reference(row_number, col), value);
            }
        }
        out.push_str("</row>\n");
    }

    out.push_str("</sheetData>\n");
    out.push_str("</worksheet>\n");
    out
}

fn push_value(out: &mut String, reference: &str, value: &Value) {
    match value {
        Value::Bool(value) => {
            out.push_str(&format!(r#"<c r="{}" t="b"><v>{}</v></c>"#, reference, u8::from(*value)));
        }
        Value::Number(number) if number.is_finite() => push_number(out, reference, *number, None),
        Value::Number(number) => push_text(out, reference, &number.to_string()),
        Value::Text(text) => push_text(out, reference, text),
        Value::DateTime(datetime) => push_number(out, reference, datetime_to_serial(*datetime), Some(STYLE_DATETIME)),
        Value::Date(date) => push_number(out, reference, datetime_to_serial(date.and_time(NaiveTime::MIN)), Some(STYLE_DATE)),
        Value::Time(time) => push_number(out, reference, time_to_serial(*time), Some(STYLE_TIME)),
    }
}

fn push_number(out: &mut String, reference: &str, number: f64, style: Option<usize>) {
    let cell = match style {
        Some(style) => format!(r#"<c r="{}" s="{}"><v>{}</v></c>"#, reference, style, number),
        None => format!(r#"<c r="{}"><v>{}</v></c>"#, reference, number),
    };
    out.push_str(&cell);
}

fn push_text(out: &mut String, reference: &str, text: &str) {
    out.push_str(&format!(
        r#"<c r="{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
        reference,
        escape(text)
    ));
}

/// Fraction of a day elapsed at `time`
fn time_to_serial(time: NaiveTime) -> f64 {
    let milliseconds = time.num_seconds_from_midnight() as f64 * 1000f64 + (time.nanosecond() / 1_000_000) as f64;
    milliseconds / 86_400_000f64
}
