//! Conversion between A1-style cell references and 0-based indexes.
//!
//! Parsing only accepts positions inside an Excel worksheet, `A1` to `XFD1048576`.

/// Number of rows in a worksheet.
pub(crate) const MAX_ROWS: usize = 1_048_576;
/// Number of columns in a worksheet (`A` to `XFD`).
pub(crate) const MAX_COLUMNS: usize = 16_384;

/// Converts column letters to a 0-based column index ("A" → 0, "AA" → 26).
pub(crate) fn col_to_index(col: &str) -> Option<usize> {
    if col.is_empty() {
        return None;
    }
    col.bytes().try_fold(0usize, |index, byte| {
        let digit = byte.to_ascii_uppercase();
        if !digit.is_ascii_uppercase() {
            return None;
        }
        let index = index.checked_mul(26)?.checked_add((digit - b'A') as usize + 1)?;
        (index <= MAX_COLUMNS).then_some(index)
    }).map(|index| index - 1)
}

/// Converts a 1-based row number to a 0-based row index ("1" → 0).
pub(crate) fn row_to_index(row: &str) -> Option<usize> {
    row.parse::<usize>().ok()
        .and_then(|row| row.checked_sub(1))
        .filter(|index| *index < MAX_ROWS)
}

/// Converts a 0-based column index to column letters (0 → "A", 26 → "AA").
pub(crate) fn index_to_col(col: usize) -> String {
    let mut col = col + 1;
    let mut letters = Vec::new();
    while col > 0 {
        col -= 1;
        letters.push(b'A' + (col % 26) as u8);
        col /= 26;
    }
    letters.iter().rev().map(|byte| *byte as char).collect()
}

/// Converts 0-based row and column indexes to a cell reference (0, 0 → "A1").
pub(crate) fn index_to_reference(row: usize, col: usize) -> String {
    format!("{}{}", index_to_col(col), row + 1)
}

/// Parses a cell reference such as "B12" or "$B$12" into (row, col).
pub(crate) fn reference_to_index(reference: &str) -> Option<(usize, usize)> {
    let reference = reference.replace('$', "");
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (col, row) = reference.split_at(split);
    Some((row_to_index(row)?, col_to_index(col)?))
}
