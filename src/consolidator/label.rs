/// Derives the row label of a source file from its name.
///
/// The last extension is dropped, the remaining base is split on `_` and the
/// last part is kept. A part that still carries a `.` loses its own last
/// extension as well.
pub fn extract_label(file_name: &str) -> String {
    let base = strip_extension(file_name);
    let last_part = base.rsplit('_').next().unwrap_or(base);
    strip_extension(last_part).to_owned()
}

fn strip_extension(name: &str) -> &str {
    name.rsplit_once('.').map(|(base, _)| base).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_underscore_part() {
        assert_eq!(extract_label("shipment_2024_ABC123.xlsx"), "ABC123");
        assert_eq!(extract_label("A_X1.xlsx"), "X1");
    }

    #[test]
    fn no_underscore() {
        assert_eq!(extract_label("simple.xlsx"), "simple");
    }

    #[test]
    fn no_extension() {
        assert_eq!(extract_label("no_extension_part"), "part");
        assert_eq!(extract_label("plain"), "plain");
    }

    #[test]
    fn double_extension() {
        assert_eq!(extract_label("A_X1.xlsx.xlsx"), "X1");
    }

    #[test]
    fn dotted_base_keeps_all_but_last_dot_part() {
        assert_eq!(extract_label("report.final.data.xlsx"), "report.final");
        assert_eq!(extract_label("MAEU_BL.123.v2.xlsx"), "BL.123");
    }

    #[test]
    fn degenerate_names() {
        assert_eq!(extract_label(""), "");
        assert_eq!(extract_label(".xlsx"), "");
        assert_eq!(extract_label("trailing_.xlsx"), "");
    }
}
