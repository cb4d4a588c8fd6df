use crate::error::ConsolidatorError;
use crate::error::ResultMessage;
use crate::helpers::reader::UnifiedReader;
use crate::spreadsheet;
use crate::spreadsheet::Criteria;
use crate::table::Table;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::warn;

/// One uploaded file: its name and the table read from its worksheet.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceFile {
    pub name: String,
    pub sheet: Table,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, sheet: Table) -> Self {
        SourceFile {
            name: name.into(),
            sheet,
        }
    }

    /// Parses an uploaded workbook held in memory.
    pub fn from_bytes(name: &str, bytes: Vec<u8>, criteria: &Criteria) -> Result<Self, ConsolidatorError> {
        let sheet = spreadsheet::read_table(name, UnifiedReader::from_bytes(bytes), criteria).with_prefix(name)?;
        Ok(SourceFile::new(name, sheet))
    }

    /// Reads a workbook from disk. The file name, without directories, is the
    /// name the label is derived from.
    pub fn open(path: &Path, criteria: &Criteria) -> Result<Self, ConsolidatorError> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let shown = path.display().to_string();
        let reader = UnifiedReader::open(path).with_prefix(&shown)?;
        let sheet = spreadsheet::read_table(&name, reader, criteria).with_prefix(&shown)?;
        debug!(path = %shown, rows = sheet.height(), "Loaded source file");
        Ok(SourceFile::new(name, sheet))
    }
}

/// Expands input arguments into file paths, keeping argument order.
///
/// An argument holding glob metacharacters is expanded in the order the glob
/// yields matches; anything else is taken as a literal path. Repeated paths
/// are kept.
pub fn expand_paths<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<PathBuf>, ConsolidatorError> {
    let mut paths = Vec::new();
    for input in inputs {
        let input = input.as_ref();
        if !input.contains(['*', '?', '[']) {
            paths.push(PathBuf::from(input));
            continue;
        }
        let before = paths.len();
        for entry in glob::glob(input)? {
            paths.push(entry?);
        }
        if paths.len() == before {
            warn!(pattern = %input, "Pattern matched no files");
        }
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sheet_consolidator_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn literal_paths_are_kept_in_order() {
        let paths = expand_paths(&["b.xlsx", "a.xlsx", "b.xlsx"]).unwrap();
        assert_eq!(paths, vec![PathBuf::from("b.xlsx"), PathBuf::from("a.xlsx"), PathBuf::from("b.xlsx")]);
    }

    #[test]
    fn patterns_are_expanded() {
        let dir = scratch_dir("expand");
        fs::write(dir.join("A_X1.xlsx"), b"").unwrap();
        fs::write(dir.join("B_X2.xlsx"), b"").unwrap();
        fs::write(dir.join("notes.txt"), b"").unwrap();

        let pattern = format!("{}/*.xlsx", dir.display());
        let paths = expand_paths(&[pattern]).unwrap();
        assert_eq!(paths, vec![dir.join("A_X1.xlsx"), dir.join("B_X2.xlsx")]);

        let nothing = format!("{}/*.csv", dir.display());
        assert!(expand_paths(&[nothing]).unwrap().is_empty());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(expand_paths(&["[x.xlsx"]).is_err());
    }

    #[test]
    fn missing_file_error_names_the_path() {
        let error = SourceFile::open(Path::new("missing/A_X1.xlsx"), &Criteria::default()).unwrap_err();
        assert!(error.to_string().starts_with("missing/A_X1.xlsx: "));
    }

    #[test]
    fn open_reads_the_file_under_its_base_name() {
        let dir = scratch_dir("open");
        let sheet = Table::from_rows(vec!["POD"], vec![vec![Some(Value::from("USLAX"))]]).unwrap();
        let path = dir.join("A_X1.xlsx");
        fs::write(&path, spreadsheet::write_workbook("Sheet1", &sheet).unwrap()).unwrap();

        let file = SourceFile::open(&path, &Criteria::default()).unwrap();
        assert_eq!(file.name, "A_X1.xlsx");
        assert_eq!(file.sheet, sheet);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn malformed_upload_error_names_the_file() {
        let error = SourceFile::from_bytes("A_X1.xlsx", b"not a workbook".to_vec(), &Criteria::default()).unwrap_err();
        assert!(error.to_string().starts_with("A_X1.xlsx: "));
    }
}
