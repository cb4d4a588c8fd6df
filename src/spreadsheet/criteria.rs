use crate::error::ConsolidatorError;
use glob::Pattern;
use std::collections::HashSet;

/// Text cells that read as null unless configured otherwise.
pub const DEFAULT_NULLS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Options controlling how a worksheet is turned into a table.
#[derive(Clone, Debug)]
pub struct Criteria {
    /// Sheet name patterns; the first matching sheet is read. `None` reads the first sheet.
    pub sheet_name_patterns: Option<Vec<Pattern>>,

    /// Text literals read as null.
    pub nulls: HashSet<String>,

    /// Read error cells (`#DIV/0!`, `#REF!`, ...) as null instead of as their literal text.
    pub error_as_null: bool,

    /// Drop data rows that have no cells at all.
    pub skip_empty_rows: bool,
}

impl Default for Criteria {
    fn default() -> Self {
        Criteria {
            sheet_name_patterns: None,
            nulls: DEFAULT_NULLS.iter().map(|null| null.to_string()).collect(),
            error_as_null: false,
            skip_empty_rows: true,
        }
    }
}

impl Criteria {
    /// Restricts sheet selection to names matching any of the glob `patterns`.
    /// An empty list keeps the default of reading the first sheet.
    pub fn with_sheet_patterns<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self, ConsolidatorError> {
        if patterns.is_empty() {
            self.sheet_name_patterns = None;
        } else {
            let patterns = patterns
                .iter()
                .map(|pattern| Pattern::new(pattern.as_ref()))
                .collect::<Result<Vec<_>, _>>()?;
            self.sheet_name_patterns = Some(patterns);
        }
        Ok(self)
    }

    /// Checks if a sheet name matches the criteria patterns.
    /// Returns true if no patterns are specified or if name matches any pattern.
    pub fn accept(&self, sheet_name: &str) -> bool {
        if let Some(patterns) = &self.sheet_name_patterns {
            patterns.iter().any(|pattern| pattern.matches(sheet_name))
        } else {
            true
        }
    }

    /// Checks if a text cell is one of the null literals.
    pub fn is_null(&self, text: &str) -> bool {
        self.nulls.contains(text)
    }
}
