use crate::table::value::Value;

/// A named column of nullable cells.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    /// Column name (from the header row or synthesized)
    pub(crate) name: String,
    /// One entry per table row, `None` for null
    pub(crate) values: Vec<Option<Value>>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Option<Value>>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }

    /// A column holding `len` nulls.
    pub fn nulls(name: impl Into<String>, len: usize) -> Self {
        Column::new(name, vec![None; len])
    }

    /// A column repeating `value` in each of its `len` rows.
    pub fn constant(name: impl Into<String>, value: Value, len: usize) -> Self {
        Column::new(name, vec![Some(value); len])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Option<Value>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Cell at `row`, `None` when null or out of range.
    pub fn get(&self, row: usize) -> Option<&Value> {
        self.values.get(row).and_then(Option::as_ref)
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|value| value.is_none()).count()
    }

    /// Replaces each null with the nearest non-null value above it.
    /// Leading nulls stay null.
    pub fn forward_fill(&mut self) {
        let mut last: Option<Value> = None;
        for cell in self.values.iter_mut() {
            match cell {
                Some(value) => last = Some(value.clone()),
                None => *cell = last.clone(),
            }
        }
    }

    pub(crate) fn extend_nulls(&mut self, count: usize) {
        self.values.resize(self.values.len() + count, None);
    }
}
