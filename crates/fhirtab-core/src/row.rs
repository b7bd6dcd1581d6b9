use std::fmt;

/// One output row: the projected fields of one bundle entry, already
/// formatted as strings. A row has no identity beyond its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    fields: Vec<String>,
}

impl DisplayRow {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }
}

impl fmt::Display for DisplayRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fields.join(" | "))
    }
}

/// Formats one line per row, in row order. No header line is produced; a
/// caller wanting one supplies it as a synthetic first row.
pub fn render(rows: &[DisplayRow]) -> Vec<String> {
    rows.iter().map(DisplayRow::to_string).collect()
}
