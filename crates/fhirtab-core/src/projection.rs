//! Field projection: which parts of each bundle entry become output columns.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tracing::warn;

use crate::error::{FetchError, Result};
use crate::row::DisplayRow;

/// A dot-separated path into a resource, e.g. `valueQuantity.unit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(FetchError::invalid_request("field path must not be empty"));
        }
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(FetchError::invalid_request(format!(
                "field path `{raw}` has an empty segment"
            )));
        }
        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// Walks object keys segment by segment; absent segments resolve to None.
    pub fn lookup<'a>(&self, resource: &'a Value) -> Option<&'a Value> {
        let mut current = resource;
        for segment in &self.segments {
            current = current.get(segment)?;
        }
        Some(current)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl FromStr for FieldPath {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// One output column: a name plus the path(s) whose values form it.
///
/// A column with several paths joins their values with a single space, which
/// is how a numeric value and its unit become one `70 kg` field.
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    paths: Vec<FieldPath>,
}

impl Column {
    pub fn new(name: impl Into<String>, paths: Vec<FieldPath>) -> Result<Self> {
        let name = name.into();
        if paths.is_empty() {
            return Err(FetchError::invalid_request(format!(
                "column `{name}` has no field paths"
            )));
        }
        Ok(Self { name, paths })
    }

    /// Parses the `[NAME=]PATH[+PATH...]` column syntax. Without a name the
    /// raw spec doubles as the column name.
    pub fn parse(spec: &str) -> Result<Self> {
        let (name, paths_spec) = match spec.split_once('=') {
            Some(("", _)) => {
                return Err(FetchError::invalid_request(format!(
                    "column `{spec}` has an empty name"
                )));
            }
            Some((name, rest)) => (name.to_string(), rest),
            None => (spec.to_string(), spec),
        };
        let paths = paths_spec
            .split('+')
            .map(FieldPath::parse)
            .collect::<Result<Vec<_>>>()?;
        Self::new(name, paths)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Extracts this column from one resource; Err names the missing path.
    fn extract(&self, resource: &Value) -> std::result::Result<String, String> {
        let mut parts = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            let value = path
                .lookup(resource)
                .ok_or_else(|| path.as_str().to_string())?;
            parts.push(display_value(value));
        }
        Ok(parts.join(" "))
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Whether an entry missing a required field aborts the call or is skipped
/// with a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingFieldPolicy {
    #[default]
    Abort,
    Skip,
}

/// The caller-defined projection applied to every bundle entry.
#[derive(Debug, Clone)]
pub struct Projection {
    columns: Vec<Column>,
    missing: MissingFieldPolicy,
}

impl Projection {
    /// A projection with no columns is an unsupplied extension point, not an
    /// empty table.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if columns.is_empty() {
            return Err(FetchError::Unimplemented("projection has no columns"));
        }
        Ok(Self {
            columns,
            missing: MissingFieldPolicy::default(),
        })
    }

    /// Builds a projection from `[NAME=]PATH[+PATH...]` column specs.
    pub fn parse<I, S>(specs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns = specs
            .into_iter()
            .map(|spec| Column::parse(spec.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(columns)
    }

    pub fn with_policy(mut self, policy: MissingFieldPolicy) -> Self {
        self.missing = policy;
        self
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// One row per entry whose required fields are all present, in entry
    /// order. Entries missing a field either abort the call or are skipped
    /// with a warning, per the configured policy; fields are never fabricated.
    pub fn project(&self, entries: &[Value]) -> Result<Vec<DisplayRow>> {
        let mut rows = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            // Search bundles nest the payload under `resource`.
            let resource = entry.get("resource").unwrap_or(entry);
            match self.extract_row(resource) {
                Ok(row) => rows.push(row),
                Err(path) => match self.missing {
                    MissingFieldPolicy::Abort => {
                        return Err(FetchError::field_extraction(index, path));
                    }
                    MissingFieldPolicy::Skip => {
                        warn!(entry = index, field = %path, "skipping entry with missing field");
                    }
                },
            }
        }
        Ok(rows)
    }

    fn extract_row(&self, resource: &Value) -> std::result::Result<DisplayRow, String> {
        let mut fields = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            fields.push(column.extract(resource)?);
        }
        Ok(DisplayRow::new(fields))
    }
}
