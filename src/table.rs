//! In-memory tabular data model.
//!
//! A [`Table`] is an ordered list of uniquely named columns plus row-major cell storage. Tables
//! are produced once per input file by the readers in [`crate::io`] and are never mutated after
//! construction; grouping builds new tables from row subsets.

use std::collections::HashSet;
use std::fmt;

use ordered_float::OrderedFloat;

use crate::error::{Result, SplitError};

/// A single scalar cell.
///
/// `Value` is `Eq + Hash + Ord` so it can key the grouping map directly; floats get a total
/// order through [`OrderedFloat`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Value {
    Empty,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    Text(String),
}

impl Value {
    /// Infer a typed value from one delimited-text field.
    ///
    /// Empty fields become [`Value::Empty`]; integers, finite floats and `true`/`false` (any case)
    /// are recognized; everything else stays text.
    pub fn infer(field: &str) -> Self {
        if field.is_empty() {
            return Value::Empty;
        }
        if let Ok(i) = field.parse::<i64>() {
            return Value::Int(i);
        }
        // f64::from_str also accepts "inf" and "nan"; only treat digit-bearing fields as numbers.
        if field.bytes().any(|b| b.is_ascii_digit())
            && let Ok(f) = field.parse::<f64>()
            && f.is_finite()
        {
            return Value::Float(OrderedFloat(f));
        }
        if field.eq_ignore_ascii_case("true") {
            return Value::Bool(true);
        }
        if field.eq_ignore_ascii_case("false") {
            return Value::Bool(false);
        }
        Value::Text(field.to_string())
    }

    pub fn float(f: f64) -> Self {
        Value::Float(OrderedFloat(f))
    }

    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Render as a locale-independent CSV field.
    pub fn render(&self) -> String {
        match self {
            Value::Empty => String::new(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => render_float(f.0),
            Value::Text(s) => s.clone(),
        }
    }

    /// The string a group key contributes to its archive entry name.
    pub fn key_label(&self) -> String {
        match self {
            Value::Empty => "empty".to_string(),
            other => other.render(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

// Integral floats keep one decimal place so a float column stays recognizably float on output.
fn render_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{f:.1}")
    } else {
        format!("{f}")
    }
}

/// An immutable table of named columns.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Build a table, checking that column names are unique and every row has one value per column.
    ///
    /// # Errors
    /// Returns [`SplitError::Parse`] if a column name repeats or a row has the wrong width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(SplitError::parse(
                    "table",
                    format!("duplicate column name '{name}'"),
                ));
            }
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(SplitError::parse(
                    "table",
                    format!(
                        "row #{} has {} fields, expected {}",
                        i + 1,
                        row.len(),
                        columns.len()
                    ),
                ));
            }
        }
        Ok(Self { columns, rows })
    }

    /// Table with the same columns and the given rows; widths are already known to match.
    pub(crate) fn with_rows(&self, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterate one column's values in row order.
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a Value> + use<'a>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// First `n` rows, for previews.
    pub fn head(&self, n: usize) -> Table {
        self.with_rows(self.rows.iter().take(n).cloned().collect())
    }
}
