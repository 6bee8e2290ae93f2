//! Spreadsheet reader for `.xlsx` and `.xls` workbooks.
//!
//! Only the first worksheet is read and its first row supplies the column names.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use crate::error::{Result, SplitError};
use crate::io::{normalize_headers, promote_numeric_columns};
use crate::table::{Table, Value};

/// Largest magnitude at which every whole `f64` is exactly representable as `i64`.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Parse workbook bytes into a [`Table`].
///
/// # Errors
/// Returns [`SplitError::Parse`] if the bytes are not a readable workbook, the workbook has no
/// worksheets, or the first worksheet is empty.
pub fn read_excel(bytes: &[u8]) -> Result<Table> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| SplitError::parse("excel", e))?;
    let sheet_name = workbook.sheet_names().first().cloned().unwrap_or_default();
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SplitError::parse("excel", "workbook has no worksheets"))?
        .map_err(|e| SplitError::parse("excel", e))?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| SplitError::parse("excel", format!("worksheet '{sheet_name}' is empty")))?;
    let headers: Vec<String> = header
        .iter()
        .map(|cell| match cell {
            Data::Empty => String::new(),
            other => cell_value(other).render(),
        })
        .collect();
    let mut body: Vec<Vec<Value>> = rows.map(|row| row.iter().map(cell_value).collect()).collect();
    promote_numeric_columns(&mut body, headers.len());

    tracing::debug!(
        sheet = %sheet_name,
        columns = headers.len(),
        rows = body.len(),
        "parsed worksheet"
    );
    Table::new(normalize_headers(headers), body)
}

/// Map a worksheet cell to a [`Value`].
///
/// Spreadsheets store every number as a float; whole numbers come back as integers and are
/// widened again by [`read_excel`] when their column also holds fractions. Date-times
/// keep their serial number, and ISO strings and cell errors become text.
pub fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Empty,
        Data::Int(i) => Value::Int(*i),
        Data::Float(f) => float_value(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::String(s) if s.is_empty() => Value::Empty,
        Data::String(s) => Value::Text(s.clone()),
        Data::DateTime(dt) => Value::float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Text(s.clone()),
        Data::Error(e) => Value::Text(e.to_string()),
    }
}

fn float_value(f: f64) -> Value {
    if f.fract() == 0.0 && f.abs() <= MAX_EXACT_INT {
        Value::Int(f as i64)
    } else {
        Value::float(f)
    }
}
