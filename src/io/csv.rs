//! Delimited text reader.
//!
//! The first record is the header row. Every following record must have the same number of
//! fields; a ragged record usually means the wrong delimiter was chosen and is reported as a
//! parse error rather than padded.

use crate::error::{Result, SplitError};
use crate::io::format::Delimiter;
use crate::io::{normalize_headers, promote_numeric_columns};
use crate::table::{Table, Value};

/// Parse delimited bytes into a [`Table`], inferring a [`Value`] for each cell.
///
/// Integer cells in a column that also holds floats are widened to floats.
///
/// `format` names the declared format in error messages (`"csv"` or `"txt"`).
///
/// # Errors
/// Returns [`SplitError::Parse`] if the input has no header row, is not valid UTF-8, or has a
/// record whose field count differs from the header's.
pub fn read_delimited(bytes: &[u8], delimiter: Delimiter, format: &str) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .flexible(false)
        .from_reader(bytes);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| SplitError::parse(format, format!("header row: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() {
        return Err(SplitError::parse(format, "no columns to parse"));
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (i, rec) in rdr.records().enumerate() {
        let rec = rec.map_err(|e| SplitError::parse(format, format!("record #{}: {e}", i + 1)))?;
        rows.push(rec.iter().map(Value::infer).collect());
    }

    promote_numeric_columns(&mut rows, headers.len());

    tracing::debug!(
        format,
        delimiter = %delimiter,
        columns = headers.len(),
        rows = rows.len(),
        "parsed delimited input"
    );
    Table::new(normalize_headers(headers), rows)
}
