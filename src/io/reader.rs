//! Tabular reader entry points.

use std::path::Path;

use crate::error::Result;
use crate::io::compression::decompress_if_gzip;
use crate::io::format::{Delimiter, InputFormat};
use crate::table::Table;

/// Parse an uploaded file into a [`Table`].
///
/// The format is taken from `file_name`'s extension and checked before any parsing. `delimiter`
/// only applies to `.txt` input and defaults to comma; `.csv` is always comma separated.
/// Gzip-compressed delimited uploads are inflated before parsing.
///
/// # Errors
/// * `SplitError::UnsupportedFormat` if the extension is not `.xlsx`, `.xls`, `.csv` or `.txt`.
/// * `SplitError::Parse` if the bytes cannot be decoded as the declared format.
/// * `SplitError::FeatureDisabled` if the reader for the format was compiled out.
pub fn read_table(bytes: &[u8], file_name: &str, delimiter: Option<Delimiter>) -> Result<Table> {
    let format = InputFormat::from_file_name(file_name)?;
    tracing::debug!(file_name, format = format.name(), bytes = bytes.len(), "reading upload");
    read_as(bytes, format, delimiter)
}

/// Read a file from disk; the file name supplies the format as in [`read_table`].
///
/// # Errors
/// See [`read_table`]; I/O failures surface as `SplitError::Io`.
pub fn read_table_file(path: impl AsRef<Path>, delimiter: Option<Delimiter>) -> Result<Table> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    // Reject by extension before touching the file.
    InputFormat::from_file_name(&file_name)?;
    let bytes = std::fs::read(path)?;
    read_table(&bytes, &file_name, delimiter)
}

fn read_as(bytes: &[u8], format: InputFormat, delimiter: Option<Delimiter>) -> Result<Table> {
    match format {
        InputFormat::Excel => read_excel_gated(bytes),
        InputFormat::Csv => {
            read_delimited_gated(&decompress_if_gzip(bytes)?, Delimiter::Comma, "csv")
        }
        InputFormat::Text => {
            let delimiter = delimiter.unwrap_or_default();
            read_delimited_gated(&decompress_if_gzip(bytes)?, delimiter, "txt")
        }
    }
}

#[cfg(feature = "io-excel")]
fn read_excel_gated(bytes: &[u8]) -> Result<Table> {
    crate::io::excel::read_excel(bytes)
}

#[cfg(not(feature = "io-excel"))]
fn read_excel_gated(_bytes: &[u8]) -> Result<Table> {
    Err(crate::error::SplitError::FeatureDisabled { feature: "io-excel" })
}

#[cfg(feature = "io-csv")]
fn read_delimited_gated(bytes: &[u8], delimiter: Delimiter, format: &str) -> Result<Table> {
    crate::io::csv::read_delimited(bytes, delimiter, format)
}

#[cfg(not(feature = "io-csv"))]
fn read_delimited_gated(_bytes: &[u8], _delimiter: Delimiter, _format: &str) -> Result<Table> {
    Err(crate::error::SplitError::FeatureDisabled { feature: "io-csv" })
}
