//! Group serializer: render a group as CSV text, optionally gzip-compressed.
//!
//! Output is deterministic. A header row of column names is followed by one `\n`-terminated
//! line per row, fields are quoted only when needed, and no index column is written.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::group::Group;
use crate::io::compression::gzip;
use crate::table::{Table, Value};

/// Whether group payloads are gzip-compressed before archiving.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadCompression {
    #[default]
    None,
    Gzip,
}

impl PayloadCompression {
    pub fn from_flag(gzip: bool) -> Self {
        if gzip {
            PayloadCompression::Gzip
        } else {
            PayloadCompression::None
        }
    }

    /// Archive entry suffix for payloads of this kind.
    pub fn suffix(&self) -> &'static str {
        match self {
            PayloadCompression::None => ".csv",
            PayloadCompression::Gzip => ".csv.gz",
        }
    }
}

/// Render a table as UTF-8 CSV bytes.
///
/// # Errors
/// Returns an I/O error if the CSV writer fails.
pub fn table_to_csv(table: &Table) -> Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::with_capacity(64 * (table.row_count() + 1)));
    wtr.write_record(table.columns()).map_err(csv_io)?;
    for row in table.rows() {
        wtr.write_record(row.iter().map(Value::render)).map_err(csv_io)?;
    }
    Ok(wtr.into_inner().map_err(|e| e.into_error())?)
}

/// Serialize one group into its archive payload.
///
/// # Errors
/// Returns an I/O error from the CSV writer or gzip encoder, or
/// [`SplitError::FeatureDisabled`](crate::SplitError::FeatureDisabled) when gzip is requested
/// but compiled out.
pub fn serialize_group(group: &Group, compression: PayloadCompression) -> Result<Vec<u8>> {
    let csv = table_to_csv(&group.table)?;
    match compression {
        PayloadCompression::None => Ok(csv),
        PayloadCompression::Gzip => gzip(&csv),
    }
}

fn csv_io(e: csv::Error) -> std::io::Error {
    std::io::Error::other(e)
}
