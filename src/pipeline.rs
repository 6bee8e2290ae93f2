//! The split pipeline: read → group → serialize → archive.
//!
//! Every call runs the whole pipeline from scratch and shares nothing with earlier calls, so
//! building the same export twice yields byte-identical archives.
//!
//! ```no_run
//! use ironsplit::{SplitOptions, PayloadCompression, split_file};
//! # fn main() -> ironsplit::Result<()> {
//! let opts = SplitOptions::new("region").with_compression(PayloadCompression::Gzip);
//! let out = split_file("sales.csv", &opts)?;
//! std::fs::write(&out.file_name, &out.archive)?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::archive::{ArchiveEntry, ZIP_MEDIA_TYPE, build_archive, check_unique_names};
use crate::error::{Result, SplitError};
use crate::group::{Group, GroupOrder, group_by_column};
use crate::io::format::Delimiter;
use crate::io::reader::{read_table, read_table_file};
use crate::naming::{SanitizeMode, entry_file_name};
use crate::runner::{ExecMode, map_ordered};
use crate::serialize::{PayloadCompression, serialize_group};
use crate::table::Table;

/// Default download name of the archive.
pub const DEFAULT_ARCHIVE_NAME: &str = "split_groups.zip";

/// Settings for one export.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitOptions {
    /// Column whose values define the groups.
    pub split_column: String,
    /// Delimiter for `.txt` input; ignored for other formats.
    pub delimiter: Option<Delimiter>,
    pub compression: PayloadCompression,
    pub sanitize: SanitizeMode,
    pub group_order: GroupOrder,
    pub exec_mode: ExecMode,
    pub archive_name: String,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            split_column: String::new(),
            delimiter: None,
            compression: PayloadCompression::None,
            sanitize: SanitizeMode::default(),
            group_order: GroupOrder::default(),
            exec_mode: ExecMode::default(),
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
        }
    }
}

impl SplitOptions {
    pub fn new(split_column: impl Into<String>) -> Self {
        Self {
            split_column: split_column.into(),
            ..Self::default()
        }
    }

    /// Load options from a JSON document; missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`SplitError::Io`] if the file cannot be read or [`SplitError::Parse`] if it is
    /// not valid options JSON.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        serde_json::from_slice(&bytes)
            .map_err(|e| SplitError::parse("config", format!("{}: {e}", path.display())))
    }

    pub fn with_split_column(mut self, column: impl Into<String>) -> Self {
        self.split_column = column.into();
        self
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_compression(mut self, compression: PayloadCompression) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_sanitize(mut self, sanitize: SanitizeMode) -> Self {
        self.sanitize = sanitize;
        self
    }

    pub fn with_group_order(mut self, order: GroupOrder) -> Self {
        self.group_order = order;
        self
    }

    pub fn with_exec_mode(mut self, mode: ExecMode) -> Self {
        self.exec_mode = mode;
        self
    }

    pub fn with_archive_name(mut self, name: impl Into<String>) -> Self {
        self.archive_name = name.into();
        self
    }
}

/// Per-group line of an [`ExportReport`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupReport {
    pub key: String,
    pub file_name: String,
    pub rows: usize,
    pub payload_bytes: usize,
}

/// What an export produced, suitable for display or JSON output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReport {
    pub split_column: String,
    pub compression: PayloadCompression,
    pub total_rows: usize,
    pub archive_bytes: usize,
    pub groups: Vec<GroupReport>,
}

/// A finished export: the archive bytes plus how to offer them for download.
#[derive(Clone, Debug)]
pub struct SplitOutput {
    pub archive: Vec<u8>,
    pub file_name: String,
    pub media_type: &'static str,
    pub report: ExportReport,
}

/// Serialize each group and name its archive entry, preserving group order.
///
/// # Errors
/// Returns [`SplitError::FilenameCollision`] if two keys sanitize to the same name, or any
/// serialization error.
pub fn group_entries(groups: &[Group], opts: &SplitOptions) -> Result<Vec<ArchiveEntry>> {
    // Names are checked before any payload is rendered.
    let names: Vec<ArchiveEntry> = groups
        .iter()
        .map(|g| {
            ArchiveEntry::new(entry_file_name(&g.key, opts.sanitize, opts.compression), Vec::new())
                .with_key(g.key.key_label())
        })
        .collect();
    check_unique_names(&names)?;

    let payloads = map_ordered(groups, opts.exec_mode, |g| {
        serialize_group(g, opts.compression)
    })?;
    Ok(names
        .into_iter()
        .zip(payloads)
        .map(|(entry, payload)| ArchiveEntry { payload, ..entry })
        .collect())
}

/// Group an already-parsed table and build its archive.
///
/// # Errors
/// * [`SplitError::ColumnNotFound`] if `opts.split_column` is not a column of `table`.
/// * [`SplitError::FilenameCollision`] if two group keys map to the same entry name.
/// * Serialization or archive errors.
pub fn export_groups(table: &Table, opts: &SplitOptions) -> Result<SplitOutput> {
    let groups = group_by_column(table, &opts.split_column, opts.group_order)?;
    let entries = group_entries(&groups, opts)?;
    let archive = build_archive(&entries)?;

    let report = ExportReport {
        split_column: opts.split_column.clone(),
        compression: opts.compression,
        total_rows: table.row_count(),
        archive_bytes: archive.len(),
        groups: groups
            .iter()
            .zip(&entries)
            .map(|(g, e)| GroupReport {
                key: g.key.key_label(),
                file_name: e.file_name.clone(),
                rows: g.row_count(),
                payload_bytes: e.payload.len(),
            })
            .collect(),
    };
    tracing::info!(
        column = %opts.split_column,
        groups = report.groups.len(),
        rows = report.total_rows,
        archive_bytes = report.archive_bytes,
        "exported groups"
    );

    Ok(SplitOutput {
        archive,
        file_name: opts.archive_name.clone(),
        media_type: ZIP_MEDIA_TYPE,
        report,
    })
}

/// Run the full pipeline over uploaded bytes.
///
/// # Errors
/// Any error of [`read_table`] or [`export_groups`].
pub fn split_bytes(bytes: &[u8], file_name: &str, opts: &SplitOptions) -> Result<SplitOutput> {
    let table = read_table(bytes, file_name, opts.delimiter)?;
    export_groups(&table, opts)
}

/// Run the full pipeline over a file on disk.
///
/// # Errors
/// Any error of [`read_table_file`] or [`export_groups`].
pub fn split_file(path: impl AsRef<Path>, opts: &SplitOptions) -> Result<SplitOutput> {
    let table = read_table_file(path, opts.delimiter)?;
    export_groups(&table, opts)
}
