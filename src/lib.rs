//! # Ironsplit
//!
//! Split a spreadsheet or delimited text file into one CSV per distinct value of a chosen
//! column, and bundle the CSVs (optionally gzip-compressed) into a single ZIP archive.
//!
//! ## Pipeline
//!
//! ```text
//! bytes ──► read_table ──► Table ──► group_by_column ──► [Group]
//!                                                           │
//!        ZIP bytes ◄── build_archive ◄── [ArchiveEntry] ◄───┘ serialize_group + entry_file_name
//! ```
//!
//! - **Tabular reader** ([`io`]): `.xlsx`/`.xls` via calamine, `.csv`, and `.txt` with a chosen
//!   [`Delimiter`]. Unknown extensions are rejected before parsing.
//! - **Grouping engine** ([`group`]): rows partitioned by key, groups in first-seen order.
//! - **Group serializer** ([`serialize`]): header plus rows as CSV, optional deterministic gzip.
//! - **Archive builder** ([`archive`]): deflated ZIP, entry names from [`naming`].
//!
//! ## Quick Start
//!
//! ```
//! use ironsplit::*;
//! # fn main() -> ironsplit::Result<()> {
//! let csv = b"region,sales\nEast,10\nWest,20\nEast,30\n";
//! let out = split_bytes(csv, "sales.csv", &SplitOptions::new("region"))?;
//!
//! assert_eq!(out.file_name, "split_groups.zip");
//! let names: Vec<_> = out.report.groups.iter().map(|g| g.file_name.as_str()).collect();
//! assert_eq!(names, ["group_East.csv", "group_West.csv"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `io-csv` - Read `.csv` and `.txt` input
//! - `io-excel` - Read `.xlsx` and `.xls` input (calamine)
//! - `compression-gzip` - Gzip group payloads and accept gzip-compressed uploads (flate2)
//! - `parallel-io` - Serialize groups on a rayon pool with [`ExecMode::Parallel`]

pub mod archive;
pub mod error;
pub mod group;
pub mod io;
pub mod naming;
pub mod pipeline;
pub mod runner;
pub mod serialize;
pub mod table;
pub mod testing;

pub use archive::{ArchiveEntry, ZIP_MEDIA_TYPE, build_archive, read_archive};
pub use error::{Result, SplitError};
pub use group::{Group, GroupOrder, group_by_column};
pub use io::format::{Delimiter, InputFormat};
pub use io::reader::{read_table, read_table_file};
pub use naming::{SanitizeMode, entry_file_name, sanitize};
pub use pipeline::{
    DEFAULT_ARCHIVE_NAME, ExportReport, GroupReport, SplitOptions, SplitOutput, export_groups,
    group_entries, split_bytes, split_file,
};
pub use runner::ExecMode;
pub use serialize::{PayloadCompression, serialize_group, table_to_csv};
pub use table::{Table, Value};
