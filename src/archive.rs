//! Archive builder: package named payloads into one in-memory ZIP.
//!
//! Entries are deflated inside the archive regardless of whether the payload was already
//! gzip-compressed. Timestamps and permissions are fixed, so the same entry list always
//! produces the same bytes.

use std::collections::HashMap;
use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{Result, SplitError};

/// Media type of the produced archive.
pub const ZIP_MEDIA_TYPE: &str = "application/zip";

/// One named payload inside the archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub file_name: String,
    pub payload: Vec<u8>,
    /// Display form of the group key the entry came from, used in collision errors.
    pub key: Option<String>,
}

impl ArchiveEntry {
    pub fn new(file_name: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            payload,
            key: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    fn origin(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.file_name)
    }
}

/// Fail if two entries share a file name.
///
/// # Errors
/// Returns [`SplitError::FilenameCollision`] naming the first repeated file name.
pub fn check_unique_names(entries: &[ArchiveEntry]) -> Result<()> {
    let mut seen: HashMap<&str, &ArchiveEntry> = HashMap::with_capacity(entries.len());
    for entry in entries {
        if let Some(first) = seen.insert(entry.file_name.as_str(), entry) {
            return Err(SplitError::FilenameCollision {
                file_name: entry.file_name.clone(),
                first_key: first.origin().to_string(),
                second_key: entry.origin().to_string(),
            });
        }
    }
    Ok(())
}

/// Build a ZIP archive holding `entries` in the given order.
///
/// # Errors
/// Returns [`SplitError::FilenameCollision`] before writing anything if names repeat, or
/// [`SplitError::Archive`] / [`SplitError::Io`] if the zip writer fails.
pub fn build_archive(entries: &[ArchiveEntry]) -> Result<Vec<u8>> {
    check_unique_names(entries)?;

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
        .unix_permissions(0o644);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for entry in entries {
        zip.start_file(entry.file_name.as_str(), options)?;
        zip.write_all(&entry.payload)?;
        tracing::trace!(file_name = %entry.file_name, bytes = entry.payload.len(), "archived entry");
    }
    let bytes = zip.finish()?.into_inner();
    tracing::debug!(entries = entries.len(), bytes = bytes.len(), "built archive");
    Ok(bytes)
}

/// Read every entry of an archive back as `(file name, bytes)` in stored order.
///
/// # Errors
/// Returns [`SplitError::Archive`] if `bytes` is not a readable ZIP.
pub fn read_archive(bytes: &[u8]) -> Result<Vec<(String, Vec<u8>)>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut out = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;
        out.push((file.name().to_string(), buf));
    }
    Ok(out)
}
