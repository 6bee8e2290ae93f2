//! Error taxonomy for the split pipeline.
//!
//! Every failure aborts only the export attempt that produced it; nothing in the crate retries,
//! and no variant is fatal to the host process.

use std::io;

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, SplitError>;

/// Error type for reading, grouping, serializing and archiving.
#[derive(Debug, Error)]
pub enum SplitError {
    /// The uploaded file's extension is not one of the recognized formats.
    #[error("unsupported file type '{extension}' (expected .xlsx, .xls, .csv or .txt)")]
    UnsupportedFormat { extension: String },

    /// The bytes do not conform to the declared format.
    #[error("failed to parse {format} input: {message}")]
    Parse { format: String, message: String },

    /// The split column does not exist in the table.
    #[error("column '{column}' not found (available: {})", .available.join(", "))]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    /// Two distinct group keys sanitize to the same archive entry name.
    #[error("group keys '{first_key}' and '{second_key}' both map to archive entry '{file_name}'")]
    FilenameCollision {
        file_name: String,
        first_key: String,
        second_key: String,
    },

    /// The requested behavior was compiled out.
    #[error("feature '{feature}' is not enabled in this build")]
    FeatureDisabled { feature: &'static str },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("zip archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

impl SplitError {
    pub(crate) fn parse(format: impl Into<String>, message: impl ToString) -> Self {
        SplitError::Parse {
            format: format.into(),
            message: message.to_string(),
        }
    }
}
