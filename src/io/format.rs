//! Input format and delimiter selection.
//!
//! The format is decided from the uploaded file name alone, before any bytes are parsed, so an
//! unrecognized extension fails fast with [`SplitError::UnsupportedFormat`].

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SplitError};

/// Declared format of an uploaded file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// `.xlsx` or `.xls` workbook; the first worksheet is read.
    Excel,
    /// `.csv`, always comma separated.
    Csv,
    /// `.txt` with an explicit [`Delimiter`].
    Text,
}

impl InputFormat {
    /// Detect the format from a file name's extension, case-insensitively.
    ///
    /// A trailing `.gz` is skipped so `sales.csv.gz` is treated as CSV; the bytes themselves are
    /// decompressed by the reader.
    ///
    /// # Errors
    /// Returns [`SplitError::UnsupportedFormat`] for any other extension, including none.
    pub fn from_file_name(name: impl AsRef<Path>) -> Result<Self> {
        let path = name.as_ref();
        let mut ext = lower_extension(path);
        if ext == "gz"
            && let Some(stem) = path.file_stem()
        {
            ext = lower_extension(Path::new(stem));
        }
        match ext.as_str() {
            "xlsx" | "xls" => Ok(InputFormat::Excel),
            "csv" => Ok(InputFormat::Csv),
            "txt" => Ok(InputFormat::Text),
            _ => Err(SplitError::UnsupportedFormat {
                extension: if ext.is_empty() {
                    "(none)".to_string()
                } else {
                    format!(".{ext}")
                },
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InputFormat::Excel => "excel",
            InputFormat::Csv => "csv",
            InputFormat::Text => "txt",
        }
    }
}

fn lower_extension(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Field delimiter for `.txt` input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Semicolon,
    Pipe,
}

impl Delimiter {
    pub const ALL: [Delimiter; 4] = [
        Delimiter::Comma,
        Delimiter::Tab,
        Delimiter::Semicolon,
        Delimiter::Pipe,
    ];

    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
            Delimiter::Semicolon => b';',
            Delimiter::Pipe => b'|',
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Delimiter::Comma => "comma",
            Delimiter::Tab => "tab",
            Delimiter::Semicolon => "semicolon",
            Delimiter::Pipe => "pipe",
        };
        f.write_str(s)
    }
}

impl FromStr for Delimiter {
    type Err = String;

    /// Accepts either the delimiter character itself or its name.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "," => return Ok(Delimiter::Comma),
            "\t" => return Ok(Delimiter::Tab),
            ";" => return Ok(Delimiter::Semicolon),
            "|" => return Ok(Delimiter::Pipe),
            _ => {}
        }
        match s.to_ascii_lowercase().as_str() {
            "comma" => Ok(Delimiter::Comma),
            "tab" | "\\t" => Ok(Delimiter::Tab),
            "semicolon" => Ok(Delimiter::Semicolon),
            "pipe" => Ok(Delimiter::Pipe),
            other => Err(format!(
                "unknown delimiter '{other}' (expected comma, tab, semicolon or pipe)"
            )),
        }
    }
}
