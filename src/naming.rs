//! Archive entry names derived from group keys.
//!
//! An entry is named `group_<fragment><suffix>`, where the fragment is the key's text with
//! unsafe characters replaced by `_` and the suffix is `.csv` or `.csv.gz`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::serialize::PayloadCompression;
use crate::table::Value;

pub const ENTRY_PREFIX: &str = "group_";

static NOT_PATH_SAFE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\p{Alphabetic}\p{Nd}_.\-]").expect("static pattern is valid")
});

/// Which characters of a key are replaced with `_`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SanitizeMode {
    /// Everything except letters, digits, `_`, `.` and `-`. Keys containing `/`, `\`, control
    /// characters or other whitespace cannot introduce directories into the archive.
    #[default]
    PathSafe,
    /// Only the space character; all other characters are kept as-is.
    SpacesOnly,
}

/// Replace the characters `mode` disallows with `_`, one for one.
pub fn sanitize(label: &str, mode: SanitizeMode) -> String {
    match mode {
        SanitizeMode::PathSafe => NOT_PATH_SAFE.replace_all(label, "_").into_owned(),
        SanitizeMode::SpacesOnly => label.replace(' ', "_"),
    }
}

/// Archive entry name for a group key, e.g. `group_New_York.csv`.
pub fn entry_file_name(key: &Value, mode: SanitizeMode, compression: PayloadCompression) -> String {
    format!(
        "{ENTRY_PREFIX}{}{}",
        sanitize(&key.key_label(), mode),
        compression.suffix()
    )
}
