//! Pre-built tables and file contents for common scenarios.

use std::path::PathBuf;

use tempfile::TempDir;

use crate::table::{Table, Value};

/// `region`/`sales` table: East 10, West 20, East 30.
#[must_use]
pub fn regions_table() -> Table {
    Table::new(
        vec!["region".to_string(), "sales".to_string()],
        vec![
            vec![Value::from("East"), Value::Int(10)],
            vec![Value::from("West"), Value::Int(20)],
            vec![Value::from("East"), Value::Int(30)],
        ],
    )
    .expect("fixture table is well formed")
}

/// CSV text of [`regions_table`].
#[must_use]
pub fn regions_csv() -> &'static str {
    "region,sales\nEast,10\nWest,20\nEast,30\n"
}

/// City data whose keys contain spaces.
#[must_use]
pub fn new_york_csv() -> &'static str {
    "city,pop\nNew York,8\nBoston,1\nNew York,9\n"
}

/// Mixed-type column with empty keys, for grouping edge cases.
#[must_use]
pub fn mixed_keys_csv() -> &'static str {
    "k,v\n1,a\n,b\n2.5,c\ntrue,d\n1,e\n,f\n"
}

/// Write `contents` to `name` inside a fresh temporary directory.
///
/// The directory lives as long as the returned [`TempDir`].
///
/// # Errors
/// Returns an error if the directory or file cannot be created.
pub fn fixture_file(name: &str, contents: impl AsRef<[u8]>) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(name);
    std::fs::write(&path, contents)?;
    Ok((dir, path))
}
