//! Assertion functions for grouping and archive outputs.

use crate::archive::read_archive;
use crate::group::Group;
use crate::io::compression::gunzip;
use crate::naming::{SanitizeMode, entry_file_name};
use crate::serialize::{PayloadCompression, table_to_csv};
use crate::table::Table;

/// Assert that `groups` hold exactly the rows of `table`, none lost and none duplicated.
///
/// # Panics
///
/// Panics if the total row count differs or the row multisets differ.
pub fn assert_rows_conserved(table: &Table, groups: &[Group]) {
    let total: usize = groups.iter().map(Group::row_count).sum();
    assert_eq!(
        total,
        table.row_count(),
        "Row count mismatch:\n  Source rows: {}\n  Grouped rows: {total}",
        table.row_count()
    );

    let mut expected = table.rows().to_vec();
    let mut actual: Vec<_> = groups
        .iter()
        .flat_map(|g| g.table.rows().iter().cloned())
        .collect();
    expected.sort();
    actual.sort();
    assert_eq!(actual, expected, "Grouped rows are not a permutation of the source rows");
}

/// Assert that `archive` has one entry per group, in group order, each decoding to the group's CSV.
///
/// # Panics
///
/// Panics if the archive cannot be read, an entry is missing, misnamed, or has different content.
pub fn assert_archive_matches_groups(
    archive: &[u8],
    groups: &[Group],
    compression: PayloadCompression,
    sanitize: SanitizeMode,
) {
    let entries = read_archive(archive).expect("archive should be readable");
    assert_eq!(
        entries.len(),
        groups.len(),
        "Entry count mismatch:\n  Groups: {}\n  Entries: {:?}",
        groups.len(),
        entries.iter().map(|(n, _)| n).collect::<Vec<_>>()
    );

    for (i, ((name, payload), group)) in entries.iter().zip(groups).enumerate() {
        let expected_name = entry_file_name(&group.key, sanitize, compression);
        assert_eq!(name, &expected_name, "Entry name mismatch at index {i}");

        let csv = match compression {
            PayloadCompression::None => payload.clone(),
            PayloadCompression::Gzip => gunzip(payload).expect("payload should gunzip"),
        };
        let expected = table_to_csv(&group.table).expect("group should serialize");
        assert_eq!(
            String::from_utf8_lossy(&csv),
            String::from_utf8_lossy(&expected),
            "Entry content mismatch for {name}"
        );
    }
}
