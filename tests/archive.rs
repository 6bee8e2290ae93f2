use std::io::Cursor;

use ironsplit::*;
use zip::{CompressionMethod, ZipArchive};

fn entries() -> Vec<ArchiveEntry> {
    vec![
        ArchiveEntry::new("group_East.csv", b"region,sales\nEast,10\nEast,30\n".to_vec()),
        ArchiveEntry::new("group_West.csv", b"region,sales\nWest,20\n".to_vec()),
    ]
}

#[test]
fn entries_round_trip_in_order() -> anyhow::Result<()> {
    let bytes = build_archive(&entries())?;
    let read = read_archive(&bytes)?;
    let expected: Vec<(String, Vec<u8>)> = entries()
        .into_iter()
        .map(|e| (e.file_name, e.payload))
        .collect();
    assert_eq!(read, expected);
    Ok(())
}

#[test]
fn entries_are_deflated() -> anyhow::Result<()> {
    let bytes = build_archive(&entries())?;
    let mut zip = ZipArchive::new(Cursor::new(bytes))?;
    for i in 0..zip.len() {
        assert_eq!(zip.by_index(i)?.compression(), CompressionMethod::Deflated);
    }
    Ok(())
}

#[test]
fn archive_bytes_are_reproducible() -> anyhow::Result<()> {
    assert_eq!(build_archive(&entries())?, build_archive(&entries())?);
    Ok(())
}

#[test]
fn duplicate_names_are_rejected() {
    let dup = vec![
        ArchiveEntry::new("group_a_b.csv", vec![1]).with_key("a b"),
        ArchiveEntry::new("group_a_b.csv", vec![2]).with_key("a_b"),
    ];
    match build_archive(&dup).unwrap_err() {
        SplitError::FilenameCollision {
            file_name,
            first_key,
            second_key,
        } => {
            assert_eq!(file_name, "group_a_b.csv");
            assert_eq!(first_key, "a b");
            assert_eq!(second_key, "a_b");
        }
        other => panic!("expected FilenameCollision, got {other:?}"),
    }
}

#[test]
fn empty_entry_list_is_a_valid_archive() -> anyhow::Result<()> {
    let bytes = build_archive(&[])?;
    assert!(read_archive(&bytes)?.is_empty());
    Ok(())
}

#[test]
fn garbage_is_not_an_archive() {
    assert!(matches!(read_archive(b"nope"), Err(SplitError::Archive(_))));
}
