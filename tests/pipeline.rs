use ironsplit::io::compression::gunzip;
use ironsplit::testing::*;
use ironsplit::*;

fn entry_names(out: &SplitOutput) -> Vec<String> {
    read_archive(&out.archive)
        .unwrap()
        .into_iter()
        .map(|(name, _)| name)
        .collect()
}

#[test]
fn scenario_plain_csv_groups() -> anyhow::Result<()> {
    let opts = SplitOptions::new("region");
    let out = split_bytes(regions_csv().as_bytes(), "sales.csv", &opts)?;

    assert_eq!(entry_names(&out), ["group_East.csv", "group_West.csv"]);
    assert_eq!(out.file_name, "split_groups.zip");
    assert_eq!(out.media_type, "application/zip");

    let groups = group_by_column(&regions_table(), "region", GroupOrder::FirstSeen)?;
    assert_archive_matches_groups(&out.archive, &groups, opts.compression, opts.sanitize);

    let entries = read_archive(&out.archive)?;
    assert_eq!(entries[0].1, b"region,sales\nEast,10\nEast,30\n");
    assert_eq!(entries[1].1, b"region,sales\nWest,20\n");
    Ok(())
}

#[test]
fn scenario_gzip_groups() -> anyhow::Result<()> {
    let plain = split_bytes(regions_csv().as_bytes(), "sales.csv", &SplitOptions::new("region"))?;
    let opts = SplitOptions::new("region").with_compression(PayloadCompression::Gzip);
    let packed = split_bytes(regions_csv().as_bytes(), "sales.csv", &opts)?;

    assert_eq!(entry_names(&packed), ["group_East.csv.gz", "group_West.csv.gz"]);
    let plain_entries = read_archive(&plain.archive)?;
    let packed_entries = read_archive(&packed.archive)?;
    for ((_, csv), (_, gz)) in plain_entries.iter().zip(&packed_entries) {
        assert_eq!(&gunzip(gz)?, csv);
    }
    Ok(())
}

#[test]
fn scenario_key_with_space() -> anyhow::Result<()> {
    let out = split_bytes(new_york_csv().as_bytes(), "cities.csv", &SplitOptions::new("city"))?;
    assert_eq!(entry_names(&out), ["group_New_York.csv", "group_Boston.csv"]);
    Ok(())
}

#[test]
fn scenario_missing_column() {
    let err = split_bytes(regions_csv().as_bytes(), "sales.csv", &SplitOptions::new("country"))
        .unwrap_err();
    assert!(matches!(err, SplitError::ColumnNotFound { .. }));
}

#[test]
fn scenario_pdf_upload() {
    let err = split_bytes(b"%PDF-1.7", "report.pdf", &SplitOptions::new("region")).unwrap_err();
    assert!(matches!(err, SplitError::UnsupportedFormat { .. }));
}

#[test]
fn repeated_exports_are_identical() -> anyhow::Result<()> {
    let table = regions_table();
    for compression in [PayloadCompression::None, PayloadCompression::Gzip] {
        let opts = SplitOptions::new("region").with_compression(compression);
        let first = export_groups(&table, &opts)?;
        let second = export_groups(&table, &opts)?;
        assert_eq!(first.archive, second.archive);
        assert_eq!(first.report, second.report);
    }
    Ok(())
}

#[test]
fn colliding_names_abort_the_export() -> anyhow::Result<()> {
    let table = read_table(b"k,v\na b,1\na_b,2\n", "k.csv", None)?;
    let err = export_groups(&table, &SplitOptions::new("k")).unwrap_err();
    match err {
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
    Ok(())
}

#[test]
fn path_safe_naming_can_collide_where_spaces_only_does_not() -> anyhow::Result<()> {
    let table = read_table(b"k,v\na/b,1\na_b,2\n", "k.csv", None)?;
    let strict = export_groups(&table, &SplitOptions::new("k"));
    assert!(matches!(strict, Err(SplitError::FilenameCollision { .. })));

    let lenient = SplitOptions::new("k").with_sanitize(SanitizeMode::SpacesOnly);
    let out = export_groups(&table, &lenient)?;
    assert_eq!(entry_names(&out), ["group_a/b.csv", "group_a_b.csv"]);
    Ok(())
}

#[test]
fn parallel_matches_sequential() -> anyhow::Result<()> {
    let mut csv = String::from("k,n\n");
    for i in 0..2_000 {
        csv.push_str(&format!("key{},{}\n", i % 37, i));
    }
    let table = read_table(csv.as_bytes(), "big.csv", None)?;

    let seq = export_groups(&table, &SplitOptions::new("k").with_compression(PayloadCompression::Gzip))?;
    let par_opts = SplitOptions::new("k")
        .with_compression(PayloadCompression::Gzip)
        .with_exec_mode(ExecMode::Parallel { threads: Some(4) });
    let par = export_groups(&table, &par_opts)?;

    assert_eq!(seq.archive, par.archive);
    let groups = group_by_column(&table, "k", GroupOrder::FirstSeen)?;
    assert_rows_conserved(&table, &groups);
    assert_archive_matches_groups(&par.archive, &groups, PayloadCompression::Gzip, SanitizeMode::PathSafe);
    Ok(())
}

#[test]
fn report_describes_each_group() -> anyhow::Result<()> {
    let out = export_groups(&regions_table(), &SplitOptions::new("region"))?;
    let report = &out.report;
    assert_eq!(report.split_column, "region");
    assert_eq!(report.total_rows, 3);
    assert_eq!(report.archive_bytes, out.archive.len());

    let summary: Vec<(&str, &str, usize)> = report
        .groups
        .iter()
        .map(|g| (g.key.as_str(), g.file_name.as_str(), g.rows))
        .collect();
    assert_eq!(
        summary,
        [("East", "group_East.csv", 2), ("West", "group_West.csv", 1)]
    );
    assert_eq!(report.groups[1].payload_bytes, "region,sales\nWest,20\n".len());

    let json = serde_json::to_value(report)?;
    assert_eq!(json["compression"], "none");
    assert_eq!(json["groups"][0]["file_name"], "group_East.csv");
    Ok(())
}

#[test]
fn split_file_reads_delimiter_from_options() -> anyhow::Result<()> {
    let (_dir, path) = fixture_file("sales.txt", regions_csv().replace(',', "\t"))?;
    let opts = SplitOptions::new("region")
        .with_delimiter(Delimiter::Tab)
        .with_archive_name("regions.zip");
    let out = split_file(&path, &opts)?;
    assert_eq!(out.file_name, "regions.zip");
    assert_eq!(entry_names(&out), ["group_East.csv", "group_West.csv"]);
    Ok(())
}

#[test]
fn builders_override_loaded_options() -> anyhow::Result<()> {
    let (_dir, path) = fixture_file("opts.json", r#"{ "split_column": "sales" }"#)?;
    let opts = SplitOptions::from_json_file(&path)?
        .with_split_column("region")
        .with_group_order(GroupOrder::Sorted);
    assert_eq!(opts.split_column, "region");

    let table = read_table(b"region,sales\nWest,1\nEast,2\nWest,3\n", "s.csv", None)?;
    let out = export_groups(&table, &opts)?;
    assert_eq!(entry_names(&out), ["group_East.csv", "group_West.csv"]);
    Ok(())
}

#[test]
fn options_load_from_json_with_defaults() -> anyhow::Result<()> {
    let (_dir, path) = fixture_file(
        "opts.json",
        r#"{
            "split_column": "region",
            "compression": "gzip",
            "group_order": "sorted",
            "exec_mode": { "mode": "parallel", "threads": 2 }
        }"#,
    )?;
    let opts = SplitOptions::from_json_file(&path)?;
    assert_eq!(opts.split_column, "region");
    assert_eq!(opts.compression, PayloadCompression::Gzip);
    assert_eq!(opts.group_order, GroupOrder::Sorted);
    assert_eq!(opts.exec_mode, ExecMode::Parallel { threads: Some(2) });
    assert_eq!(opts.sanitize, SanitizeMode::PathSafe);
    assert_eq!(opts.archive_name, DEFAULT_ARCHIVE_NAME);
    assert_eq!(opts.delimiter, None);
    Ok(())
}

#[test]
fn malformed_options_are_a_parse_error() -> anyhow::Result<()> {
    let (_dir, path) = fixture_file("opts.json", "{ not json")?;
    let err = SplitOptions::from_json_file(&path).unwrap_err();
    assert!(matches!(err, SplitError::Parse { ref format, .. } if format == "config"));
    Ok(())
}
