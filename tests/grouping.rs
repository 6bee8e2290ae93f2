use ironsplit::testing::*;
use ironsplit::*;

fn keys(groups: &[Group]) -> Vec<Value> {
    groups.iter().map(|g| g.key.clone()).collect()
}

#[test]
fn regions_split_into_two_groups() -> anyhow::Result<()> {
    let table = regions_table();
    let groups = group_by_column(&table, "region", GroupOrder::FirstSeen)?;

    assert_eq!(keys(&groups), [Value::from("East"), Value::from("West")]);
    let east: Vec<_> = groups[0].table.column("sales").unwrap().cloned().collect();
    let west: Vec<_> = groups[1].table.column("sales").unwrap().cloned().collect();
    assert_eq!(east, [Value::Int(10), Value::Int(30)]);
    assert_eq!(west, [Value::Int(20)]);
    assert_rows_conserved(&table, &groups);
    Ok(())
}

#[test]
fn groups_follow_first_appearance() -> anyhow::Result<()> {
    let table = read_table(b"k\nb\na\nb\nc\na\n", "k.csv", None)?;
    let groups = group_by_column(&table, "k", GroupOrder::FirstSeen)?;
    assert_eq!(keys(&groups), [Value::from("b"), Value::from("a"), Value::from("c")]);
    Ok(())
}

#[test]
fn sorted_order_is_available() -> anyhow::Result<()> {
    let table = read_table(b"k\nb\na\nb\nc\na\n", "k.csv", None)?;
    let groups = group_by_column(&table, "k", GroupOrder::Sorted)?;
    assert_eq!(keys(&groups), [Value::from("a"), Value::from("b"), Value::from("c")]);
    assert_rows_conserved(&table, &groups);
    Ok(())
}

#[test]
fn missing_column_is_reported_with_choices() {
    let err = group_by_column(&regions_table(), "country", GroupOrder::FirstSeen).unwrap_err();
    match err {
        SplitError::ColumnNotFound { column, available } => {
            assert_eq!(column, "country");
            assert_eq!(available, ["region", "sales"]);
        }
        other => panic!("expected ColumnNotFound, got {other:?}"),
    }
}

#[test]
fn grouping_is_deterministic() -> anyhow::Result<()> {
    let table = read_table(mixed_keys_csv().as_bytes(), "mixed.csv", None)?;
    let a = group_by_column(&table, "k", GroupOrder::FirstSeen)?;
    let b = group_by_column(&table, "k", GroupOrder::FirstSeen)?;
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn empty_and_mixed_keys_keep_every_row() -> anyhow::Result<()> {
    let table = read_table(mixed_keys_csv().as_bytes(), "mixed.csv", None)?;
    let groups = group_by_column(&table, "k", GroupOrder::FirstSeen)?;

    assert_eq!(
        keys(&groups),
        [Value::float(1.0), Value::Empty, Value::float(2.5), Value::Bool(true)]
    );
    let counts: Vec<usize> = groups.iter().map(Group::row_count).collect();
    assert_eq!(counts, [2, 2, 1, 1]);
    assert_rows_conserved(&table, &groups);
    Ok(())
}

#[test]
fn integer_and_float_spellings_share_a_group() -> anyhow::Result<()> {
    let table = read_table(b"k,v\n1,a\n1.0,b\n2,c\n", "k.csv", None)?;
    let groups = group_by_column(&table, "k", GroupOrder::FirstSeen)?;

    assert_eq!(keys(&groups), [Value::float(1.0), Value::float(2.0)]);
    let counts: Vec<usize> = groups.iter().map(Group::row_count).collect();
    assert_eq!(counts, [2, 1]);

    let names: Vec<String> = groups
        .iter()
        .map(|g| entry_file_name(&g.key, SanitizeMode::PathSafe, PayloadCompression::None))
        .collect();
    assert_eq!(names, ["group_1.0.csv", "group_2.0.csv"]);
    assert_rows_conserved(&table, &groups);
    Ok(())
}

#[test]
fn integer_only_columns_stay_integers() -> anyhow::Result<()> {
    let table = read_table(b"k,n\nx,1\ny,2.5\n", "n.csv", None)?;
    let keys: Vec<_> = table.column("k").unwrap().cloned().collect();
    let n: Vec<_> = table.column("n").unwrap().cloned().collect();
    assert_eq!(keys, [Value::from("x"), Value::from("y")]);
    assert_eq!(n, [Value::float(1.0), Value::float(2.5)]);

    let table = read_table(b"k,n\nx,1\ny,2\n", "n.csv", None)?;
    let n: Vec<_> = table.column("n").unwrap().cloned().collect();
    assert_eq!(n, [Value::Int(1), Value::Int(2)]);
    Ok(())
}

#[test]
fn rows_keep_source_order_within_a_group() -> anyhow::Result<()> {
    let table = read_table(b"k,n\nx,1\ny,2\nx,3\nx,4\ny,5\n", "n.csv", None)?;
    let groups = group_by_column(&table, "k", GroupOrder::FirstSeen)?;
    let x: Vec<_> = groups[0].table.column("n").unwrap().cloned().collect();
    assert_eq!(x, [Value::Int(1), Value::Int(3), Value::Int(4)]);
    Ok(())
}

#[test]
fn header_only_table_has_no_groups() -> anyhow::Result<()> {
    let table = read_table(b"region,sales\n", "empty.csv", None)?;
    let groups = group_by_column(&table, "region", GroupOrder::FirstSeen)?;
    assert!(groups.is_empty());
    Ok(())
}

#[test]
fn groups_keep_all_columns() -> anyhow::Result<()> {
    let table = regions_table();
    let groups = group_by_column(&table, "sales", GroupOrder::FirstSeen)?;
    assert_eq!(groups.len(), 3);
    for g in &groups {
        assert_eq!(g.table.columns(), table.columns());
    }
    Ok(())
}
