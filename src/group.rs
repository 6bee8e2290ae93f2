//! Grouping engine: partition a table's rows by the values of one column.
//!
//! Rows are assigned with an explicit insertion-ordered map: a hash index from key to slot, and
//! a vector of slots in the order their key first appeared. Every row lands in exactly one
//! group and rows keep their source order within a group.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SplitError};
use crate::table::{Table, Value};

/// Ordering of the groups returned by [`group_by_column`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupOrder {
    /// Order in which each key first appears in the table.
    #[default]
    FirstSeen,
    /// Ascending key order (empties first, then booleans, integers, floats, text).
    Sorted,
}

/// One key and the rows that carry it.
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub key: Value,
    pub table: Table,
}

impl Group {
    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }
}

/// Partition `table` by the values in `column`.
///
/// The result is a pure function of its inputs: the same table, column and order always give
/// the same groups in the same order.
///
/// # Errors
/// Returns [`SplitError::ColumnNotFound`] if `column` is not one of the table's columns.
pub fn group_by_column(table: &Table, column: &str, order: GroupOrder) -> Result<Vec<Group>> {
    let idx = table
        .column_index(column)
        .ok_or_else(|| SplitError::ColumnNotFound {
            column: column.to_string(),
            available: table.columns().to_vec(),
        })?;

    let mut slots: HashMap<&Value, usize> = HashMap::new();
    let mut buckets: Vec<(Value, Vec<Vec<Value>>)> = Vec::new();
    for row in table.rows() {
        let key = &row[idx];
        let slot = *slots.entry(key).or_insert_with(|| {
            buckets.push((key.clone(), Vec::new()));
            buckets.len() - 1
        });
        buckets[slot].1.push(row.clone());
    }

    if order == GroupOrder::Sorted {
        buckets.sort_by(|a, b| a.0.cmp(&b.0));
    }

    tracing::debug!(column, groups = buckets.len(), rows = table.row_count(), "grouped rows");
    Ok(buckets
        .into_iter()
        .map(|(key, rows)| Group {
            key,
            table: table.with_rows(rows),
        })
        .collect())
}
