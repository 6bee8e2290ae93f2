//! Tabular readers: format detection, delimited text, spreadsheets and gzip handling.

pub mod compression;
pub mod format;
pub mod reader;

#[cfg_attr(docsrs, doc(cfg(feature = "io-csv")))]
#[cfg(feature = "io-csv")]
pub mod csv;

#[cfg_attr(docsrs, doc(cfg(feature = "io-excel")))]
#[cfg(feature = "io-excel")]
pub mod excel;

use std::collections::HashSet;

use crate::table::Value;

/// Make header names usable as unique column names.
///
/// Blank names become `Unnamed: <position>`. A repeated name gets the first free `.1`, `.2`, ...
/// suffix, so `["a", "a", "a"]` becomes `["a", "a.1", "a.2"]`.
pub fn normalize_headers(headers: Vec<String>) -> Vec<String> {
    let named: Vec<String> = headers
        .into_iter()
        .enumerate()
        .map(|(i, h)| {
            if h.trim().is_empty() {
                format!("Unnamed: {i}")
            } else {
                h
            }
        })
        .collect();

    let mut taken: HashSet<String> = HashSet::with_capacity(named.len());
    let mut out = Vec::with_capacity(named.len());
    for name in named {
        if taken.insert(name.clone()) {
            out.push(name);
            continue;
        }
        let mut n = 1usize;
        let unique = loop {
            let candidate = format!("{name}.{n}");
            if !taken.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };
        taken.insert(unique.clone());
        out.push(unique);
    }
    out
}

/// Give each numeric column a single numeric type.
///
/// A column holding any float has its integers widened to floats, so `1` and `1.0` compare
/// equal as group keys and the column renders uniformly.
pub fn promote_numeric_columns(rows: &mut [Vec<Value>], width: usize) {
    for col in 0..width {
        let has_float = rows
            .iter()
            .any(|row| matches!(row.get(col), Some(Value::Float(_))));
        if !has_float {
            continue;
        }
        for row in rows.iter_mut() {
            if let Some(cell) = row.get_mut(col)
                && let Value::Int(i) = *cell
            {
                *cell = Value::float(i as f64);
            }
        }
    }
}
