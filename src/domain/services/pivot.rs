use std::cmp::Ordering;
use std::collections::HashMap;

use indexmap::IndexSet;

use crate::domain::entities::cell::natural_cmp_str;
use crate::domain::entities::row::GroupedRow;
use crate::domain::entities::series::PivotData;

/// Count pivot of `rows` by `row_attrs` × `col_attrs`.
///
/// With no attributes on an axis that axis has a single empty key, so every
/// row lands in one bucket along it. Keys are sorted numbers-first.
pub fn build_pivot(rows: &[GroupedRow], row_attrs: &[String], col_attrs: &[String]) -> PivotData {
    let mut cells: HashMap<(Vec<String>, Vec<String>), f64> = HashMap::new();
    let mut seen_rows: IndexSet<Vec<String>> = IndexSet::new();
    let mut seen_cols: IndexSet<Vec<String>> = IndexSet::new();

    for row in rows {
        let row_key = key_for(row, row_attrs);
        let col_key = key_for(row, col_attrs);
        seen_rows.insert(row_key.clone());
        seen_cols.insert(col_key.clone());
        *cells.entry((row_key, col_key)).or_insert(0.0) += 1.0;
    }

    let mut row_keys: Vec<Vec<String>> = seen_rows.into_iter().collect();
    let mut col_keys: Vec<Vec<String>> = seen_cols.into_iter().collect();
    row_keys.sort_by(|a, b| cmp_keys(a, b));
    col_keys.sort_by(|a, b| cmp_keys(a, b));

    let matrix = row_keys
        .iter()
        .map(|row_key| {
            col_keys
                .iter()
                .map(|col_key| {
                    cells
                        .get(&(row_key.clone(), col_key.clone()))
                        .copied()
                        .unwrap_or(0.0)
                })
                .collect()
        })
        .collect();

    PivotData {
        row_attrs: row_attrs.to_vec(),
        col_attrs: col_attrs.to_vec(),
        row_keys,
        col_keys,
        matrix,
    }
}

fn key_for(row: &GroupedRow, attrs: &[String]) -> Vec<String> {
    attrs.iter().map(|attr| row.attribute(attr)).collect()
}

fn cmp_keys(a: &[String], b: &[String]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| natural_cmp_str(x, y))
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}
