use std::cmp::Ordering;

use indexmap::IndexSet;

use crate::domain::entities::cell::{display_cell, CellValue};
use crate::domain::entities::dataset::{
    PageQuery, PageResult, PageRow, SortDirection, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS,
};
use crate::domain::entities::row::NormalizedRow;

/// Filters, sorts and pages normalized rows for the table view.
///
/// Duplicate display headers collapse into one column. Search terms match
/// case-insensitively as substrings of the cell's display text; the global
/// search only looks at visible columns.
pub fn query_rows(headers: &[String], rows: &[NormalizedRow], query: &PageQuery) -> PageResult {
    let columns = visible_columns(headers, query);

    let global = query.global_search.trim().to_lowercase();
    let column_filter = query
        .column_filter
        .as_ref()
        .map(|filter| (filter.column.as_str(), filter.term.trim().to_lowercase()))
        .filter(|(_, term)| !term.is_empty());

    let mut matching: Vec<&NormalizedRow> = rows
        .iter()
        .filter(|row| {
            global.is_empty()
                || columns
                    .iter()
                    .any(|column| contains_term(row.get(column), &global))
        })
        .filter(|row| match &column_filter {
            Some((column, term)) => contains_term(row.get(column), term),
            None => true,
        })
        .collect();

    if let Some(sort) = &query.sort {
        matching.sort_by(|a, b| {
            cmp_cells(a.get(&sort.column), b.get(&sort.column), sort.direction)
                .then_with(|| a.id().cmp(&b.id()))
        });
    }

    let page_size = if PAGE_SIZE_OPTIONS.contains(&query.page_size) {
        query.page_size
    } else {
        DEFAULT_PAGE_SIZE
    };
    let total_rows = matching.len();
    let page_count = total_rows.div_ceil(page_size).max(1);
    let page = query.page.min(page_count - 1);

    let rows = matching
        .into_iter()
        .skip(page * page_size)
        .take(page_size)
        .map(|row| PageRow {
            id: row.id(),
            cells: columns.iter().map(|column| row.get(column).cloned()).collect(),
        })
        .collect();

    PageResult {
        columns,
        rows,
        total_rows,
        page,
        page_count,
    }
}

fn visible_columns(headers: &[String], query: &PageQuery) -> Vec<String> {
    let distinct: IndexSet<&String> = headers.iter().collect();
    let visible: Vec<String> = distinct
        .iter()
        .filter(|header| !query.hidden_columns.contains(header.as_str()))
        .map(|header| header.to_string())
        .collect();
    if visible.is_empty() {
        distinct.into_iter().cloned().collect()
    } else {
        visible
    }
}

fn contains_term(cell: Option<&CellValue>, term: &str) -> bool {
    display_cell(cell).to_lowercase().contains(term)
}

/// Absent cells sort last in either direction.
fn cmp_cells(a: Option<&CellValue>, b: Option<&CellValue>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match direction {
            SortDirection::Asc => a.natural_cmp(b),
            SortDirection::Desc => b.natural_cmp(a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
