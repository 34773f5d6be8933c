use crate::domain::entities::grid::RawGrid;
use crate::domain::entities::header::HeaderSpec;
use crate::domain::entities::row::NormalizedRow;
use crate::domain::services::schema::SchemaRecord;

/// Display headers plus one normalized row per data row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    pub display_headers: Vec<String>,
    pub rows: Vec<NormalizedRow>,
}

/// Projects `grid` through `spec`.
///
/// Headers outside the allow-list are dropped; surviving headers are renamed.
/// When two source headers share a display name the later column wins, even
/// if its cell is empty.
pub fn project(grid: &RawGrid, spec: &HeaderSpec) -> Projection {
    let allowed: Vec<(usize, &str)> = grid
        .headers
        .iter()
        .enumerate()
        .filter(|(_, header)| spec.allows(header))
        .map(|(idx, header)| (idx, spec.display_name(header)))
        .collect();

    let display_headers = allowed
        .iter()
        .map(|(_, display)| display.to_string())
        .collect();

    let rows = grid
        .rows
        .iter()
        .enumerate()
        .map(|(row_idx, _)| {
            let mut row = NormalizedRow::new(row_idx as u64 + 1);
            for (col_idx, display) in &allowed {
                row.set(*display, grid.cell(row_idx, *col_idx).cloned());
            }
            row
        })
        .collect();

    Projection {
        display_headers,
        rows,
    }
}

/// Binds normalized rows to a typed schema record.
pub fn bind_records<R: SchemaRecord>(rows: &[NormalizedRow]) -> Vec<R> {
    rows.iter().map(R::from_row).collect()
}
