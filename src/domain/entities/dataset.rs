use std::collections::BTreeSet;

use crate::domain::entities::cell::CellValue;

pub const PAGE_SIZE_OPTIONS: [usize; 3] = [10, 20, 30];
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    pub column: String,
    pub term: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: usize,
    pub page_size: usize,
    pub global_search: String,
    pub column_filter: Option<ColumnFilter>,
    pub sort: Option<SortSpec>,
    pub hidden_columns: BTreeSet<String>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            global_search: String::new(),
            column_filter: None,
            sort: None,
            hidden_columns: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageRow {
    pub id: u64,
    pub cells: Vec<Option<CellValue>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub columns: Vec<String>,
    pub rows: Vec<PageRow>,
    pub total_rows: usize,
    pub page: usize,
    pub page_count: usize,
}
