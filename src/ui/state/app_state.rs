use std::collections::BTreeSet;

use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::dataset::{ColumnFilter, PageQuery, SortDirection, SortSpec, DEFAULT_PAGE_SIZE};
use crate::domain::entities::series::Series;
use crate::domain::services::projector::Projection;
use crate::usecase::sequencer::RunSequencer;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewTab {
    Table,
    Pivot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSource {
    Pivot,
    Monthly,
}

#[derive(Clone, Copy)]
pub struct AppState {
    pub load_state: Signal<LoadState>,
    pub projection: Signal<Projection>,
    pub sequencer: Signal<RunSequencer>,
    pub reload_token: Signal<u64>,
    pub tab: Signal<ViewTab>,
    pub page: Signal<usize>,
    pub page_size: Signal<usize>,
    pub global_search: Signal<String>,
    pub column_search_col: Signal<Option<String>>,
    pub column_search_text: Signal<String>,
    pub sort_col: Signal<Option<String>>,
    pub sort_desc: Signal<bool>,
    pub hidden_columns: Signal<BTreeSet<String>>,
    pub pivot_rows: Signal<Vec<String>>,
    pub pivot_cols: Signal<Vec<String>>,
    pub chart_source: Signal<ChartSource>,
    pub chart: Signal<Series>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            load_state: use_signal(|| LoadState::Loading),
            projection: use_signal(Projection::default),
            sequencer: use_signal(RunSequencer::default),
            reload_token: use_signal(|| 0_u64),
            tab: use_signal(|| ViewTab::Table),
            page: use_signal(|| 0_usize),
            page_size: use_signal(|| DEFAULT_PAGE_SIZE),
            global_search: use_signal(String::new),
            column_search_col: use_signal(|| None::<String>),
            column_search_text: use_signal(String::new),
            sort_col: use_signal(|| None::<String>),
            sort_desc: use_signal(|| false),
            hidden_columns: use_signal(BTreeSet::<String>::new),
            pivot_rows: use_signal(Vec::<String>::new),
            pivot_cols: use_signal(Vec::<String>::new),
            chart_source: use_signal(|| ChartSource::Pivot),
            chart: use_signal(Series::default),
            status: use_signal(String::new),
        }
    }

    /// The table query described by the current controls.
    pub fn page_query(&self) -> PageQuery {
        let column_text = (self.column_search_text)();
        PageQuery {
            page: (self.page)(),
            page_size: (self.page_size)(),
            global_search: (self.global_search)(),
            column_filter: (self.column_search_col)().map(|column| ColumnFilter {
                column,
                term: column_text,
            }),
            sort: (self.sort_col)().map(|column| SortSpec {
                column,
                direction: if (self.sort_desc)() {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                },
            }),
            hidden_columns: (self.hidden_columns)(),
        }
    }
}
