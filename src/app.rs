use std::collections::BTreeSet;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::prelude::*;
use tracing::{info, warn};

use crate::config::{AppConfig, CarrierRecord, CarrierSummary};
use crate::domain::entities::cell::{display_cell, format_number, CellValue};
use crate::domain::entities::dataset::{PageResult, PAGE_SIZE_OPTIONS};
use crate::domain::entities::row::{MONTH_FIELD, WEEK_FIELD, YEAR_FIELD};
use crate::domain::entities::series::{PivotData, Series};
use crate::domain::services::aggregator::{monthly_counts, series_from_pivot, KEY_SEPARATOR};
use crate::domain::services::pivot::build_pivot;
use crate::domain::services::projector::bind_records;
use crate::domain::services::schema::SchemaRecord;
use crate::domain::services::table::query_rows;
use crate::domain::services::temporal::group_rows;
use crate::infra::fetch::DefaultFetcher;
use crate::ui::chart::{dataset_color, layout_bars, AXIS_MARGIN, CHART_HEIGHT, CHART_WIDTH};
use crate::ui::state::app_state::{AppState, ChartSource, LoadState, ViewTab};
use crate::ui::style::{
    root_container_style, sort_marker, tab_button_style, table_cell_style,
    table_container_style, table_header_cell_style,
};
use crate::usecase::ports::state_store::{MemoryStateStore, StateStore};
use crate::usecase::services::chart_service::ChartService;
use crate::usecase::services::load_service::LoadService;

const NONE_OPTION_VALUE: &str = "__none__";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotAxis {
    Rows,
    Cols,
}

/// Persisted chart edits live in SQLite where a data directory exists and in
/// memory otherwise.
pub fn open_state_store(config: &AppConfig) -> Arc<dyn StateStore> {
    #[cfg(not(target_arch = "wasm32"))]
    if let Some(path) = config.state_db_path.clone() {
        match crate::infra::sqlite::repo::SqliteStateStore::open(path) {
            Ok(store) => return Arc::new(store),
            Err(err) => warn!("chart edits will not persist: {err}"),
        }
    }
    #[cfg(target_arch = "wasm32")]
    let _ = config;
    Arc::new(MemoryStateStore::default())
}

/// Display headers in order with repeats removed.
pub fn distinct_headers(display_headers: &[String]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for header in display_headers {
        if !headers.contains(header) {
            headers.push(header.clone());
        }
    }
    headers
}

/// Attributes offered by the pivot pickers: display headers, then the
/// derived calendar fields.
pub fn pivot_attributes(display_headers: &[String]) -> Vec<String> {
    let mut attributes = distinct_headers(display_headers);
    for derived in [YEAR_FIELD, MONTH_FIELD, WEEK_FIELD] {
        if !attributes.iter().any(|a| a == derived) {
            attributes.push(derived.to_string());
        }
    }
    attributes
}

/// Moves `attribute` onto `axis` (appending it), or off both axes for `None`.
pub fn assign_axis(
    rows: &mut Vec<String>,
    cols: &mut Vec<String>,
    attribute: &str,
    axis: Option<PivotAxis>,
) {
    rows.retain(|a| a != attribute);
    cols.retain(|a| a != attribute);
    match axis {
        Some(PivotAxis::Rows) => rows.push(attribute.to_string()),
        Some(PivotAxis::Cols) => cols.push(attribute.to_string()),
        None => {}
    }
}

fn is_numeric(cell: Option<&CellValue>) -> bool {
    matches!(cell, Some(CellValue::Number(_)))
}

fn axis_option(pivot: &PivotData, attribute: &str) -> &'static str {
    if pivot.row_attrs.iter().any(|a| a == attribute) {
        "rows"
    } else if pivot.col_attrs.iter().any(|a| a == attribute) {
        "cols"
    } else {
        "none"
    }
}

fn source_option(source: ChartSource) -> &'static str {
    match source {
        ChartSource::Pivot => "pivot",
        ChartSource::Monthly => "monthly",
    }
}

#[component]
pub fn App() -> Element {
    let config = use_hook(AppConfig::from_env);
    let spec = use_hook(CarrierRecord::header_spec);
    let chart_service = use_hook(|| Rc::new(ChartService::new(open_state_store(&config))));

    let state = AppState::new();
    let AppState {
        mut load_state,
        mut projection,
        mut sequencer,
        mut reload_token,
        mut tab,
        mut page,
        page_size,
        global_search,
        column_search_col,
        column_search_text,
        sort_col,
        sort_desc,
        hidden_columns,
        mut pivot_rows,
        mut pivot_cols,
        mut chart_source,
        mut chart,
        mut status,
    } = state;

    let source = config.source.clone();
    use_effect(move || {
        reload_token();
        let ticket = sequencer.write().begin();
        load_state.set(LoadState::Loading);
        let source = source.clone();
        let spec = spec.clone();
        spawn(async move {
            let result = LoadService::new(DefaultFetcher::new())
                .load(&source, &spec)
                .await;
            if !sequencer.write().try_apply(ticket) {
                warn!(run = ticket.seq(), "discarding stale load result");
                return;
            }
            match result {
                Ok(loaded) => {
                    status.set(format!("Loaded {} records from {source}", loaded.rows.len()));
                    projection.set(loaded);
                    page.set(0);
                    load_state.set(LoadState::Loaded);
                }
                Err(err) => {
                    status.set(String::new());
                    load_state.set(LoadState::Failed(err.to_string()));
                }
            }
        });
    });

    let date_field = config.date_field.clone();
    let grouped = use_memo(move || group_rows(&projection.read().rows, &date_field));

    let summary = use_memo(move || {
        let records: Vec<CarrierRecord> = bind_records(&projection.read().rows);
        CarrierSummary::from_records(&records)
    });

    let page_result = use_memo(move || {
        let loaded = projection.read();
        query_rows(&loaded.display_headers, &loaded.rows, &state.page_query())
    });

    let pivot = use_memo(move || build_pivot(&grouped.read(), &pivot_rows.read(), &pivot_cols.read()));

    let chart_label = config.date_field.clone();
    let computed_chart = use_memo(move || match chart_source() {
        ChartSource::Pivot => series_from_pivot(&pivot.read()),
        ChartSource::Monthly => monthly_counts(&grouped.read(), &chart_label),
    });

    let restore_service = chart_service.clone();
    use_effect(move || {
        let computed = computed_chart();
        chart.set(restore_service.restore(computed));
    });

    let all_columns = distinct_headers(&projection.read().display_headers);
    let attributes = pivot_attributes(&projection.read().display_headers);
    let current_summary = summary();
    let is_loaded = load_state() == LoadState::Loaded;

    rsx! {
        div { style: "{root_container_style()}",
            header {
                style: "display: flex; align-items: center; gap: 16px; padding: 10px 16px; background: #3f51b5; color: #fff;",
                h2 { style: "margin: 0;", "FMSCA Records" }
                if is_loaded {
                    span {
                        "{current_summary.carriers} carriers · {current_summary.out_of_service} out of service · {current_summary.states} states"
                    }
                }
                span { style: "margin-left: auto; opacity: 0.8;", "{status}" }
            }

            match load_state() {
                LoadState::Loading => rsx! {
                    div {
                        style: "flex: 1; display: flex; justify-content: center; align-items: center; font-size: 20px; color: #123abc;",
                        "Loading…"
                    }
                },
                LoadState::Failed(message) => rsx! {
                    div {
                        style: "flex: 1; display: flex; flex-direction: column; gap: 12px; justify-content: center; align-items: center;",
                        p { style: "color: #b00020;", "Failed to load records: {message}" }
                        button {
                            onclick: move |_| {
                                info!("retrying load");
                                *reload_token.write() += 1;
                            },
                            "Retry"
                        }
                    }
                },
                LoadState::Loaded => rsx! {
                    nav { style: "display: flex;",
                        button {
                            style: "{tab_button_style(tab() == ViewTab::Table)}",
                            onclick: move |_| tab.set(ViewTab::Table),
                            "Table View"
                        }
                        button {
                            style: "{tab_button_style(tab() == ViewTab::Pivot)}",
                            onclick: move |_| tab.set(ViewTab::Pivot),
                            "Pivot Table View"
                        }
                    }
                    if tab() == ViewTab::Table {
                        TableView {
                            result: page_result(),
                            all_columns: all_columns.clone(),
                            page,
                            page_size,
                            global_search,
                            column_search_col,
                            column_search_text,
                            sort_col,
                            sort_desc,
                            hidden_columns,
                        }
                    } else {
                        PivotView {
                            attributes: attributes.clone(),
                            pivot: pivot(),
                            chart: chart(),
                            chart_source: chart_source(),
                            on_axis: move |(attribute, axis): (String, Option<PivotAxis>)| {
                                assign_axis(&mut pivot_rows.write(), &mut pivot_cols.write(), &attribute, axis);
                            },
                            on_source: move |source: ChartSource| chart_source.set(source),
                            on_edit: {
                                let service = chart_service.clone();
                                move |(dataset, index, value): (usize, usize, f64)| {
                                    if let Err(err) = service.edit(&mut chart.write(), dataset, index, value) {
                                        warn!("failed to save chart edit: {err}");
                                    }
                                }
                            },
                            on_reset: {
                                let service = chart_service.clone();
                                move |_: ()| {
                                    let computed = computed_chart();
                                    if let Err(err) = service.save(&computed) {
                                        warn!("failed to reset chart edits: {err}");
                                    }
                                    chart.set(computed);
                                }
                            },
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn TableView(
    result: PageResult,
    all_columns: Vec<String>,
    mut page: Signal<usize>,
    mut page_size: Signal<usize>,
    mut global_search: Signal<String>,
    mut column_search_col: Signal<Option<String>>,
    mut column_search_text: Signal<String>,
    mut sort_col: Signal<Option<String>>,
    mut sort_desc: Signal<bool>,
    mut hidden_columns: Signal<BTreeSet<String>>,
) -> Element {
    let current_page = result.page;
    let page_count = result.page_count;
    let hidden = hidden_columns();

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 8px; padding: 12px; flex: 1; min-height: 0;",
            div { style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap;",
                input {
                    placeholder: "Search {result.total_rows} records...",
                    value: "{global_search}",
                    oninput: move |event| {
                        global_search.set(event.value());
                        page.set(0);
                    },
                }
                label { "Column " }
                select {
                    value: column_search_col().unwrap_or_else(|| NONE_OPTION_VALUE.to_string()),
                    onchange: move |event| {
                        let value = event.value();
                        column_search_col.set((value != NONE_OPTION_VALUE).then_some(value));
                        page.set(0);
                    },
                    option { value: "{NONE_OPTION_VALUE}", "(any)" }
                    for column in all_columns.iter() {
                        option { value: "{column}", "{column}" }
                    }
                }
                input {
                    placeholder: "Filter column...",
                    disabled: column_search_col().is_none(),
                    value: "{column_search_text}",
                    oninput: move |event| {
                        column_search_text.set(event.value());
                        page.set(0);
                    },
                }
                details {
                    summary { "Columns" }
                    div { style: "position: absolute; background: #fff; border: 1px solid #bbb; border-radius: 8px; padding: 6px; max-height: 320px; overflow-y: auto; z-index: 10;",
                        for column in all_columns.iter().cloned() {
                            label { style: "display: flex; gap: 8px; padding: 4px;",
                                input {
                                    r#type: "checkbox",
                                    checked: !hidden.contains(&column),
                                    onclick: {
                                        let column = column.clone();
                                        move |_| {
                                            let mut hidden = hidden_columns.write();
                                            if !hidden.remove(&column) {
                                                hidden.insert(column.clone());
                                            }
                                        }
                                    },
                                }
                                span { "{column}" }
                            }
                        }
                    }
                }
            }

            div { style: "{table_container_style()}",
                table { style: "border-collapse: collapse; width: 100%;",
                    thead {
                        tr {
                            for column in result.columns.iter().cloned() {
                                th {
                                    style: "{table_header_cell_style()}",
                                    onclick: {
                                        let column = column.clone();
                                        move |_| {
                                            if sort_col().as_deref() == Some(column.as_str()) {
                                                let desc = sort_desc();
                                                sort_desc.set(!desc);
                                            } else {
                                                sort_col.set(Some(column.clone()));
                                                sort_desc.set(false);
                                            }
                                        }
                                    },
                                    "{column}{sort_marker(sort_col().as_deref() == Some(column.as_str()), sort_desc())}"
                                }
                            }
                        }
                    }
                    tbody {
                        for row in result.rows.iter() {
                            tr { key: "{row.id}",
                                for cell in row.cells.iter() {
                                    td { style: "{table_cell_style(is_numeric(cell.as_ref()))}",
                                        "{display_cell(cell.as_ref())}"
                                    }
                                }
                            }
                        }
                    }
                }
            }

            div { style: "display: flex; gap: 12px; align-items: center; justify-content: flex-end;",
                label { "Rows per page " }
                select {
                    value: "{page_size}",
                    onchange: move |event| {
                        if let Ok(size) = event.value().parse::<usize>() {
                            page_size.set(size);
                            page.set(0);
                        }
                    },
                    for size in PAGE_SIZE_OPTIONS {
                        option { value: "{size}", "{size}" }
                    }
                }
                button {
                    disabled: current_page == 0,
                    onclick: move |_| page.set(current_page.saturating_sub(1)),
                    "‹"
                }
                span { "Page {current_page + 1} of {page_count}" }
                button {
                    disabled: current_page + 1 >= page_count,
                    onclick: move |_| page.set(current_page + 1),
                    "›"
                }
            }
        }
    }
}

#[component]
fn PivotView(
    attributes: Vec<String>,
    pivot: PivotData,
    chart: Series,
    chart_source: ChartSource,
    on_axis: EventHandler<(String, Option<PivotAxis>)>,
    on_source: EventHandler<ChartSource>,
    on_edit: EventHandler<(usize, usize, f64)>,
    on_reset: EventHandler<()>,
) -> Element {
    let row_header = pivot.row_attrs.join(KEY_SEPARATOR);

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 16px; padding: 20px; overflow: auto;",
            div { style: "display: flex; flex-wrap: wrap; gap: 8px;",
                for attribute in attributes.iter().cloned() {
                    label { style: "display: inline-flex; gap: 4px; align-items: center; border: 1px solid #ccc; border-radius: 6px; padding: 2px 6px; background: #fff;",
                        span { "{attribute}" }
                        select {
                            value: axis_option(&pivot, &attribute),
                            onchange: {
                                let attribute = attribute.clone();
                                move |event: FormEvent| {
                                    let axis = match event.value().as_str() {
                                        "rows" => Some(PivotAxis::Rows),
                                        "cols" => Some(PivotAxis::Cols),
                                        _ => None,
                                    };
                                    on_axis.call((attribute.clone(), axis));
                                }
                            },
                            option { value: "none", "-" }
                            option { value: "rows", "Rows" }
                            option { value: "cols", "Columns" }
                        }
                    }
                }
            }

            div { style: "{table_container_style()}",
                table { style: "border-collapse: collapse;",
                    thead {
                        tr {
                            th { style: "{table_header_cell_style()}", "{row_header}" }
                            for key in pivot.col_keys.iter() {
                                th { style: "{table_header_cell_style()}", "{key.join(KEY_SEPARATOR)}" }
                            }
                            th { style: "{table_header_cell_style()}", "Totals" }
                        }
                    }
                    tbody {
                        for (row_idx, key) in pivot.row_keys.iter().enumerate() {
                            tr {
                                th { style: "{table_cell_style(false)}", "{key.join(KEY_SEPARATOR)}" }
                                for col_idx in 0..pivot.col_keys.len() {
                                    td { style: "{table_cell_style(true)}", "{format_number(pivot.value(row_idx, col_idx))}" }
                                }
                                td { style: "{table_cell_style(true)}", "{format_number(pivot.row_total(row_idx))}" }
                            }
                        }
                        tr {
                            th { style: "{table_cell_style(false)}", "Totals" }
                            for col_idx in 0..pivot.col_keys.len() {
                                td { style: "{table_cell_style(true)}", "{format_number(pivot.col_total(col_idx))}" }
                            }
                            td { style: "{table_cell_style(true)}", "{format_number(pivot.grand_total())}" }
                        }
                    }
                }
            }

            div { style: "display: flex; gap: 12px; align-items: center;",
                label { "Chart " }
                select {
                    value: source_option(chart_source),
                    onchange: move |event| {
                        let source = if event.value() == "monthly" {
                            ChartSource::Monthly
                        } else {
                            ChartSource::Pivot
                        };
                        on_source.call(source);
                    },
                    option { value: "pivot", "Pivot table" }
                    option { value: "monthly", "Records per month" }
                }
                button { onclick: move |_| on_reset.call(()), "Reset edits" }
            }

            BarChart { series: chart.clone() }

            ChartEditor { series: chart, on_edit }
        }
    }
}

#[component]
fn BarChart(series: Series) -> Element {
    let bars = layout_bars(&series, CHART_WIDTH, CHART_HEIGHT);
    let baseline = CHART_HEIGHT - AXIS_MARGIN;
    let max = format_number(series.max_value());
    let total = format_number(series.total());

    rsx! {
        div { style: "margin-top: 40px; background: #fff; padding: 8px;",
            if series.is_empty() {
                p { style: "color: #666;", "Choose pivot rows and columns to draw a chart." }
            } else {
                div { style: "display: flex; gap: 12px; flex-wrap: wrap;",
                    span { style: "color: #666;", "Total {total}" }
                    for (idx, dataset) in series.datasets.iter().enumerate() {
                        span { style: "display: inline-flex; gap: 4px; align-items: center;",
                            span { style: "width: 12px; height: 12px; background: {dataset_color(idx)}; display: inline-block;" }
                            "{dataset.label}"
                        }
                    }
                }
                svg {
                    width: "{CHART_WIDTH}",
                    height: "{CHART_HEIGHT}",
                    view_box: "0 0 {CHART_WIDTH} {CHART_HEIGHT}",
                    line { x1: "{AXIS_MARGIN}", y1: "{baseline}", x2: "{CHART_WIDTH}", y2: "{baseline}", stroke: "#999" }
                    line { x1: "{AXIS_MARGIN}", y1: "0", x2: "{AXIS_MARGIN}", y2: "{baseline}", stroke: "#999" }
                    text { x: "2", y: "12", font_size: "10", "{max}" }
                    text { x: "2", y: "{baseline}", font_size: "10", "0" }
                    for bar in bars.iter() {
                        rect {
                            x: "{bar.x}",
                            y: "{bar.y}",
                            width: "{bar.width}",
                            height: "{bar.height}",
                            fill: "{bar.color}",
                            title { "{bar.title}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ChartEditor(series: Series, on_edit: EventHandler<(usize, usize, f64)>) -> Element {
    if series.is_empty() {
        return rsx! {};
    }

    rsx! {
        details {
            summary { "Edit chart values" }
            table { style: "border-collapse: collapse;",
                thead {
                    tr {
                        th { style: "{table_header_cell_style()}", "" }
                        for dataset in series.datasets.iter() {
                            th { style: "{table_header_cell_style()}", "{dataset.label}" }
                        }
                    }
                }
                tbody {
                    for (label_idx, label) in series.labels.iter().enumerate() {
                        tr {
                            th { style: "{table_cell_style(false)}", "{label}" }
                            for (dataset_idx, dataset) in series.datasets.iter().enumerate() {
                                td { style: "{table_cell_style(true)}",
                                    input {
                                        r#type: "number",
                                        style: "width: 80px;",
                                        value: "{format_number(dataset.data.get(label_idx).copied().unwrap_or(0.0))}",
                                        onchange: move |event| {
                                            if let Ok(value) = event.value().parse::<f64>() {
                                                on_edit.call((dataset_idx, label_idx, value));
                                            }
                                        },
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
