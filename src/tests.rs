use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rust_xlsxwriter::Workbook;

use crate::app::{assign_axis, distinct_headers, pivot_attributes, PivotAxis};
use crate::config::{CarrierRecord, CarrierSummary};
use crate::domain::entities::cell::CellValue;
use crate::domain::entities::dataset::PageQuery;
use crate::domain::entities::header::HeaderSpec;
use crate::domain::entities::row::{MONTH_FIELD, WEEK_FIELD, YEAR_FIELD};
use crate::domain::services::aggregator::{monthly_counts, series_from_pivot, INVALID_MONTH_LABEL};
use crate::domain::services::pivot::build_pivot;
use crate::domain::services::projector::bind_records;
use crate::domain::services::schema::SchemaRecord;
use crate::domain::services::table::query_rows;
use crate::domain::services::temporal::group_rows;
use crate::error::LoadError;
use crate::infra::import::xlsx::decode_workbook;
use crate::infra::sqlite::repo::SqliteStateStore;
use crate::infra::sqlite::schema::init_db;
use crate::ui::chart::{layout_bars, AXIS_MARGIN};
use crate::ui::style::{sort_marker, tab_button_style, table_cell_style};
use crate::usecase::ports::resource::ResourceFetcher;
use crate::usecase::ports::state_store::StateStore;
use crate::usecase::services::chart_service::ChartService;
use crate::usecase::services::load_service::LoadService;

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("fmsca-{prefix}-{nanos}"))
}

struct FixedFetcher(HashMap<String, Vec<u8>>);

impl ResourceFetcher for FixedFetcher {
    async fn fetch(&self, locator: &str) -> Result<Vec<u8>, LoadError> {
        self.0
            .get(locator)
            .cloned()
            .ok_or_else(|| LoadError::unavailable(locator, "HTTP 404 Not Found"))
    }
}

fn fetcher_with(locator: &str, bytes: Vec<u8>) -> FixedFetcher {
    FixedFetcher(HashMap::from([(locator.to_string(), bytes)]))
}

enum Fixture<'a> {
    Text(&'a str),
    Number(f64),
}

fn xlsx_bytes(rows: &[Vec<Fixture<'_>>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let (r, c) = (row_idx as u32, col_idx as u16);
            match cell {
                Fixture::Text(text) => {
                    worksheet
                        .write_string(r, c, *text)
                        .expect("should write string cell");
                }
                Fixture::Number(value) => {
                    worksheet
                        .write_number(r, c, *value)
                        .expect("should write number cell");
                }
            }
        }
    }
    workbook.save_to_buffer().expect("workbook should serialize")
}

fn carrier_sheet() -> Vec<u8> {
    use Fixture::{Number, Text};
    xlsx_bytes(&[
        vec![Text("usdot_number"), Text("out_of_service_date")],
        vec![Number(123.0), Text("2023-01-10")],
        vec![Number(456.0), Text("2023-02-20")],
    ])
}

#[tokio::test]
async fn workbook_flows_through_to_monthly_counts() {
    let locator = "assets/records.xlsx";
    let spec = CarrierRecord::header_spec();
    let service = LoadService::new(fetcher_with(locator, carrier_sheet()));

    let projection = service.load(locator, &spec).await.expect("load should succeed");

    assert_eq!(projection.display_headers, vec!["DOT", "Out of service date"]);
    assert_eq!(projection.rows.len(), 2);
    assert_eq!(projection.rows[0].id(), 1);
    assert_eq!(projection.rows[0].get("DOT"), Some(&CellValue::Number(123.0)));

    let grouped = group_rows(&projection.rows, "Out of service date");
    assert_eq!(grouped[0].calendar.year(), Some(2023));
    assert_eq!(grouped[0].calendar.month(), Some(1));
    assert_eq!(grouped[1].calendar.month(), Some(2));

    let series = monthly_counts(&grouped, "Out of service date");
    assert_eq!(series.labels.len(), 12);
    let data = &series.datasets[0].data;
    assert_eq!(data[0], 1.0, "2023-1 should count one record");
    assert_eq!(data[1], 1.0, "2023-2 should count one record");
    assert!(data[2..].iter().all(|v| *v == 0.0), "later months are empty");
    assert_eq!(series.labels[0], "2023-1");
    assert_eq!(series.labels[1], "2023-2");
}

#[tokio::test]
async fn missing_resource_surfaces_unavailable() {
    let service = LoadService::new(FixedFetcher(HashMap::new()));

    let err = service
        .load("https://example.com/gone.xlsx", &CarrierRecord::header_spec())
        .await
        .expect_err("load should fail");

    assert!(matches!(err, LoadError::ResourceUnavailable { .. }), "{err:?}");
}

#[test]
fn empty_worksheet_yields_no_rows() {
    let bytes = xlsx_bytes(&[]);

    let grid = decode_workbook("empty.xlsx", bytes).expect("empty sheet should decode");

    assert!(grid.headers.is_empty());
    assert_eq!(grid.data_row_count(), 0);
}

#[test]
fn grid_is_anchored_at_the_first_sheet_row() {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .write_string(1, 1, "usdot_number")
        .expect("should write string cell");
    worksheet
        .write_number(2, 1, 123.0)
        .expect("should write number cell");
    let bytes = workbook.save_to_buffer().expect("workbook should serialize");

    let grid = decode_workbook("offset.xlsx", bytes).expect("sheet should decode");

    assert_eq!(grid.headers, vec!["", ""]);
    assert_eq!(grid.data_row_count(), 2);
    assert_eq!(grid.cell(0, 1), Some(&CellValue::from("usdot_number")));
    assert_eq!(grid.cell(1, 0), None);
    assert_eq!(grid.cell(1, 1), Some(&CellValue::Number(123.0)));
}

#[test]
fn colliding_display_names_keep_the_later_column() {
    use Fixture::Text;
    let bytes = xlsx_bytes(&[
        vec![Text("a"), Text("b")],
        vec![Text("first"), Text("second")],
    ]);
    let grid = decode_workbook("collide.xlsx", bytes).expect("sheet should decode");
    let spec = HeaderSpec::new(["a", "b"], [("a", "X"), ("b", "X")]);

    let projection = crate::domain::services::projector::project(&grid, &spec);

    assert_eq!(projection.rows[0].get("X"), Some(&CellValue::from("second")));
    assert_eq!(projection.display_headers, vec!["X", "X"]);
}

#[tokio::test]
async fn undated_rows_are_kept_and_counted_separately() {
    use Fixture::{Number, Text};
    let locator = "assets/mixed.xlsx";
    let bytes = xlsx_bytes(&[
        vec![Text("usdot_number"), Text("out_of_service_date")],
        vec![Number(1.0), Text("not-a-date")],
        vec![Number(2.0), Text("2024-03-15")],
    ]);
    let service = LoadService::new(fetcher_with(locator, bytes));
    let projection = service
        .load(locator, &CarrierRecord::header_spec())
        .await
        .expect("load should succeed");

    let grouped = group_rows(&projection.rows, "Out of service date");

    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped[0].attribute(YEAR_FIELD), "NaN");
    assert_eq!(grouped[0].attribute(MONTH_FIELD), "NaN");
    assert_eq!(grouped[1].attribute(WEEK_FIELD), "11");

    let series = monthly_counts(&grouped, "Out of service date");
    assert_eq!(series.labels.last().map(String::as_str), Some(INVALID_MONTH_LABEL));
    assert_eq!(series.total(), 2.0);
}

#[test]
fn pivot_by_year_feeds_the_chart() {
    use Fixture::{Number, Text};
    let bytes = xlsx_bytes(&[
        vec![Text("p_state"), Text("out_of_service_date")],
        vec![Text("TX"), Text("2023-01-10")],
        vec![Text("TX"), Text("2024-05-01")],
        vec![Text("CA"), Text("2023-07-04")],
        vec![Number(7.0), Text("pending")],
    ]);
    let grid = decode_workbook("pivot.xlsx", bytes).expect("sheet should decode");
    let projection =
        crate::domain::services::projector::project(&grid, &CarrierRecord::header_spec());
    let grouped = group_rows(&projection.rows, "Out of service date");

    let pivot = build_pivot(&grouped, &["PState".to_string()], &[YEAR_FIELD.to_string()]);
    let series = series_from_pivot(&pivot);

    assert_eq!(pivot.grand_total(), 4.0);
    assert_eq!(series.labels, vec!["7", "CA", "TX"]);
    let labels: Vec<&str> = series.datasets.iter().map(|d| d.label.as_str()).collect();
    assert_eq!(labels, vec!["2023", "2024", "NaN"]);
    assert_eq!(series.datasets[0].data, vec![0.0, 1.0, 1.0]);
}

#[test]
fn table_query_over_projected_rows() {
    use Fixture::{Number, Text};
    let bytes = xlsx_bytes(&[
        vec![Text("usdot_number"), Text("legal_name")],
        vec![Number(30.0), Text("Acme Freight")],
        vec![Number(4.0), Text("Blue Line")],
        vec![Number(200.0), Text("acme logistics")],
    ]);
    let grid = decode_workbook("table.xlsx", bytes).expect("sheet should decode");
    let projection =
        crate::domain::services::projector::project(&grid, &CarrierRecord::header_spec());

    let result = query_rows(
        &projection.display_headers,
        &projection.rows,
        &PageQuery {
            global_search: "ACME".to_string(),
            ..PageQuery::default()
        },
    );

    assert_eq!(result.total_rows, 2);
    let ids: Vec<u64> = result.rows.iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn carrier_records_bind_from_projection() {
    use Fixture::{Number, Text};
    let bytes = xlsx_bytes(&[
        vec![Text("usdot_number"), Text("p_state"), Text("id")],
        vec![Number(123.0), Text("TX"), Number(900.0)],
        vec![Number(456.0), Text("OK"), Number(901.0)],
    ]);
    let grid = decode_workbook("bind.xlsx", bytes).expect("sheet should decode");
    let projection =
        crate::domain::services::projector::project(&grid, &CarrierRecord::header_spec());

    let records: Vec<CarrierRecord> = bind_records(&projection.rows);

    assert_eq!(records[1].id, 2);
    assert_eq!(records[1].source_id, Some(CellValue::Number(901.0)));
    assert_eq!(records[1].usdot_number, Some(CellValue::Number(456.0)));
    assert_eq!(CarrierSummary::from_records(&records).states, 2);
}

#[test]
fn init_db_creates_state_table() {
    let temp_dir = unique_test_dir("init-db");
    let db_path = temp_dir.join("nested").join("state.sqlite");

    let result = init_db(&db_path);

    assert!(result.is_ok(), "init_db should succeed: {result:?}");
    let conn = rusqlite::Connection::open(&db_path).expect("should open sqlite db");
    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'kv_state'",
            [],
            |row| row.get(0),
        )
        .expect("table count query should succeed");
    assert_eq!(table_count, 1, "state table should exist");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn chart_edits_persist_across_sqlite_reopen() {
    let temp_dir = unique_test_dir("chart-edits");
    let db_path = temp_dir.join("state.sqlite");
    let computed = monthly_counts(&[], "count");
    let mut chart = crate::domain::entities::series::Series {
        labels: vec!["2023-1".to_string(), "2023-2".to_string()],
        datasets: vec![crate::domain::entities::series::SeriesDataset {
            label: "count".to_string(),
            data: vec![1.0, 1.0],
        }],
    };

    {
        let store = SqliteStateStore::open(db_path.clone()).expect("store should open");
        let service = ChartService::new(Arc::new(store));
        assert_eq!(service.restore(computed.clone()), computed);
        service
            .edit(&mut chart, 0, 1, 42.0)
            .expect("edit should persist");
    }

    let store = SqliteStateStore::open(db_path).expect("store should reopen");
    let mut fresh = chart.clone();
    fresh.datasets[0].data = vec![1.0, 1.0];
    let restored = ChartService::new(Arc::new(store)).restore(fresh);
    assert_eq!(restored.datasets[0].data, vec![1.0, 42.0]);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn sqlite_store_overwrites_values() {
    let temp_dir = unique_test_dir("kv-overwrite");
    let store = SqliteStateStore::open(temp_dir.join("state.sqlite")).expect("store should open");

    assert_eq!(store.load("chartData").expect("load should succeed"), None);
    store.save("chartData", "first").expect("save should succeed");
    store.save("chartData", "second").expect("save should succeed");

    assert_eq!(
        store.load("chartData").expect("load should succeed"),
        Some("second".to_string())
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn pivot_attributes_append_calendar_fields_once() {
    let headers = vec!["DOT".to_string(), "PState".to_string(), "DOT".to_string()];

    assert_eq!(distinct_headers(&headers), vec!["DOT", "PState"]);
    assert_eq!(
        pivot_attributes(&headers),
        vec!["DOT", "PState", YEAR_FIELD, MONTH_FIELD, WEEK_FIELD]
    );
}

#[test]
fn assigning_an_axis_moves_the_attribute() {
    let mut rows = vec!["PState".to_string()];
    let mut cols = Vec::new();

    assign_axis(&mut rows, &mut cols, "PState", Some(PivotAxis::Cols));
    assert!(rows.is_empty());
    assert_eq!(cols, vec!["PState"]);

    assign_axis(&mut rows, &mut cols, YEAR_FIELD, Some(PivotAxis::Rows));
    assign_axis(&mut rows, &mut cols, "PState", None);
    assert_eq!(rows, vec![YEAR_FIELD]);
    assert!(cols.is_empty());
}

#[test]
fn layout_bars_scales_to_the_tallest_value() {
    let series = crate::domain::entities::series::Series {
        labels: vec!["a".to_string(), "b".to_string()],
        datasets: vec![crate::domain::entities::series::SeriesDataset {
            label: "count".to_string(),
            data: vec![2.0, 4.0],
        }],
    };

    let bars = layout_bars(&series, 240.0, 140.0);

    assert_eq!(bars.len(), 2);
    assert_eq!(bars[1].height, 100.0);
    assert_eq!(bars[0].height, 50.0);
    assert!(bars[0].x >= AXIS_MARGIN);
    assert!(bars[1].x > bars[0].x);
}

#[test]
fn layout_bars_is_empty_without_labels() {
    let bars = layout_bars(&crate::domain::entities::series::Series::default(), 240.0, 140.0);
    assert!(bars.is_empty());
}

#[test]
fn style_helpers_reflect_state() {
    assert!(tab_button_style(true) != tab_button_style(false));
    assert!(table_cell_style(true).contains("right"));
    assert_eq!(sort_marker(false, true), "");
    assert_ne!(sort_marker(true, false), sort_marker(true, true));
}

#[cfg(feature = "desktop")]
#[test]
fn ensure_webview_data_dir_creates_subdir() {
    let temp_dir = unique_test_dir("webview-data-dir");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");

    let webview_dir =
        crate::ensure_webview_data_dir(&temp_dir).expect("webview data dir should be created");

    assert_eq!(webview_dir, temp_dir.join("webview"));
    assert!(webview_dir.is_dir(), "webview directory should exist");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}
