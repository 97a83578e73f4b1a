//! Remote and page-by-page grids against a mocked endpoint and an in-memory
//! page source.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use gridline::prelude::*;
use parking_lot::Mutex;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn people() -> Value {
    json!([
        {"id": 1, "name": "Ann"},
        {"id": 2, "name": "Bob"}
    ])
}

/// Route logs to the test harness; `RUST_LOG=gridline=debug` shows them.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn ids(rows: &[Value]) -> Vec<i64> {
    rows.iter().filter_map(|r| r["id"].as_i64()).collect()
}

fn record(signal: &Signal<GridEvent>) -> Arc<Mutex<Vec<GridEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    signal.connect(move |event: &GridEvent| sink.lock().push(event.clone()));
    events
}

/// Serves pages out of an in-memory table and records every query.
struct TableFetcher {
    rows: Vec<Value>,
    queries: Mutex<Vec<PageQuery>>,
}

impl TableFetcher {
    fn new(count: i64) -> Arc<Self> {
        Arc::new(Self {
            rows: (1..=count).map(|i| json!({"id": i})).collect(),
            queries: Mutex::new(Vec::new()),
        })
    }
}

impl PageFetcher for TableFetcher {
    fn fetch<'a>(&'a self, query: &'a PageQuery) -> BoxFuture<'a, gridline::net::Result<PageResponse>> {
        self.queries.lock().push(query.clone());
        let size = query.page_size.unwrap_or(self.rows.len());
        let rows = self
            .rows
            .iter()
            .skip((query.page - 1) * size)
            .take(size)
            .cloned()
            .collect();
        let page = PageResponse::new(rows, Some(self.rows.len()));
        async move { Ok(page) }.boxed()
    }
}

async fn remote_grid(server: &MockServer, options: GridOptions) -> GridController {
    GridController::new(options.with_url(format!("{}/people", server.uri()))).unwrap()
}

#[tokio::test]
async fn test_render_fetches_current_page() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/people"))
        .and(query_param("page", "1"))
        .and(query_param("pageSize", "2"))
        .and(query_param("orderBy", "-name"))
        .and(query_param("telephone", "+78"))
        .and(query_param("tenant", "acme"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(people())
                .insert_header("X-Pagination-Total-Count", "5"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = GridOptions {
        additional_request_params: BTreeMap::from([("tenant".to_string(), "acme".to_string())]),
        ..GridOptions::new().with_page_size(PageSize::Limit(2))
    };
    let mut grid = remote_grid(&mock_server, options).await;
    assert_eq!(grid.mode(), DataMode::Remote);

    let requests = record(&grid.signals().request_send);
    let updates = record(&grid.signals().update);

    grid.set_sort("name", Some(SortDirection::Desc), None);
    grid.set_filter("telephone", "+78", None);
    let outcome = grid.render().await;

    assert!(outcome.is_updated(), "{outcome:?}");
    assert_eq!(ids(&grid.results()), vec![1, 2]);
    assert_eq!(grid.total_count(), Some(5));
    assert_eq!(grid.total_pages(), 3);
    assert_eq!(grid.pages(), &[1, 2, 3]);

    assert_eq!(requests.lock()[0].data["orderBy"], json!("-name"));
    assert_eq!(updates.lock().len(), 1);
}

#[tokio::test]
async fn test_filter_overrides_additional_param() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("status", "closed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(people()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = GridOptions {
        additional_request_params: BTreeMap::from([("status".to_string(), "open".to_string())]),
        ..GridOptions::new()
    };
    let mut grid = remote_grid(&mock_server, options).await;
    grid.set_filter("status", "closed", None);
    assert!(grid.render().await.is_updated());
}

#[tokio::test]
async fn test_server_error_keeps_rows() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(people()))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let mut grid = remote_grid(&mock_server, GridOptions::new()).await;
    let errors = record(&grid.signals().server_error);
    let updates = record(&grid.signals().update);

    assert!(grid.render().await.is_updated());
    let outcome = grid.render().await;

    assert!(matches!(
        outcome,
        RenderOutcome::Failed(GridError::Network(NetworkError::HttpStatus { status: 500, .. }))
    ));
    assert_eq!(ids(&grid.results()), vec![1, 2]);
    assert_eq!(updates.lock().len(), 1);
    assert_eq!(errors.lock()[0].data["status"], json!(500));
}

#[tokio::test]
async fn test_missing_total_count_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(people()))
        .mount(&mock_server)
        .await;

    let mut grid = remote_grid(&mock_server, GridOptions::new()).await;
    grid.render().await;

    assert_eq!(grid.count(), 2);
    assert_eq!(grid.total_count(), None);
    assert_eq!(grid.total_pages(), 1);
}

#[tokio::test]
async fn test_custom_names_and_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("p", "1"))
        .and(query_param("per", "20"))
        .and(query_param("sort", "name"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(people())
                .insert_header("X-Total", "42"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = GridOptions {
        page_param: "p".to_string(),
        page_size_param: "per".to_string(),
        sort_param: "sort".to_string(),
        total_count_header: "X-Total".to_string(),
        ..GridOptions::new().with_default_sort("name", SortDirection::Asc)
    };
    let mut grid = remote_grid(&mock_server, options).await;
    grid.render().await;
    assert_eq!(grid.total_count(), Some(42));
}

#[tokio::test]
async fn test_no_paging_omits_page_size() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param_is_missing("pageSize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(people()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = GridOptions {
        paging: false,
        ..GridOptions::new()
    };
    let mut grid = remote_grid(&mock_server, options).await;
    assert!(grid.render().await.is_updated());
    assert!(grid.pages().is_empty());
}

#[tokio::test]
async fn test_require_filters_withholds_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(people()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = GridOptions {
        require_filters: true,
        ..GridOptions::new()
    };
    let mut grid = remote_grid(&mock_server, options).await;
    let requests = record(&grid.signals().request_send);

    assert!(matches!(grid.render().await, RenderOutcome::Withheld));
    assert!(requests.lock().is_empty());
    assert!(grid.results().is_empty());

    grid.set_filter("name", "a", None);
    assert!(grid.render().await.is_updated());
    assert_eq!(requests.lock().len(), 1);
}

#[tokio::test]
async fn test_validation_error_blocks_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(people()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let options = GridOptions::new().with_columns(vec![Column::new("age").with_type(ColumnType::Number)]);
    let mut grid = remote_grid(&mock_server, options).await;
    grid.set_filter("age", "old", None);

    assert!(matches!(grid.render().await, RenderOutcome::Aborted(_)));
}

#[tokio::test]
async fn test_stale_response_dropped() {
    init_tracing();
    let fetcher = TableFetcher::new(50);
    let mut grid = GridController::with_fetcher(
        GridOptions::new().with_url("https://api.example.com/rows"),
        fetcher.clone(),
    )
    .unwrap();
    let updates = record(&grid.signals().update);

    let first = grid.begin_fetch();
    grid.set_page_index(2);
    let second = grid.begin_fetch();

    let first_page = fetcher.fetch(first.query()).await;
    let second_page = fetcher.fetch(second.query()).await;

    assert!(grid.complete_fetch(&second, second_page).is_updated());
    assert!(matches!(grid.complete_fetch(&first, first_page), RenderOutcome::Stale));
    assert_eq!(ids(&grid.results()), (21..=40).collect::<Vec<_>>());
    assert_eq!(updates.lock().len(), 1);
}

#[tokio::test]
async fn test_fetch_begun_before_set_options_is_stale() {
    let fetcher = TableFetcher::new(50);
    let options = GridOptions::new().with_url("https://api.example.com/rows");
    let mut grid = GridController::with_fetcher(options.clone(), fetcher.clone()).unwrap();
    let updates = record(&grid.signals().update);

    let before = grid.begin_fetch();
    grid.set_options(options.with_page_size(PageSize::Limit(5))).unwrap();
    let after = grid.begin_fetch();

    let old_page = fetcher.fetch(before.query()).await;
    assert!(matches!(grid.complete_fetch(&before, old_page), RenderOutcome::Stale));
    assert!(grid.results().is_empty());

    let new_page = fetcher.fetch(after.query()).await;
    assert!(grid.complete_fetch(&after, new_page).is_updated());
    assert_eq!(ids(&grid.results()), vec![1, 2, 3, 4, 5]);
    assert_eq!(updates.lock().len(), 1);
}

#[tokio::test]
async fn test_http_options_reach_the_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("authorization", "Bearer t0k"))
        .respond_with(ResponseTemplate::new(200).set_body_json(people()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = GridOptions {
        http: HttpClientConfig::default().with_header("Authorization", "Bearer t0k"),
        ..GridOptions::new()
    };
    let mut grid = remote_grid(&mock_server, options).await;
    assert!(grid.render().await.is_updated());
}

#[test]
fn test_invalid_http_header_rejected() {
    let options = GridOptions {
        http: HttpClientConfig::default().with_header("bad header", "x"),
        ..GridOptions::new().with_url("https://api.example.com/rows")
    };
    let err = GridController::new(options).unwrap_err();
    assert!(matches!(
        err,
        GridError::Network(NetworkError::InvalidHeader { ref name, .. }) if name == "bad header"
    ));
}

#[tokio::test]
async fn test_page_by_page_loading() {
    let fetcher = TableFetcher::new(45);
    let options = GridOptions {
        page_by_page_loading: true,
        ..GridOptions::new()
    };
    let mut grid = GridController::with_fetcher(options, fetcher.clone()).unwrap();
    assert_eq!(grid.mode(), DataMode::PageByPage);

    assert!(grid.render().await.is_updated());
    assert!(fetcher.queries.lock().is_empty());

    grid.set_page_index(3);
    assert!(grid.load_page().await.is_updated());
    assert_eq!(ids(&grid.results()), (41..=45).collect::<Vec<_>>());
    assert_eq!(grid.total_pages(), 3);
    assert_eq!(fetcher.queries.lock()[0].page, 3);
}

#[tokio::test]
async fn test_host_pushed_results() {
    let mut grid = GridController::new(GridOptions {
        page_by_page_loading: true,
        ..GridOptions::new()
    })
    .unwrap();
    let updates = record(&grid.signals().update);

    grid.set_total_count(Some(60));
    grid.set_results(vec![json!({"id": 21}), json!({"id": 22})]);

    assert_eq!(grid.total_pages(), 3);
    assert_eq!(ids(updates.lock()[0].data.as_array().unwrap()), vec![21, 22]);
    assert!(matches!(
        grid.load_page().await,
        RenderOutcome::Failed(GridError::NoRemoteSource)
    ));
}

#[test]
fn test_invalid_url_rejected() {
    let err = GridController::new(GridOptions::new().with_url("not a url")).unwrap_err();
    assert!(matches!(err, GridError::Config(_)));
}
