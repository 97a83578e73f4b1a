//! Page fetching against a mocked HTTP endpoint.

use std::time::Duration;

use gridline_net::{
    HttpClient, HttpClientConfig, HttpPageFetcher, NetworkError, PageFetcher, PageQuery,
};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn people() -> serde_json::Value {
    json!([
        {"id": 1, "name": "Ann"},
        {"id": 2, "name": "Bob"}
    ])
}

#[tokio::test]
async fn test_fetch_sends_paging_and_sort_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/people"))
        .and(query_param("page", "2"))
        .and(query_param("pageSize", "2"))
        .and(query_param("orderBy", "-name"))
        .and(query_param("telephone", "+78"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(people())
                .insert_header("X-Pagination-Total-Count", "5"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpPageFetcher::new(format!("{}/people", mock_server.uri())).unwrap();
    let query = PageQuery::new(2)
        .with_page_size(2)
        .with_sort("name", true)
        .with_param("telephone", "+78");

    let page = fetcher.fetch(&query).await.unwrap();
    assert_eq!(page.rows, people().as_array().unwrap().clone());
    assert_eq!(page.total_count, Some(5));
}

#[tokio::test]
async fn test_fetch_without_page_size_omits_param() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/people"))
        .and(query_param_is_missing("pageSize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(people()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpPageFetcher::new(format!("{}/people", mock_server.uri())).unwrap();
    let page = fetcher.fetch(&PageQuery::new(1)).await.unwrap();

    assert_eq!(page.rows.len(), 2);
    // No header: the count is unknown rather than zero.
    assert_eq!(page.total_count, None);
}

#[tokio::test]
async fn test_custom_total_count_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(people())
                .insert_header("X-Total", "120"),
        )
        .mount(&mock_server)
        .await;

    let fetcher = HttpPageFetcher::new(mock_server.uri())
        .unwrap()
        .total_count_header("x-total");
    let page = fetcher.fetch(&PageQuery::new(1)).await.unwrap();

    assert_eq!(page.total_count, Some(120));
}

#[tokio::test]
async fn test_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let fetcher = HttpPageFetcher::new(mock_server.uri()).unwrap();
    let err = fetcher.fetch(&PageQuery::new(1)).await.unwrap_err();

    assert_eq!(
        err,
        NetworkError::HttpStatus {
            status: 500,
            message: Some("boom".to_string())
        }
    );
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_non_array_body_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rows": []})))
        .mount(&mock_server)
        .await;

    let fetcher = HttpPageFetcher::new(mock_server.uri()).unwrap();
    let err = fetcher.fetch(&PageQuery::new(1)).await.unwrap_err();

    assert!(matches!(err, NetworkError::InvalidBody(_)));
}

#[tokio::test]
async fn test_default_headers_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("x-api-key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::default()
        .with_timeout(Duration::from_secs(5))
        .with_header("x-api-key", "secret");
    let client = HttpClient::from_config(&config).unwrap();
    let fetcher = HttpPageFetcher::with_client(client, mock_server.uri()).unwrap();

    let page = fetcher.fetch(&PageQuery::new(1)).await.unwrap();
    assert!(page.rows.is_empty());
}

#[tokio::test]
async fn test_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::default().with_timeout(Duration::from_millis(100));
    let client = HttpClient::from_config(&config).unwrap();
    let fetcher = HttpPageFetcher::with_client(client, mock_server.uri()).unwrap();

    let err = fetcher.fetch(&PageQuery::new(1)).await.unwrap_err();
    assert_eq!(err, NetworkError::Timeout);
}

#[test]
fn test_invalid_url() {
    let err = HttpPageFetcher::new("not a url").unwrap_err();
    assert!(matches!(err, NetworkError::InvalidUrl(_)));
}

#[tokio::test]
async fn test_endpoint_query_is_kept() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("tenant", "acme"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().unwrap();
    let fetcher =
        HttpPageFetcher::with_client(client, format!("{}/people?tenant=acme", mock_server.uri()))
            .unwrap();
    fetcher.fetch(&PageQuery::new(1)).await.unwrap();
}
