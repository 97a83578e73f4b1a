//! Decoded page responses.

use serde_json::Value;

use crate::error::{NetworkError, Result};
use crate::http::HttpResponse;

/// Header carrying the total row count unless configured otherwise.
pub const DEFAULT_TOTAL_COUNT_HEADER: &str = "X-Pagination-Total-Count";

/// One page of rows returned by a remote source.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResponse {
    /// Rows of the page, in server order.
    pub rows: Vec<Value>,
    /// Total rows across all pages.
    ///
    /// `None` when the server did not send the count header or sent a value
    /// that is not a non-negative integer.
    pub total_count: Option<usize>,
}

impl PageResponse {
    /// Build a response from already decoded parts.
    pub fn new(rows: Vec<Value>, total_count: Option<usize>) -> Self {
        Self { rows, total_count }
    }

    /// Decode an HTTP response: the body must be a JSON array, the total
    /// count is read from `total_count_header`.
    pub async fn from_http(response: HttpResponse, total_count_header: &str) -> Result<Self> {
        let total_count = parse_total_count(response.header(total_count_header));
        let body = response.json_body().await?;
        Self::from_body(body, total_count)
    }

    /// Accept a decoded body, rejecting anything but an array.
    pub fn from_body(body: Value, total_count: Option<usize>) -> Result<Self> {
        match body {
            Value::Array(rows) => Ok(Self { rows, total_count }),
            other => Err(NetworkError::InvalidBody(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn parse_total_count(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|value| value.trim().parse().ok())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_total_count_parsing() {
        assert_eq!(parse_total_count(Some("42")), Some(42));
        assert_eq!(parse_total_count(Some(" 7 ")), Some(7));
        assert_eq!(parse_total_count(Some("NaN")), None);
        assert_eq!(parse_total_count(Some("-1")), None);
        assert_eq!(parse_total_count(None), None);
    }

    #[test]
    fn test_body_must_be_array() {
        let page = PageResponse::from_body(json!([{"id": 1}]), Some(1)).unwrap();
        assert_eq!(page.rows.len(), 1);

        let err = PageResponse::from_body(json!({"items": []}), None).unwrap_err();
        assert_eq!(
            err,
            NetworkError::InvalidBody("expected a JSON array, got an object".into())
        );
    }
}
