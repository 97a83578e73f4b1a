//! The page-fetch seam and its HTTP implementation.

use futures_util::FutureExt;
use futures_util::future::BoxFuture;

use super::query::PageQuery;
use super::response::{DEFAULT_TOTAL_COUNT_HEADER, PageResponse};
use crate::error::Result;
use crate::http::HttpClient;
use gridline_core::logging::{span_names, targets};
use tracing::Instrument;

/// Something that can produce one page of rows for a query.
///
/// The grid only depends on this trait, so hosts can plug in any transport
/// (or an in-memory source in tests).
pub trait PageFetcher: Send + Sync {
    /// Fetch the page described by `query`.
    fn fetch<'a>(&'a self, query: &'a PageQuery) -> BoxFuture<'a, Result<PageResponse>>;
}

/// Fetches pages with a GET request against a fixed URL.
///
/// Query parameters come from [`PageQuery::request_url`]; the body must be a
/// JSON array and the total count is read from a response header.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: HttpClient,
    url: url::Url,
    total_count_header: String,
}

impl HttpPageFetcher {
    /// Create a fetcher for `url` with a default client.
    pub fn new(url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(HttpClient::new()?, url)
    }

    /// Create a fetcher for `url` sharing an existing client.
    pub fn with_client(client: HttpClient, url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            client,
            url: url::Url::parse(url.as_ref())?,
            total_count_header: DEFAULT_TOTAL_COUNT_HEADER.to_string(),
        })
    }

    /// Read the total count from `header` instead of the default.
    pub fn total_count_header(mut self, header: impl Into<String>) -> Self {
        self.total_count_header = header.into();
        self
    }
}

impl PageFetcher for HttpPageFetcher {
    fn fetch<'a>(&'a self, query: &'a PageQuery) -> BoxFuture<'a, Result<PageResponse>> {
        async move {
            let response = self
                .client
                .get(query.request_url(&self.url))
                .await?
                .error_for_status()
                .await?;

            let page = PageResponse::from_http(response, &self.total_count_header).await?;
            tracing::debug!(
                target: targets::NET,
                page = query.page,
                rows = page.rows.len(),
                total_count = ?page.total_count,
                "page fetched"
            );
            Ok(page)
        }
        .instrument(tracing::debug_span!(target: targets::NET, span_names::FETCH, page = query.page))
        .boxed()
    }
}
