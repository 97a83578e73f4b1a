//! Remote page fetching for Gridline.
//!
//! Grids in remote mode never hold the full dataset. Each page is requested
//! from an endpoint with paging, sorting and filter parameters in the query
//! string, and the server answers with a JSON array plus a header carrying
//! the total row count.
//!
//! # Example
//!
//! ```ignore
//! use gridline_net::page::{HttpPageFetcher, PageFetcher, PageQuery};
//!
//! let fetcher = HttpPageFetcher::new("https://api.example.com/people")?;
//! let query = PageQuery::new(1).with_page_size(20).with_sort("name", true);
//! let page = fetcher.fetch(&query).await?;
//! println!("{} of {:?} rows", page.rows.len(), page.total_count);
//! ```

pub mod error;
pub mod http;
pub mod page;

pub use error::{NetworkError, Result};
pub use http::{HttpClient, HttpClientConfig, HttpResponse};
pub use page::{
    DEFAULT_TOTAL_COUNT_HEADER, HttpPageFetcher, PageFetcher, PageQuery, PageResponse,
    QueryParamNames, SortParam,
};
