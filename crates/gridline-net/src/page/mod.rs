//! Paged data retrieval.
//!
//! A grid in remote mode asks a [`PageFetcher`] for one page at a time. The
//! request is described by a [`PageQuery`] (page index, page size, sort,
//! filters, extra parameters) and answered with a [`PageResponse`] (rows and
//! the total row count reported by the server).

mod fetcher;
mod query;
mod response;

pub use fetcher::{HttpPageFetcher, PageFetcher};
pub use query::{PageQuery, QueryParamNames, SortParam};
pub use response::{DEFAULT_TOTAL_COUNT_HEADER, PageResponse};
