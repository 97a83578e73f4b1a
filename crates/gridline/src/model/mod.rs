//! Row model and data provider.
//!
//! Rows are opaque [`serde_json::Value`]s addressed by dotted paths. The
//! pieces here are pure state: what is sorted, what is filtered, which page
//! is shown, which rows are selected. [`DataProvider`] combines them into
//! the page of rows to display, either by deriving it from an in-memory
//! dataset or by fetching it through a [`PageFetcher`](gridline_net::PageFetcher).
//!
//! # Pipeline
//!
//! In local mode every read runs the same fixed pipeline over the source
//! rows:
//!
//! ```text
//! source ─► filter (AND of all columns) ─► stable sort ─► page slice
//! ```
//!
//! In remote modes the source *is* the page the server returned.

mod data_provider;
mod filter;
pub mod pagination;
pub mod path;
mod selection;
mod sort;

pub use data_provider::{DataItemCallback, DataMode, DataProvider, FetchOutcome, FetchTicket};
pub use filter::{
    FilterCallback, FilterEntry, FilterMatcher, FilterState, is_blank, is_numeric_literal,
    parse_numeric_literal,
};
pub use pagination::{PageSize, PageState, page_window, total_pages};
pub use selection::{RowSelection, SelectionChange, SelectionMode};
pub use sort::{ParseSortDirectionError, SortDirection, SortState, sort_rows};
