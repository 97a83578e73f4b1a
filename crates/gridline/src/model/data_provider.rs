//! The data provider: which rows to show, in what order.
//!
//! A [`DataProvider`] owns the source rows (or the description of a remote
//! source) together with the sort, filter and page state, and produces the
//! page of rows to display.
//!
//! - In [`DataMode::Local`] every read derives the page from the source:
//!   filter, then sort, then slice.
//! - In [`DataMode::Remote`] and [`DataMode::PageByPage`] the source *is*
//!   the page last delivered by the server. Reads return it as-is; sort,
//!   filter and page state only shape the next [`PageQuery`].
//!
//! # Overlapping fetches
//!
//! Every fetch is numbered by [`DataProvider::begin_fetch`]. When the
//! response arrives, [`DataProvider::finish_fetch`] applies it only if no
//! newer fetch has begun in the meantime; older responses are reported as
//! [`FetchOutcome::Stale`] and dropped.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use gridline_core::logging::targets;
use gridline_net::{NetworkError, PageFetcher, PageQuery, PageResponse, QueryParamNames};
use serde_json::Value;

use super::filter::{FilterEntry, FilterState, is_blank};
use super::pagination::{PageSize, PageState, total_pages};
use super::sort::{SortDirection, SortState};
use crate::error::{GridError, Result};

/// Row transform applied to incoming rows; each row becomes zero or more rows.
pub type DataItemCallback = Arc<dyn Fn(&Value) -> Vec<Value> + Send + Sync>;

/// Where rows come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DataMode {
    /// Every row is held in memory.
    #[default]
    Local,
    /// Rows come from a remote source one page per fetch.
    Remote,
    /// Remote source where the host drives each page load.
    PageByPage,
}

impl DataMode {
    /// Whether rows come from a remote source.
    pub fn is_async(self) -> bool {
        !matches!(self, Self::Local)
    }
}

/// A numbered fetch in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    query: PageQuery,
}

impl FetchTicket {
    /// Sequence number; higher is newer.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The query to send.
    pub fn query(&self) -> &PageQuery {
        &self.query
    }
}

/// What happened to a fetch response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response replaced the current page.
    Applied {
        /// Rows on the new page.
        rows: usize,
        /// Total count reported by the server.
        total_count: Option<usize>,
    },
    /// A newer fetch began before this one finished; nothing changed.
    Stale,
}

/// Owns the dataset and the sort, filter and page state.
pub struct DataProvider {
    mode: DataMode,
    source: Vec<Value>,
    filters: FilterState,
    sort: SortState,
    page: PageState,
    total_count: Option<usize>,
    param_names: QueryParamNames,
    additional_params: BTreeMap<String, String>,
    filter_params: BTreeMap<String, String>,
    fetcher: Option<Arc<dyn PageFetcher>>,
    data_item_callback: Option<DataItemCallback>,
    latest_fetch: u64,
}

impl DataProvider {
    /// An empty provider for `mode` with page size `page_size`.
    pub fn new(mode: DataMode, page_size: PageSize) -> Self {
        Self {
            mode,
            source: Vec::new(),
            filters: FilterState::new(),
            sort: SortState::default(),
            page: PageState::new(page_size),
            total_count: None,
            param_names: QueryParamNames::default(),
            additional_params: BTreeMap::new(),
            filter_params: BTreeMap::new(),
            fetcher: None,
            data_item_callback: None,
            latest_fetch: 0,
        }
    }

    /// A local provider over `rows`.
    pub fn local(rows: Vec<Value>, page_size: PageSize) -> Self {
        let mut provider = Self::new(DataMode::Local, page_size);
        provider.set_source(rows);
        provider
    }

    /// Use `fetcher` for remote pages.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn PageFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Use custom query key names.
    pub fn with_param_names(mut self, names: QueryParamNames) -> Self {
        self.param_names = names;
        self
    }

    /// Send these parameters with every fetch.
    pub fn with_additional_params(mut self, params: BTreeMap<String, String>) -> Self {
        self.additional_params = params;
        self
    }

    /// Transform incoming rows with `callback`.
    pub fn with_data_item_callback(mut self, callback: Option<DataItemCallback>) -> Self {
        self.data_item_callback = callback;
        self
    }

    pub fn mode(&self) -> DataMode {
        self.mode
    }

    pub fn has_fetcher(&self) -> bool {
        self.fetcher.is_some()
    }

    /// The fetcher used for remote pages.
    pub fn fetcher(&self) -> Option<&Arc<dyn PageFetcher>> {
        self.fetcher.as_ref()
    }

    // =========================================================================
    // Source data
    // =========================================================================

    /// All source rows (for remote modes, the current page).
    pub fn source(&self) -> &[Value] {
        &self.source
    }

    /// Replace the source rows, passing them through the data-item callback.
    pub fn set_source(&mut self, rows: Vec<Value>) {
        self.source = self.transform(rows);
        tracing::debug!(target: targets::PROVIDER, rows = self.source.len(), "source data replaced");
    }

    fn transform(&self, rows: Vec<Value>) -> Vec<Value> {
        match &self.data_item_callback {
            Some(callback) => rows.iter().flat_map(|row| callback(row)).collect(),
            None => rows,
        }
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    /// Sort by `column`. A missing `direction` keeps the current one.
    pub fn set_sort(
        &mut self,
        column: impl Into<String>,
        direction: Option<SortDirection>,
        case_insensitive: Option<bool>,
    ) {
        self.sort.set(column, direction, case_insensitive);
        tracing::debug!(
            target: targets::PROVIDER,
            column = ?self.sort.column,
            direction = %self.sort.direction,
            case_insensitive = self.sort.case_insensitive,
            "sort changed"
        );
    }

    pub fn sort_column(&self) -> Option<&str> {
        self.sort.column.as_deref()
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort.direction
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Set a text filter on `column`, or clear it when `value` is blank.
    pub fn set_filter(&mut self, column: &str, value: &str) -> Result<()> {
        if is_blank(value) {
            self.clear_filter(column);
            return Ok(());
        }
        let entry =
            FilterEntry::pattern(value).map_err(|e| GridError::invalid_pattern(column, e))?;
        self.set_filter_entry(column, entry);
        Ok(())
    }

    /// Install a prepared filter entry for `column`.
    pub fn set_filter_entry(&mut self, column: &str, entry: FilterEntry) {
        if self.mode.is_async() {
            self.filter_params
                .insert(column.to_string(), entry.raw().to_string());
        }
        tracing::debug!(target: targets::PROVIDER, column, value = entry.raw(), "filter set");
        self.filters.insert(column, entry);
    }

    /// Remove the filter on `column`. Returns whether one was active.
    pub fn clear_filter(&mut self, column: &str) -> bool {
        self.filter_params.remove(column);
        let removed = self.filters.remove(column).is_some();
        if removed {
            tracing::debug!(target: targets::PROVIDER, column, "filter cleared");
        }
        removed
    }

    /// Remove every filter.
    pub fn clear_filters(&mut self) {
        self.filter_params.clear();
        self.filters.clear();
    }

    /// Raw value of the filter on `column`.
    pub fn filter_value(&self, column: &str) -> Option<&str> {
        self.filters.get(column).map(FilterEntry::raw)
    }

    /// Extra request parameters: the additional parameters overlaid with
    /// the active filter values.
    pub fn request_params(&self) -> BTreeMap<String, String> {
        let mut params = self.additional_params.clone();
        params.extend(
            self.filter_params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        params
    }

    // =========================================================================
    // Paging
    // =========================================================================

    pub fn page_index(&self) -> usize {
        self.page.index
    }

    /// Go to page `index` (values below 1 become 1).
    pub fn set_page_index(&mut self, index: usize) {
        self.page.index = index.max(1);
    }

    pub fn page_size(&self) -> PageSize {
        self.page.size
    }

    /// Change the page size and return to page 1.
    pub fn set_page_size(&mut self, size: PageSize) {
        self.page.size = size;
        self.page.index = 1;
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The rows to display.
    pub fn data(&self) -> Vec<Value> {
        match self.mode {
            DataMode::Local => {
                let rows = self.filtered_sorted();
                self.page.slice(&rows).to_vec()
            }
            DataMode::Remote | DataMode::PageByPage => self.source.clone(),
        }
    }

    /// Rows on the current page.
    pub fn count(&self) -> usize {
        match self.mode {
            DataMode::Local => {
                let total = self.local_total();
                let start = self.page.offset().min(total);
                let remaining = total - start;
                self.page.size.limit().map_or(remaining, |n| remaining.min(n))
            }
            DataMode::Remote | DataMode::PageByPage => self.source.len(),
        }
    }

    /// Total rows across all pages.
    ///
    /// Local mode counts the filtered rows. Remote modes return the last
    /// count reported by the server, or `None` when it sent none.
    pub fn total_count(&self) -> Option<usize> {
        match self.mode {
            DataMode::Local => Some(self.local_total()),
            DataMode::Remote | DataMode::PageByPage => self.total_count,
        }
    }

    /// Record the remote total count.
    pub fn set_total_count(&mut self, total_count: Option<usize>) {
        self.total_count = total_count;
    }

    /// Number of pages; an unknown total counts as zero rows.
    pub fn total_pages(&self) -> usize {
        total_pages(self.page.size, self.total_count().unwrap_or(0))
    }

    fn filtered_sorted(&self) -> Vec<Value> {
        let mut rows = self.filters.apply(&self.source);
        self.sort.apply(&mut rows);
        rows
    }

    fn local_total(&self) -> usize {
        if self.filters.is_empty() {
            self.source.len()
        } else {
            self.source.iter().filter(|row| self.filters.matches(row)).count()
        }
    }

    // =========================================================================
    // Remote fetching
    // =========================================================================

    /// The query describing the current page.
    pub fn query(&self) -> PageQuery {
        PageQuery {
            page: self.page.index,
            page_size: self.page.size.limit(),
            sort: self.sort.column.as_ref().map(|column| gridline_net::SortParam {
                column: column.clone(),
                descending: self.sort.direction.is_descending(),
            }),
            params: self.request_params(),
            names: self.param_names.clone(),
        }
    }

    /// Sequence number of the most recent fetch.
    pub fn fetch_seq(&self) -> u64 {
        self.latest_fetch
    }

    /// Treat tickets numbered up to `seq` as stale, e.g. those handed out by
    /// the provider this one replaces.
    pub fn superseding(mut self, seq: u64) -> Self {
        self.latest_fetch = seq + 1;
        self
    }

    /// Start a fetch. Any fetch begun earlier becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_fetch += 1;
        FetchTicket {
            seq: self.latest_fetch,
            query: self.query(),
        }
    }

    /// Apply the result of the fetch identified by `ticket`.
    ///
    /// Errors leave the state untouched and are returned, unless the fetch
    /// is stale, in which case they are dropped too.
    pub fn finish_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: std::result::Result<PageResponse, NetworkError>,
    ) -> std::result::Result<FetchOutcome, NetworkError> {
        if ticket.seq != self.latest_fetch {
            tracing::warn!(
                target: targets::PROVIDER,
                seq = ticket.seq,
                latest = self.latest_fetch,
                "discarding stale fetch response"
            );
            return Ok(FetchOutcome::Stale);
        }

        let page = result?;
        self.source = self.transform(page.rows);
        self.total_count = page.total_count;
        tracing::debug!(
            target: targets::PROVIDER,
            seq = ticket.seq,
            rows = self.source.len(),
            total_count = ?self.total_count,
            "fetch applied"
        );
        Ok(FetchOutcome::Applied {
            rows: self.source.len(),
            total_count: self.total_count,
        })
    }

    /// Fetch the current page through the configured fetcher.
    pub async fn fetch(&mut self) -> Result<FetchOutcome> {
        let fetcher = self.fetcher.clone().ok_or(GridError::NoRemoteSource)?;
        let ticket = self.begin_fetch();
        let result = fetcher.fetch(ticket.query()).await;
        Ok(self.finish_fetch(&ticket, result)?)
    }
}

impl fmt::Debug for DataProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataProvider")
            .field("mode", &self.mode)
            .field("source_rows", &self.source.len())
            .field("filters", &self.filters.len())
            .field("sort", &self.sort)
            .field("page", &self.page)
            .field("total_count", &self.total_count)
            .field("has_fetcher", &self.fetcher.is_some())
            .finish_non_exhaustive()
    }
}
