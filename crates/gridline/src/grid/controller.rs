//! The grid controller.
//!
//! [`GridController`] is the user-facing contract of a grid. It turns user
//! intents (sort by a heading, type a filter, change page, click a row) into
//! [`DataProvider`] updates, owns the column definitions, the selection and
//! per-column validation errors, and runs the render cycle that produces the
//! page to display.
//!
//! # Render cycle
//!
//! ```text
//! render()
//!   ├─ validation errors pending ─────────────► Aborted(errors)
//!   ├─ local ─► filter → sort → slice ─► pages ► Updated
//!   ├─ remote, display withheld ──────────────► Withheld (rows cleared)
//!   ├─ remote ─► fetch ─┬─ ok ─► pages ────────► Updated
//!   │                   ├─ superseded ─────────► Stale
//!   │                   └─ error ──────────────► Failed (rows kept)
//!   └─ page-by-page ─► pages ─────────────────► Updated
//! ```
//!
//! Hosts that cannot hold the controller across an `.await` can split a
//! remote render with [`GridController::begin_fetch`] and
//! [`GridController::complete_fetch`]; responses to superseded fetches are
//! dropped.
//!
//! # Example
//!
//! ```
//! use gridline::prelude::*;
//! use serde_json::json;
//!
//! let options = GridOptions::new()
//!     .with_data(vec![
//!         json!({"id": 1, "telephone": "+780"}),
//!         json!({"id": 2, "telephone": "+40"}),
//!     ])
//!     .with_columns(vec![Column::new("telephone")]);
//!
//! let mut grid = GridController::new(options).unwrap();
//! assert!(grid.set_filter("telephone", "+78", None));
//! assert_eq!(grid.results().len(), 1);
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use gridline_core::logging::{span_names, targets};
use gridline_net::{HttpClient, HttpPageFetcher, NetworkError, PageFetcher, PageResponse};
use serde_json::{Map, Value, json};
use tracing::Instrument;

use super::column::{Column, ColumnType};
use super::event::{EventTarget, GridEvent, GridEventKind, GridSignals};
use super::options::GridOptions;
use crate::error::{GridError, Result};
use crate::model::{
    DataMode, DataProvider, FetchOutcome, FetchTicket, FilterEntry, PageSize, RowSelection,
    SelectionChange, SelectionMode, SortDirection, is_blank, is_numeric_literal, page_window,
};

/// How a render cycle ended.
#[derive(Debug)]
pub enum RenderOutcome {
    /// A new page was produced and `update` emitted.
    Updated {
        /// Rows on the page.
        rows: usize,
    },
    /// Validation errors blocked the cycle; nothing was fetched or filtered.
    Aborted(BTreeMap<String, String>),
    /// Results are withheld until a filter is set; displayed rows were cleared.
    Withheld,
    /// A newer fetch superseded this one; nothing changed.
    Stale,
    /// The fetch failed; displayed rows are unchanged.
    Failed(GridError),
}

impl RenderOutcome {
    /// Whether `update` was emitted.
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

/// Drives one grid: columns, data provider, selection and notifications.
pub struct GridController {
    options: GridOptions,
    provider: DataProvider,
    selection: RowSelection,
    errors: BTreeMap<String, String>,
    pages: Vec<usize>,
    signals: GridSignals,
    fetcher: Option<Arc<dyn PageFetcher>>,
    fetcher_injected: bool,
}

fn http_fetcher(options: &GridOptions) -> Result<Option<Arc<dyn PageFetcher>>> {
    let Some(url) = &options.url else {
        return Ok(None);
    };
    let client = HttpClient::from_config(&options.http)?;
    let fetcher: Arc<dyn PageFetcher> = Arc::new(
        HttpPageFetcher::with_client(client, url)?
            .total_count_header(options.total_count_header.clone()),
    );
    Ok(Some(fetcher))
}

impl GridController {
    /// Create a grid from `options`.
    ///
    /// A `url` gets an HTTP fetcher built from `options.http` that reads the
    /// configured total-count header.
    pub fn new(options: GridOptions) -> Result<Self> {
        options.validate()?;
        let fetcher = http_fetcher(&options)?;
        Self::build(options, fetcher, false)
    }

    /// Create a grid that loads remote pages through `fetcher`.
    pub fn with_fetcher(options: GridOptions, fetcher: Arc<dyn PageFetcher>) -> Result<Self> {
        options.validate()?;
        Self::build(options, Some(fetcher), true)
    }

    fn build(
        options: GridOptions,
        fetcher: Option<Arc<dyn PageFetcher>>,
        fetcher_injected: bool,
    ) -> Result<Self> {
        let mut grid = Self {
            provider: DataProvider::new(DataMode::Local, options.default_page_size),
            selection: RowSelection::new(
                options.unique_id.clone(),
                SelectionMode::from_multiple(options.selection_multiple),
            ),
            options,
            errors: BTreeMap::new(),
            pages: Vec::new(),
            signals: GridSignals::new(),
            fetcher,
            fetcher_injected,
        };
        grid.initialize();
        Ok(grid)
    }

    /// Replace the options, rebuilding the data provider.
    ///
    /// Signal connections and an injected fetcher are kept. Selection,
    /// filters and errors start over, and fetches begun before the call
    /// complete as [`RenderOutcome::Stale`].
    pub fn set_options(&mut self, options: GridOptions) -> Result<()> {
        options.validate()?;
        if !self.fetcher_injected {
            self.fetcher = http_fetcher(&options)?;
        }
        self.options = options;
        self.initialize();
        Ok(())
    }

    fn initialize(&mut self) {
        let options = &self.options;
        let page_size = if options.paging {
            options.default_page_size
        } else {
            PageSize::All
        };

        let mut provider = DataProvider::new(options.data_mode(), page_size)
            .with_param_names(options.param_names())
            .with_additional_params(options.additional_request_params.clone())
            .with_data_item_callback(options.data_item_callback.clone())
            .superseding(self.provider.fetch_seq());
        if let Some(fetcher) = &self.fetcher {
            provider = provider.with_fetcher(fetcher.clone());
        }

        self.provider = provider;
        self.selection = RowSelection::new(
            options.unique_id.clone(),
            SelectionMode::from_multiple(options.selection_multiple),
        );
        self.errors.clear();
        self.pages.clear();

        tracing::debug!(
            target: targets::GRID,
            mode = ?self.provider.mode(),
            page_size = %page_size,
            columns = self.options.columns.len(),
            "grid initialized"
        );

        if let Some(column) = self.options.default_sort_column.clone() {
            let direction = self.options.default_sort_type;
            let case_insensitive = self.column(&column).map(|c| c.case_insensitive_sort);
            self.set_sort(&column, Some(direction), case_insensitive);
        }

        if let (Some(column), Some(value)) = (
            self.options.default_filtering_column.clone(),
            self.options.default_filtering_column_value.clone(),
        ) {
            self.set_filter(&column, &value, None);
        }

        if let Some(rows) = self.options.data.clone() {
            self.set_data(rows);
        }
        self.refresh_pages();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn signals(&self) -> &GridSignals {
        &self.signals
    }

    pub fn provider(&self) -> &DataProvider {
        &self.provider
    }

    pub fn columns(&self) -> &[Column] {
        &self.options.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.options.column(name)
    }

    pub fn mode(&self) -> DataMode {
        self.provider.mode()
    }

    // =========================================================================
    // Data
    // =========================================================================

    /// Replace the full dataset (for remote modes, the current page).
    pub fn set_data(&mut self, rows: Vec<Value>) {
        self.provider.set_source(rows);
    }

    /// The full dataset, after the data-item callback.
    pub fn data(&self) -> &[Value] {
        self.provider.source()
    }

    /// Accept a page delivered by the host.
    ///
    /// When results may be displayed, pagination is recomputed and `update`
    /// emitted.
    pub fn set_results(&mut self, rows: Vec<Value>) {
        self.provider.set_source(rows);
        if self.is_results_display_allowed() {
            self.refresh_pages();
            self.emit_update();
        }
    }

    /// The rows to display on the current page.
    pub fn results(&self) -> Vec<Value> {
        self.provider.data()
    }

    /// Number of rows on the current page.
    pub fn count(&self) -> usize {
        self.provider.count()
    }

    /// Total rows across all pages; `None` if a remote source never said.
    pub fn total_count(&self) -> Option<usize> {
        self.provider.total_count()
    }

    /// Record the total row count of a remote source.
    pub fn set_total_count(&mut self, total_count: Option<usize>) {
        self.provider.set_total_count(total_count);
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// Set or clear (blank `value`) the filter on `column`.
    ///
    /// Like [`try_set_filter`](Self::try_set_filter), but a rejected value
    /// is recorded as the column's error message and reported as `false`.
    pub fn set_filter(&mut self, column: &str, value: &str, column_type: Option<ColumnType>) -> bool {
        match self.try_set_filter(column, value, column_type) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(target: targets::GRID, column, value, error = %err, "rejected filter value");
                self.errors.insert(column.to_string(), err.to_string());
                false
            }
        }
    }

    /// Set or clear (blank `value`) the filter on `column`.
    ///
    /// Number columns (by `column_type`, else the column definition) accept
    /// only numeric literals; anything else fails with
    /// [`GridError::Validation`]. Text that does not compile into a matcher
    /// fails with [`GridError::InvalidPattern`]. Either way the filters are
    /// left as they were. An accepted value clears the column's error,
    /// returns to page 1 and emits `filter_change`.
    pub fn try_set_filter(
        &mut self,
        column: &str,
        value: &str,
        column_type: Option<ColumnType>,
    ) -> Result<()> {
        let definition = self.column(column);
        let column_type = column_type
            .or(definition.map(|c| c.column_type))
            .unwrap_or_default();
        let heading = definition.map_or(column, Column::resolve_heading).to_string();
        let callback = definition.and_then(|c| c.filter_callback.clone());

        if column_type == ColumnType::Number && !is_blank(value) && !is_numeric_literal(value) {
            return Err(GridError::validation(
                column,
                format!("Invalid filter value for \"{heading}\". Please enter valid Number."),
            ));
        }

        if is_blank(value) {
            self.provider.clear_filter(column);
        } else {
            let entry = match (callback, column_type) {
                (Some(callback), _) => FilterEntry::custom(value, callback),
                (None, ColumnType::Number) => FilterEntry::numeric(value),
                (None, _) => FilterEntry::pattern(value)
                    .map_err(|e| GridError::invalid_pattern(column, e))?,
            };
            self.provider.set_filter_entry(column, entry);
        }
        self.errors.remove(column);

        self.set_page_index(1);
        self.signals.emit(
            GridEvent::new(GridEventKind::FilterChange, Value::String(value.to_string()))
                .with_target(EventTarget::Column(column.to_string())),
        );
        Ok(())
    }

    /// Whether filtering is on both globally and for `column`.
    pub fn is_filtering_allowed(&self, column: &str) -> bool {
        self.options.filtering && self.column(column).is_none_or(|c| c.filtering)
    }

    /// Whether `column` shows a free-text filter.
    pub fn is_input_filter_enabled(&self, column: &str) -> bool {
        self.options.filtering && self.column(column).is_some_and(Column::is_input_filter_enabled)
    }

    /// Whether `column` shows a select filter.
    pub fn is_select_filter_enabled(&self, column: &str) -> bool {
        self.options.filtering && self.column(column).is_some_and(Column::is_select_filter_enabled)
    }

    /// Apply a value typed or picked in the filter of `column`.
    ///
    /// Returns `false` without touching the filters when filtering is not
    /// allowed there; otherwise behaves like [`set_filter`](Self::set_filter).
    pub fn on_filter_input(&mut self, column: &str, value: &str) -> bool {
        if !self.is_filtering_allowed(column) {
            tracing::debug!(target: targets::GRID, column, "filter input ignored, filtering is off");
            return false;
        }
        self.set_filter(column, value, None)
    }

    /// Raw value of the filter on `column`.
    pub fn filter(&self, column: &str) -> Option<&str> {
        self.provider.filter_value(column)
    }

    /// Clear the filter and any error on `column`.
    pub fn clear_filter(&mut self, column: &str) -> bool {
        self.errors.remove(column);
        self.set_filter(column, "", Some(ColumnType::String))
    }

    /// Clear every filter and filter error.
    pub fn clear_all_filters(&mut self) {
        let columns: Vec<String> = self
            .provider
            .filters()
            .iter()
            .map(|(column, _)| column.to_string())
            .chain(self.errors.keys().cloned())
            .collect();
        for column in columns {
            self.clear_filter(&column);
        }
    }

    /// Whether results may be shown: always, unless filters are required
    /// and none is set.
    pub fn is_results_display_allowed(&self) -> bool {
        !self.options.require_filters || !self.provider.filters().is_empty()
    }

    // =========================================================================
    // Validation errors
    // =========================================================================

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn error(&self, column: &str) -> Option<&str> {
        self.errors.get(column).map(String::as_str)
    }

    pub fn set_error(&mut self, column: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(column.into(), message.into());
    }

    pub fn clear_error(&mut self, column: &str) -> bool {
        self.errors.remove(column).is_some()
    }

    pub fn clear_all_errors(&mut self) {
        self.errors.clear();
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Sort by `column`, keeping the current direction when none is given.
    pub fn set_sort(
        &mut self,
        column: &str,
        direction: Option<SortDirection>,
        case_insensitive: Option<bool>,
    ) {
        self.provider.set_sort(column, direction, case_insensitive);
        self.signals.emit(
            GridEvent::new(
                GridEventKind::SortChange,
                Value::String(self.provider.sort_direction().as_str().to_string()),
            )
            .with_target(EventTarget::Column(column.to_string())),
        );
    }

    pub fn sort_column(&self) -> Option<&str> {
        self.provider.sort_column()
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.provider.sort_direction()
    }

    /// Whether `column` is the sort column (and, if given, in `direction`).
    pub fn is_sorted_by(&self, column: &str, direction: Option<SortDirection>) -> bool {
        self.provider.sort_column() == Some(column)
            && direction.is_none_or(|d| d == self.provider.sort_direction())
    }

    /// Whether sorting is on both globally and for `column`.
    pub fn is_sorting_allowed(&self, column: &str) -> bool {
        self.options.sorting && self.column(column).is_none_or(|c| c.sorting)
    }

    /// Direction a heading click on `column` would sort in: flipped for the
    /// current sort column, unchanged for any other.
    pub fn next_sort_direction(&self, column: &str) -> SortDirection {
        let current = self.provider.sort_direction();
        if self.provider.sort_column() == Some(column) {
            current.toggled()
        } else {
            current
        }
    }

    /// Apply a heading click. Returns `false` when sorting is not allowed.
    pub fn on_heading_click(&mut self, column: &str) -> bool {
        if !self.is_sorting_allowed(column) {
            return false;
        }
        let direction = self.next_sort_direction(column);
        let case_insensitive = self.column(column).map(|c| c.case_insensitive_sort);
        self.set_sort(column, Some(direction), case_insensitive);
        true
    }

    // =========================================================================
    // Paging
    // =========================================================================

    pub fn page_index(&self) -> usize {
        self.provider.page_index()
    }

    /// Go to page `index` and emit `page_change`.
    pub fn set_page_index(&mut self, index: usize) {
        self.provider.set_page_index(index);
        self.signals.emit(GridEvent::new(
            GridEventKind::PageChange,
            json!(self.provider.page_index()),
        ));
    }

    pub fn page_size(&self) -> PageSize {
        self.provider.page_size()
    }

    /// Change the page size, return to page 1 and emit `page_size_change`.
    pub fn set_page_size(&mut self, size: PageSize) {
        self.provider.set_page_size(size);
        self.set_page_index(1);
        let data = match size {
            PageSize::All => Value::Bool(false),
            PageSize::Limit(n) => json!(n),
        };
        self.signals
            .emit(GridEvent::new(GridEventKind::PageSizeChange, data));
    }

    pub fn total_pages(&self) -> usize {
        self.provider.total_pages()
    }

    /// Page numbers for the page buttons, as of the last render.
    pub fn pages(&self) -> &[usize] {
        &self.pages
    }

    /// Recompute the page-button window.
    pub fn paginate(&mut self) -> &[usize] {
        self.refresh_pages();
        &self.pages
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.options.page_size_options
    }

    /// Whether a page-size chooser makes sense.
    pub fn is_page_size_options_enabled(&self) -> bool {
        self.options.paging && !self.options.page_size_options.is_empty()
    }

    fn refresh_pages(&mut self) {
        self.pages = if self.options.paging {
            page_window(
                self.provider.page_index(),
                self.provider.total_pages(),
                self.options.page_button_count,
            )
        } else {
            Vec::new()
        };
    }

    // =========================================================================
    // Render cycle
    // =========================================================================

    /// Produce the page to display and emit `update`.
    ///
    /// Runs inside a `gridline::render` span on the `gridline::grid` target.
    pub async fn render(&mut self) -> RenderOutcome {
        let span = tracing::debug_span!(
            target: targets::GRID,
            span_names::RENDER,
            mode = ?self.provider.mode()
        );
        async {
            if let Some(outcome) = self.check_errors() {
                return outcome;
            }

            match self.provider.mode() {
                DataMode::Local => {
                    self.refresh_pages();
                    let rows = self.emit_update();
                    RenderOutcome::Updated { rows }
                }
                DataMode::Remote => self.load_page().await,
                DataMode::PageByPage => {
                    if !self.is_results_display_allowed() {
                        return self.withhold();
                    }
                    self.refresh_pages();
                    let rows = self.emit_update();
                    RenderOutcome::Updated { rows }
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Fetch the current page from the remote source and display it.
    ///
    /// This is what [`render`](Self::render) does in remote mode; in
    /// page-by-page mode the host calls it on each page transition.
    pub async fn load_page(&mut self) -> RenderOutcome {
        if let Some(outcome) = self.check_errors() {
            return outcome;
        }
        if !self.is_results_display_allowed() {
            return self.withhold();
        }
        let Some(fetcher) = self.provider.fetcher().cloned() else {
            tracing::error!(target: targets::GRID, "remote render without a data source");
            return RenderOutcome::Failed(GridError::NoRemoteSource);
        };

        let ticket = self.begin_fetch();
        let result = fetcher.fetch(ticket.query()).await;
        self.complete_fetch(&ticket, result)
    }

    /// Start a remote fetch and emit `request_send`.
    ///
    /// Any fetch begun earlier is superseded.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        let ticket = self.provider.begin_fetch();
        let params: Map<String, Value> = ticket
            .query()
            .to_pairs()
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();
        tracing::debug!(target: targets::GRID, seq = ticket.seq(), page = ticket.query().page, "fetch started");
        self.signals
            .emit(GridEvent::new(GridEventKind::RequestSend, Value::Object(params)));
        ticket
    }

    /// Finish the fetch identified by `ticket`.
    ///
    /// Success replaces the page, recomputes pagination and emits `update`.
    /// Failure emits `server_error` and leaves the displayed rows intact.
    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: std::result::Result<PageResponse, NetworkError>,
    ) -> RenderOutcome {
        match self.provider.finish_fetch(ticket, result) {
            Ok(FetchOutcome::Applied { .. }) => {
                self.refresh_pages();
                let rows = self.emit_update();
                RenderOutcome::Updated { rows }
            }
            Ok(FetchOutcome::Stale) => RenderOutcome::Stale,
            Err(err) => {
                tracing::error!(target: targets::GRID, error = %err, "fetch failed");
                self.signals.emit(GridEvent::new(
                    GridEventKind::ServerError,
                    json!({"message": err.to_string(), "status": err.status()}),
                ));
                RenderOutcome::Failed(GridError::Network(err))
            }
        }
    }

    fn check_errors(&self) -> Option<RenderOutcome> {
        if self.errors.is_empty() {
            return None;
        }
        for (column, message) in &self.errors {
            tracing::warn!(target: targets::GRID, column = %column, error = %message, "render aborted by validation error");
            self.signals.emit(
                GridEvent::new(GridEventKind::ValidationError, Value::String(message.clone()))
                    .with_target(EventTarget::Column(column.clone())),
            );
        }
        Some(RenderOutcome::Aborted(self.errors.clone()))
    }

    fn withhold(&mut self) -> RenderOutcome {
        tracing::debug!(target: targets::GRID, "results withheld until a filter is set");
        self.provider.set_source(Vec::new());
        self.provider.set_total_count(Some(0));
        self.refresh_pages();
        RenderOutcome::Withheld
    }

    fn emit_update(&self) -> usize {
        let rows = self.provider.data();
        let count = rows.len();
        self.signals
            .emit(GridEvent::new(GridEventKind::Update, Value::Array(rows)));
        count
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select (`Some(true)`), deselect (`Some(false)`) or toggle (`None`)
    /// `row`, emitting `item_select`.
    pub fn set_row_selection(&mut self, row: &Value, value: Option<bool>) -> Option<SelectionChange> {
        let change = self.selection.set(row, value)?;
        self.signals.emit(
            GridEvent::new(GridEventKind::ItemSelect, Value::Bool(change.selected))
                .with_previous(Value::Bool(change.previous))
                .with_target(EventTarget::Row(change.row.clone())),
        );
        Some(change)
    }

    /// Toggle `row` when selection is enabled.
    pub fn on_row_click(&mut self, row: &Value) -> Option<SelectionChange> {
        if !self.options.selection {
            return None;
        }
        self.set_row_selection(row, None)
    }

    /// Select or deselect every row of the current page (multi-select only).
    pub fn select_all(&mut self, selected: bool) {
        if !(self.options.selection && self.options.selection_multiple) {
            return;
        }
        for row in self.results() {
            self.set_row_selection(&row, Some(selected));
        }
    }

    pub fn is_row_selected(&self, row: &Value) -> bool {
        self.selection.is_selected(row)
    }

    /// Whether every row of a non-empty current page is selected.
    pub fn all_results_selected(&self) -> bool {
        let results = self.results();
        !results.is_empty() && results.iter().all(|row| self.selection.is_selected(row))
    }

    pub fn selected_items(&self) -> &[Value] {
        self.selection.selected_items()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // =========================================================================
    // Presentation hooks
    // =========================================================================

    /// Style of `row` from the row-style callback.
    pub fn row_style(&self, row: &Value) -> Option<String> {
        self.options.row_style_callback.as_ref().map(|callback| callback(row))
    }

    /// Style of the cell of `row` in `column`: the grid-wide cell callback
    /// followed by the column's own, space-separated.
    pub fn cell_style(&self, row: &Value, column: &Column) -> Option<String> {
        let parts: Vec<String> = self
            .options
            .cell_style_callback
            .as_ref()
            .map(|callback| callback(row, column))
            .into_iter()
            .chain(column.cell_style(row))
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

impl std::fmt::Debug for GridController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridController")
            .field("options", &self.options)
            .field("provider", &self.provider)
            .field("selected", &self.selection.len())
            .field("errors", &self.errors)
            .field("pages", &self.pages)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_grid() -> GridController {
        let rows = (1..=45).map(|i| json!({"id": i, "name": format!("n{i:02}")})).collect();
        GridController::new(
            GridOptions::new()
                .with_data(rows)
                .with_columns(vec![Column::new("id").with_type(ColumnType::Number), Column::new("name")]),
        )
        .unwrap()
    }

    #[test]
    fn test_initial_pages() {
        let grid = create_test_grid();
        assert_eq!(grid.total_pages(), 3);
        assert_eq!(grid.pages(), &[1, 2, 3]);
    }

    #[test]
    fn test_paging_disabled() {
        let grid = GridController::new(GridOptions {
            paging: false,
            ..GridOptions::new().with_data(vec![json!({"id": 1}); 30])
        })
        .unwrap();
        assert_eq!(grid.page_size(), PageSize::All);
        assert!(grid.pages().is_empty());
        assert!(!grid.is_page_size_options_enabled());
    }

    #[test]
    fn test_paginate_window_follows_index() {
        let mut grid = GridController::new(
            GridOptions::new()
                .with_data((1..=100).map(|i| json!({"id": i})).collect())
                .with_page_size(PageSize::Limit(10)),
        )
        .unwrap();
        grid.set_page_index(6);
        assert_eq!(grid.paginate(), &[4, 5, 6, 7, 8]);
        grid.set_page_index(10);
        assert_eq!(grid.paginate(), &[6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_paginate_index_past_last_page() {
        let mut grid = create_test_grid();
        grid.set_page_index(usize::MAX);
        assert_eq!(grid.paginate(), &[1, 2, 3]);
        assert!(grid.results().is_empty());
    }

    #[test]
    fn test_numeric_filter_error_message() {
        let mut grid = GridController::new(
            GridOptions::new()
                .with_data(vec![])
                .with_columns(vec![Column::new("age").with_type(ColumnType::Number).with_heading("Age")]),
        )
        .unwrap();
        assert!(!grid.set_filter("age", "abc", None));
        assert_eq!(
            grid.error("age"),
            Some("Invalid filter value for \"Age\". Please enter valid Number.")
        );
        assert!(grid.set_filter("age", "", None));
        assert_eq!(grid.error("age"), None);
    }

    #[test]
    fn test_try_set_filter_reports_typed_errors() {
        let mut grid = create_test_grid();

        let err = grid.try_set_filter("id", "1e", None).unwrap_err();
        assert!(matches!(err, GridError::Validation { ref column, .. } if column == "id"));
        assert_eq!(grid.error("id"), None);

        assert!(grid.provider().filters().is_empty());

        assert!(grid.try_set_filter("id", "7", None).is_ok());
        assert_eq!(grid.count(), 1);
    }

    #[test]
    fn test_clear_all_filters() {
        let mut grid = create_test_grid();
        grid.set_filter("name", "n1", None);
        assert!(!grid.set_filter("id", "x", None));
        grid.clear_all_filters();
        assert!(grid.errors().is_empty());
        assert!(grid.provider().filters().is_empty());
        assert_eq!(grid.total_count(), Some(45));
    }

    #[test]
    fn test_cell_style_joins_hooks() {
        let grid = GridController::new(
            GridOptions::new().with_cell_style(|_, column| format!("cell-{}", column.name)),
        )
        .unwrap();
        let column = Column::new("id").with_cell_style(|_| "num".to_string());
        assert_eq!(grid.cell_style(&json!({}), &column).as_deref(), Some("cell-id num"));
        assert_eq!(grid.row_style(&json!({})), None);
    }
}
