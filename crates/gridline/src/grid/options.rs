//! Grid configuration.
//!
//! [`GridOptions`] is a plain struct with documented defaults. It can be
//! built in code, or loaded from JSON/TOML with camelCase keys:
//!
//! ```
//! use gridline::grid::GridOptions;
//! use gridline::model::PageSize;
//!
//! let options = GridOptions::from_json_str(r#"{
//!     "url": "https://api.example.com/people",
//!     "defaultPageSize": 50,
//!     "defaultSortColumn": "name",
//!     "defaultSortType": "desc",
//!     "columns": [{"name": "name"}, {"name": "age", "type": "number"}]
//! }"#).unwrap();
//!
//! assert_eq!(options.default_page_size, PageSize::Limit(50));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use gridline_net::{DEFAULT_TOTAL_COUNT_HEADER, HttpClientConfig, QueryParamNames};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::column::Column;
use crate::error::{GridError, Result};
use crate::model::{DataItemCallback, DataMode, PageSize, SortDirection};

/// Row style hook: `row -> style class`.
pub type RowStyleCallback = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// Cell style hook: `(row, column) -> style class`.
pub type CellStyleHook = Arc<dyn Fn(&Value, &Column) -> String + Send + Sync>;

/// Everything a grid is configured with.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridOptions {
    /// Static rows (local mode).
    pub data: Option<Vec<Value>>,
    /// Remote endpoint; selects remote mode.
    pub url: Option<String>,
    /// Let the host drive each page load instead of fetching on render.
    pub page_by_page_loading: bool,
    /// Initial page size (20). `false` disables paging.
    pub default_page_size: PageSize,
    /// Page sizes offered to the user ([20, 50, 100]).
    pub page_size_options: Vec<usize>,
    /// Maximum number of page buttons (5).
    pub page_button_count: usize,
    pub default_sort_column: Option<String>,
    /// Direction of the default sort (asc).
    pub default_sort_type: SortDirection,
    pub default_filtering_column: Option<String>,
    pub default_filtering_column_value: Option<String>,
    /// Withhold results until some column has a filter (false).
    pub require_filters: bool,
    /// Global switch for sorting (true).
    pub sorting: bool,
    /// Global switch for filtering (true).
    pub filtering: bool,
    /// Global switch for paging (true).
    pub paging: bool,
    /// Enable row selection (false).
    pub selection: bool,
    /// Allow more than one selected row (true).
    pub selection_multiple: bool,
    /// Dotted path of the row identity used for selection ("id").
    pub unique_id: String,
    /// Query key for the page index ("page").
    pub page_param: String,
    /// Query key for the page size ("pageSize").
    pub page_size_param: String,
    /// Query key for the sort column ("orderBy").
    pub sort_param: String,
    /// Response header with the total row count ("X-Pagination-Total-Count").
    pub total_count_header: String,
    /// Static parameters sent with every fetch.
    pub additional_request_params: BTreeMap<String, String>,
    /// Timeouts and headers for the built-in HTTP fetcher.
    pub http: HttpClientConfig,
    pub columns: Vec<Column>,
    #[serde(skip)]
    pub row_style_callback: Option<RowStyleCallback>,
    #[serde(skip)]
    pub cell_style_callback: Option<CellStyleHook>,
    /// Applied to incoming rows; each row becomes zero or more rows.
    #[serde(skip)]
    pub data_item_callback: Option<DataItemCallback>,
}

impl Default for GridOptions {
    fn default() -> Self {
        let names = QueryParamNames::default();
        Self {
            data: None,
            url: None,
            page_by_page_loading: false,
            default_page_size: PageSize::Limit(20),
            page_size_options: vec![20, 50, 100],
            page_button_count: 5,
            default_sort_column: None,
            default_sort_type: SortDirection::Asc,
            default_filtering_column: None,
            default_filtering_column_value: None,
            require_filters: false,
            sorting: true,
            filtering: true,
            paging: true,
            selection: false,
            selection_multiple: true,
            unique_id: "id".to_string(),
            page_param: names.page,
            page_size_param: names.page_size,
            sort_param: names.sort,
            total_count_header: DEFAULT_TOTAL_COUNT_HEADER.to_string(),
            additional_request_params: BTreeMap::new(),
            http: HttpClientConfig::default(),
            columns: Vec::new(),
            row_style_callback: None,
            cell_style_callback: None,
            data_item_callback: None,
        }
    }
}

impl GridOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse options from TOML.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Ok(toml::from_str(toml)?)
    }

    /// Local mode over `rows`.
    pub fn with_data(mut self, rows: Vec<Value>) -> Self {
        self.data = Some(rows);
        self
    }

    /// Remote mode against `url`.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_page_size(mut self, size: impl Into<PageSize>) -> Self {
        self.default_page_size = size.into();
        self
    }

    pub fn with_default_sort(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.default_sort_column = Some(column.into());
        self.default_sort_type = direction;
        self
    }

    pub fn with_default_filter(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_filtering_column = Some(column.into());
        self.default_filtering_column_value = Some(value.into());
        self
    }

    pub fn with_row_style<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        self.row_style_callback = Some(Arc::new(callback));
        self
    }

    pub fn with_cell_style<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Value, &Column) -> String + Send + Sync + 'static,
    {
        self.cell_style_callback = Some(Arc::new(callback));
        self
    }

    pub fn with_data_item_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Value) -> Vec<Value> + Send + Sync + 'static,
    {
        self.data_item_callback = Some(Arc::new(callback));
        self
    }

    /// The data mode these options select.
    pub fn data_mode(&self) -> DataMode {
        if self.page_by_page_loading {
            DataMode::PageByPage
        } else if self.url.is_some() {
            DataMode::Remote
        } else {
            DataMode::Local
        }
    }

    /// Query key names for remote requests.
    pub fn param_names(&self) -> QueryParamNames {
        QueryParamNames {
            page: self.page_param.clone(),
            page_size: self.page_size_param.clone(),
            sort: self.sort_param.clone(),
        }
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Check the options for values no grid can work with.
    pub fn validate(&self) -> Result<()> {
        if self.unique_id.trim().is_empty() {
            return Err(GridError::config("uniqueId must not be empty"));
        }
        for (key, value) in [
            ("pageParam", &self.page_param),
            ("pageSizeParam", &self.page_size_param),
            ("sortParam", &self.sort_param),
            ("totalCountHeader", &self.total_count_header),
        ] {
            if value.trim().is_empty() {
                return Err(GridError::config(format!("{key} must not be empty")));
            }
        }
        if self.default_page_size == PageSize::Limit(0) {
            return Err(GridError::config("defaultPageSize must be positive or false"));
        }
        if self.page_size_options.contains(&0) {
            return Err(GridError::config("pageSizeOptions must be positive"));
        }
        if let Some(url) = &self.url {
            url::Url::parse(url)
                .map_err(|e| GridError::config(format!("url \"{url}\" is invalid: {e}")))?;
        }
        let mut seen = std::collections::HashSet::new();
        for column in &self.columns {
            if column.name.is_empty() {
                return Err(GridError::config("column name must not be empty"));
            }
            if !seen.insert(column.name.as_str()) {
                return Err(GridError::config(format!("duplicate column \"{}\"", column.name)));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for GridOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridOptions")
            .field("data", &self.data.as_ref().map(Vec::len))
            .field("url", &self.url)
            .field("page_by_page_loading", &self.page_by_page_loading)
            .field("default_page_size", &self.default_page_size)
            .field("page_size_options", &self.page_size_options)
            .field("page_button_count", &self.page_button_count)
            .field("default_sort_column", &self.default_sort_column)
            .field("default_sort_type", &self.default_sort_type)
            .field("require_filters", &self.require_filters)
            .field("sorting", &self.sorting)
            .field("filtering", &self.filtering)
            .field("paging", &self.paging)
            .field("selection", &self.selection)
            .field("selection_multiple", &self.selection_multiple)
            .field("unique_id", &self.unique_id)
            .field("http", &self.http)
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::column::ColumnType;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options = GridOptions::default();
        assert_eq!(options.default_page_size, PageSize::Limit(20));
        assert_eq!(options.page_size_options, vec![20, 50, 100]);
        assert_eq!(options.page_button_count, 5);
        assert_eq!(options.default_sort_type, SortDirection::Asc);
        assert!(options.sorting && options.filtering && options.paging);
        assert!(!options.selection);
        assert!(options.selection_multiple);
        assert_eq!(options.unique_id, "id");
        assert_eq!(options.param_names(), QueryParamNames::default());
        assert_eq!(options.total_count_header, "X-Pagination-Total-Count");
        assert_eq!(options.data_mode(), DataMode::Local);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_data_mode_resolution() {
        assert_eq!(
            GridOptions::new().with_url("http://localhost/x").data_mode(),
            DataMode::Remote
        );
        let options = GridOptions {
            page_by_page_loading: true,
            ..GridOptions::new().with_url("http://localhost/x")
        };
        assert_eq!(options.data_mode(), DataMode::PageByPage);
    }

    #[test]
    fn test_from_json() {
        let options = GridOptions::from_json_str(
            r#"{
                "data": [{"id": 1}],
                "defaultPageSize": false,
                "selection": true,
                "selectionMultiple": false,
                "sortParam": "sort",
                "additionalRequestParams": {"apiKey": "k"},
                "http": {"timeoutMs": 2500, "headers": {"x-tenant": "acme"}},
                "columns": [{"name": "age", "type": "number"}]
            }"#,
        )
        .unwrap();

        assert_eq!(options.data, Some(vec![json!({"id": 1})]));
        assert_eq!(options.default_page_size, PageSize::All);
        assert!(options.selection);
        assert!(!options.selection_multiple);
        assert_eq!(options.param_names().sort, "sort");
        assert_eq!(options.additional_request_params["apiKey"], "k");
        assert_eq!(options.http.timeout(), Some(std::time::Duration::from_millis(2500)));
        assert_eq!(options.http.headers["x-tenant"], "acme");
        assert_eq!(options.column("age").map(|c| c.column_type), Some(ColumnType::Number));
    }

    #[test]
    fn test_from_toml() {
        let options = GridOptions::from_toml_str(
            r#"
            url = "https://api.example.com/people"
            defaultPageSize = 50
            defaultSortColumn = "name"
            defaultSortType = "desc"
            requireFilters = true

            [[columns]]
            name = "name"
            heading = "Name"
            caseInsensitiveSort = true
            "#,
        )
        .unwrap();

        assert_eq!(options.data_mode(), DataMode::Remote);
        assert_eq!(options.default_page_size, PageSize::Limit(50));
        assert_eq!(options.default_sort_type, SortDirection::Desc);
        assert!(options.require_filters);
        assert!(options.columns[0].case_insensitive_sort);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            GridOptions::from_json_str(r#"{"defaultPageSize": true}"#),
            Err(GridError::ConfigParse(_))
        ));
        assert!(matches!(
            GridOptions::from_toml_str("defaultSortType = \"up\""),
            Err(GridError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_validate() {
        let invalid = [
            GridOptions { unique_id: " ".into(), ..GridOptions::new() },
            GridOptions { sort_param: String::new(), ..GridOptions::new() },
            GridOptions::new().with_page_size(PageSize::Limit(0)),
            GridOptions { page_size_options: vec![10, 0], ..GridOptions::new() },
            GridOptions::new().with_url("not a url"),
            GridOptions::new().with_columns(vec![Column::new("a"), Column::new("a")]),
        ];
        for options in invalid {
            assert!(matches!(options.validate(), Err(GridError::Config(_))), "{options:?}");
        }
    }
}
