//! Column definitions.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::FilterCallback;
use crate::model::path;

/// Per-cell style hook: `row -> style class`.
pub type CellStyleCallback = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// How a column's values are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Free text; filters match as case-insensitive substrings.
    #[default]
    String,
    /// Numbers; filter input must be a numeric literal and matches exactly.
    Number,
    /// Rendered by a host template; filtered like text.
    Template,
}

/// Which filter control the column offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// Free-form text input.
    #[default]
    Input,
    /// A fixed list of choices taken from [`Column::items`].
    Select,
}

/// One option of a select filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Label shown to the user.
    pub text: String,
    /// Value written to the filter.
    pub value: String,
}

/// A visible field of the grid.
///
/// `name` is a dotted path into each row. Deserializes with camelCase keys
/// (`type`, `filterType`, `caseInsensitiveSort`, ...); callbacks are set in
/// code.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    pub heading: Option<String>,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub sorting: bool,
    pub filtering: bool,
    pub filter_type: FilterKind,
    pub case_insensitive_sort: bool,
    /// Choices for a select filter: plain values or objects.
    pub items: Vec<Value>,
    /// Field of an object item used as its label.
    pub text_field: Option<String>,
    /// Field of an object item used as its value.
    pub value_field: Option<String>,
    pub css_class: Option<String>,
    /// Replaces the built-in matching for this column.
    #[serde(skip)]
    pub filter_callback: Option<FilterCallback>,
    #[serde(skip)]
    pub cell_style_callback: Option<CellStyleCallback>,
}

impl Default for Column {
    fn default() -> Self {
        Self {
            name: String::new(),
            heading: None,
            column_type: ColumnType::String,
            sorting: true,
            filtering: true,
            filter_type: FilterKind::Input,
            case_insensitive_sort: false,
            items: Vec::new(),
            text_field: None,
            value_field: None,
            css_class: None,
            filter_callback: None,
            cell_style_callback: None,
        }
    }
}

impl Column {
    /// A string column for `name` with default flags.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    pub fn with_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = column_type;
        self
    }

    pub fn with_sorting(mut self, sorting: bool) -> Self {
        self.sorting = sorting;
        self
    }

    pub fn with_filtering(mut self, filtering: bool) -> Self {
        self.filtering = filtering;
        self
    }

    pub fn with_case_insensitive_sort(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive_sort = case_insensitive;
        self
    }

    /// Offer a select filter with `items` as choices.
    pub fn with_select_items(mut self, items: Vec<Value>) -> Self {
        self.filter_type = FilterKind::Select;
        self.items = items;
        self
    }

    pub fn with_filter_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Value, &str) -> bool + Send + Sync + 'static,
    {
        self.filter_callback = Some(Arc::new(callback));
        self
    }

    pub fn with_cell_style<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        self.cell_style_callback = Some(Arc::new(callback));
        self
    }

    /// The heading, or the name when no heading is set.
    pub fn resolve_heading(&self) -> &str {
        match self.heading.as_deref() {
            Some(heading) if !heading.is_empty() => heading,
            _ => &self.name,
        }
    }

    /// Cell text of `row` for this column.
    pub fn resolve_cell(&self, row: &Value) -> String {
        path::get_text(row, &self.name)
    }

    /// Style from the column's cell callback, if any.
    pub fn cell_style(&self, row: &Value) -> Option<String> {
        self.cell_style_callback.as_ref().map(|callback| callback(row))
    }

    pub fn is_input_filter_enabled(&self) -> bool {
        self.filtering && self.filter_type == FilterKind::Input
    }

    pub fn is_select_filter_enabled(&self) -> bool {
        self.filtering && self.filter_type == FilterKind::Select
    }

    pub fn is_template_column(&self) -> bool {
        self.column_type == ColumnType::Template
    }

    /// Select filter choices as label/value pairs.
    ///
    /// Plain items use their text for both. Object items read
    /// `text_field`/`value_field` (default `"text"` and `"value"`); the label
    /// falls back to the value when the text field is missing.
    pub fn select_options(&self) -> Vec<SelectOption> {
        let text_field = self.text_field.as_deref().unwrap_or("text");
        let value_field = self.value_field.as_deref().unwrap_or("value");

        self.items
            .iter()
            .map(|item| match item {
                Value::Object(_) => {
                    let value = path::get_text(item, value_field);
                    let text = path::get(item, text_field)
                        .map(path::value_to_text)
                        .unwrap_or_else(|| value.clone());
                    SelectOption { text, value }
                }
                other => {
                    let text = path::value_to_text(other);
                    SelectOption {
                        value: text.clone(),
                        text,
                    }
                }
            })
            .collect()
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("heading", &self.heading)
            .field("column_type", &self.column_type)
            .field("sorting", &self.sorting)
            .field("filtering", &self.filtering)
            .field("filter_type", &self.filter_type)
            .field("case_insensitive_sort", &self.case_insensitive_sort)
            .field("filter_callback", &self.filter_callback.is_some())
            .field("cell_style_callback", &self.cell_style_callback.is_some())
            .finish_non_exhaustive()
    }
}
