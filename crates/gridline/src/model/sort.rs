//! Single-column row sorting.
//!
//! Rows are ordered by one key resolved through a dotted path. Missing and
//! `null` keys compare greater than every real value, so they collect at the
//! end of an ascending sort and at the start of a descending one. The sort is
//! stable in both directions.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::path;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortDirection {
    /// `"asc"` or `"desc"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Whether this is [`SortDirection::Desc`].
    pub fn is_descending(self) -> bool {
        self == Self::Desc
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown sort direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSortDirectionError(pub String);

impl fmt::Display for ParseSortDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sort direction \"{}\" (expected asc or desc)", self.0)
    }
}

impl std::error::Error for ParseSortDirectionError {}

impl FromStr for SortDirection {
    type Err = ParseSortDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ParseSortDirectionError(s.to_string())),
        }
    }
}

/// The active sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    /// Dotted path of the sort column; `None` leaves rows in source order.
    pub column: Option<String>,
    /// Current direction. Kept when the column changes.
    pub direction: SortDirection,
    /// Compare text keys lower-cased. Set per call, never sticky.
    pub case_insensitive: bool,
}

impl SortState {
    /// Update the sort.
    ///
    /// A missing `direction` keeps the previous one; `case_insensitive`
    /// falls back to `false`.
    pub fn set(
        &mut self,
        column: impl Into<String>,
        direction: Option<SortDirection>,
        case_insensitive: Option<bool>,
    ) {
        self.column = Some(column.into());
        if let Some(direction) = direction {
            self.direction = direction;
        }
        self.case_insensitive = case_insensitive.unwrap_or(false);
    }

    /// Whether `column` is the active sort column.
    pub fn is_sorted_by(&self, column: &str) -> bool {
        self.column.as_deref() == Some(column)
    }

    /// Sort `rows` in place. No-op without an active column.
    pub fn apply(&self, rows: &mut [Value]) {
        if let Some(column) = &self.column {
            sort_rows(rows, column, self.direction, self.case_insensitive);
        }
    }
}

/// Stable sort of `rows` by the value at `column`.
pub fn sort_rows(rows: &mut [Value], column: &str, direction: SortDirection, case_insensitive: bool) {
    rows.sort_by(|a, b| {
        let ka = SortKey::extract(a, column, case_insensitive);
        let kb = SortKey::extract(b, column, case_insensitive);
        let ordering = ka.compare(&kb);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// A comparable projection of a cell value.
///
/// Variant order is the cross-type order: booleans, then numbers, then
/// text, then containers, then absent values.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Bool(bool),
    Number(f64),
    Text(String),
    Other(String),
    Empty,
}

impl SortKey {
    fn extract(row: &Value, column: &str, case_insensitive: bool) -> Self {
        match path::get(row, column) {
            None | Some(Value::Null) => Self::Empty,
            Some(Value::Bool(b)) => Self::Bool(*b),
            Some(Value::Number(n)) => n.as_f64().map_or(Self::Empty, Self::Number),
            Some(Value::String(s)) if case_insensitive => Self::Text(s.to_lowercase()),
            Some(Value::String(s)) => Self::Text(s.clone()),
            Some(other) => Self::Other(other.to_string()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Number(_) => 1,
            Self::Text(_) => 2,
            Self::Other(_) => 3,
            Self::Empty => 4,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) | (Self::Other(a), Self::Other(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}
