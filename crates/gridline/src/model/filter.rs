//! Column filters.
//!
//! A [`FilterState`] maps column paths to [`FilterEntry`] values. A row
//! passes when every entry matches it. Entries never hold blank input:
//! setting a blank value removes the column's entry instead.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::{Regex, RegexBuilder};
use serde_json::Value;

use super::path;

/// Custom predicate: `(row, raw filter value) -> matches`.
pub type FilterCallback = Arc<dyn Fn(&Value, &str) -> bool + Send + Sync>;

static NUMERIC_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:NaN|-?(?:(?:\d+|\d*\.\d+)(?:[Ee][+-]?\d+)?|Infinity))$")
        .expect("numeric literal pattern compiles")
});

/// Whether `value` is a numeric literal: an optionally negative integer or
/// decimal with optional exponent, `Infinity`, `-Infinity` or `NaN`.
pub fn is_numeric_literal(value: &str) -> bool {
    NUMERIC_LITERAL.is_match(value)
}

/// Parse a numeric literal accepted by [`is_numeric_literal`].
pub fn parse_numeric_literal(value: &str) -> Option<f64> {
    if !is_numeric_literal(value) {
        return None;
    }
    match value {
        "NaN" => Some(f64::NAN),
        "Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        other => other.parse().ok(),
    }
}

/// Whether filter input should clear the filter rather than set it.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// How an entry decides whether a row matches.
#[derive(Clone)]
pub enum FilterMatcher {
    /// Case-insensitive search for the escaped value anywhere in the cell text.
    Pattern(Regex),
    /// Numeric equality with the cell; falls back to exact text equality.
    Numeric,
    /// Caller-supplied predicate over the whole row.
    Custom(FilterCallback),
}

impl fmt::Debug for FilterMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            Self::Numeric => f.write_str("Numeric"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One active column filter.
#[derive(Debug, Clone)]
pub struct FilterEntry {
    raw: String,
    escaped: String,
    matcher: FilterMatcher,
}

impl FilterEntry {
    /// Text match on the regex-escaped `raw` value, ignoring case.
    pub fn pattern(raw: impl Into<String>) -> Result<Self, regex::Error> {
        let raw = raw.into();
        let escaped = regex::escape(&raw);
        let regex = RegexBuilder::new(&escaped).case_insensitive(true).build()?;
        Ok(Self {
            raw,
            escaped,
            matcher: FilterMatcher::Pattern(regex),
        })
    }

    /// Numeric equality against `raw`.
    pub fn numeric(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let escaped = regex::escape(&raw);
        Self {
            raw,
            escaped,
            matcher: FilterMatcher::Numeric,
        }
    }

    /// Delegate matching to `callback`.
    pub fn custom(raw: impl Into<String>, callback: FilterCallback) -> Self {
        let raw = raw.into();
        let escaped = regex::escape(&raw);
        Self {
            raw,
            escaped,
            matcher: FilterMatcher::Custom(callback),
        }
    }

    /// The value as the user entered it.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The regex-escaped form of [`raw`](Self::raw).
    pub fn escaped(&self) -> &str {
        &self.escaped
    }

    /// The matching strategy.
    pub fn matcher(&self) -> &FilterMatcher {
        &self.matcher
    }

    /// Test `row`, reading the cell at `column`.
    pub fn matches(&self, row: &Value, column: &str) -> bool {
        match &self.matcher {
            FilterMatcher::Custom(callback) => callback(row, &self.raw),
            FilterMatcher::Pattern(regex) => regex.is_match(&path::get_text(row, column)),
            FilterMatcher::Numeric => numeric_matches(path::get(row, column), &self.raw),
        }
    }
}

fn numeric_matches(cell: Option<&Value>, raw: &str) -> bool {
    let wanted = parse_numeric_literal(raw);
    let actual = match cell {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_numeric_literal(s.trim()),
        _ => None,
    };

    match (actual, wanted) {
        (Some(a), Some(b)) if a.is_nan() && b.is_nan() => true,
        (Some(a), Some(b)) => a == b,
        _ => cell.map(path::value_to_text).unwrap_or_default() == raw,
    }
}

/// All active filters, keyed by column path.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    entries: BTreeMap<String, FilterEntry>,
}

impl FilterState {
    /// An empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or replace the entry for `column`.
    pub fn insert(&mut self, column: impl Into<String>, entry: FilterEntry) {
        self.entries.insert(column.into(), entry);
    }

    /// Set a text filter, or remove the entry when `value` is blank.
    pub fn set(&mut self, column: &str, value: &str) -> Result<(), regex::Error> {
        if is_blank(value) {
            self.entries.remove(column);
        } else {
            self.insert(column, FilterEntry::pattern(value)?);
        }
        Ok(())
    }

    /// Remove the entry for `column`.
    pub fn remove(&mut self, column: &str) -> Option<FilterEntry> {
        self.entries.remove(column)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The entry for `column`.
    pub fn get(&self, column: &str) -> Option<&FilterEntry> {
        self.entries.get(column)
    }

    /// Whether `column` has an active filter.
    pub fn contains(&self, column: &str) -> bool {
        self.entries.contains_key(column)
    }

    /// Number of active filters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no filter is active.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Active filters in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether `row` passes every filter.
    pub fn matches(&self, row: &Value) -> bool {
        self.entries
            .iter()
            .all(|(column, entry)| entry.matches(row, column))
    }

    /// Rows of `rows` passing every filter, in order.
    pub fn apply(&self, rows: &[Value]) -> Vec<Value> {
        rows.iter().filter(|row| self.matches(row)).cloned().collect()
    }
}
