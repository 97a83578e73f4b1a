//! Row selection keyed by a unique-id field.
//!
//! Selection is tracked out of band: rows are never mutated. Each row is
//! identified by the value at the configured unique-id path, so the same
//! logical row stays selected across re-fetches and re-renders even when
//! the row object itself is replaced.

use std::collections::HashMap;

use gridline_core::logging::targets;
use serde_json::Value;

use super::path;

/// Whether more than one row may be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Selecting a row clears every other selection.
    Single,
    /// Any number of rows may be selected.
    #[default]
    Multiple,
}

impl SelectionMode {
    /// `Multiple` when `multiple` is true, otherwise `Single`.
    pub fn from_multiple(multiple: bool) -> Self {
        if multiple { Self::Multiple } else { Self::Single }
    }
}

/// The outcome of a single selection update.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionChange {
    /// The row that was updated.
    pub row: Value,
    /// Whether it was selected before.
    pub previous: bool,
    /// Whether it is selected now.
    pub selected: bool,
}

/// Selected rows, in selection order, plus an id lookup.
#[derive(Debug, Clone)]
pub struct RowSelection {
    unique_id: String,
    mode: SelectionMode,
    flags: HashMap<String, bool>,
    items: Vec<Value>,
}

impl RowSelection {
    /// Empty selection identifying rows by `unique_id`.
    pub fn new(unique_id: impl Into<String>, mode: SelectionMode) -> Self {
        Self {
            unique_id: unique_id.into(),
            mode,
            flags: HashMap::new(),
            items: Vec::new(),
        }
    }

    /// The unique-id path.
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// The selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Change the selection mode. Switching to `Single` keeps only the most
    /// recently selected row.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
        if mode == SelectionMode::Single && self.items.len() > 1 {
            let last = self.items.pop();
            self.clear();
            if let Some(row) = last {
                self.set(&row, Some(true));
            }
        }
    }

    /// Selection key of `row`, if it has a unique id.
    pub fn key_of(&self, row: &Value) -> Option<String> {
        path::get(row, &self.unique_id).map(|id| id.to_string())
    }

    /// Select, deselect (`Some`) or toggle (`None`) `row`.
    ///
    /// Returns `None`, leaving the selection untouched, when the row has no
    /// unique id.
    pub fn set(&mut self, row: &Value, value: Option<bool>) -> Option<SelectionChange> {
        let Some(key) = self.key_of(row) else {
            tracing::warn!(
                target: targets::SELECTION,
                unique_id = %self.unique_id,
                "row has no unique id, ignoring selection"
            );
            return None;
        };

        let previous = self.flags.get(&key).copied().unwrap_or(false);
        let selected = value.unwrap_or(!previous);

        if selected && self.mode == SelectionMode::Single {
            self.clear();
        }

        if selected {
            self.flags.insert(key.clone(), true);
            if !self.contains_key(&key) {
                self.items.push(row.clone());
            }
        } else {
            self.flags.remove(&key);
            let unique_id = &self.unique_id;
            self.items
                .retain(|item| path::get(item, unique_id).map(|id| id.to_string()).as_deref() != Some(key.as_str()));
        }

        tracing::debug!(target: targets::SELECTION, %key, previous, selected, "row selection updated");
        Some(SelectionChange {
            row: row.clone(),
            previous,
            selected,
        })
    }

    /// Whether `row` is selected.
    pub fn is_selected(&self, row: &Value) -> bool {
        self.key_of(row)
            .and_then(|key| self.flags.get(&key).copied())
            .unwrap_or(false)
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.flags.clear();
        self.items.clear();
    }

    /// Selected rows in the order they were selected.
    pub fn selected_items(&self) -> &[Value] {
        &self.items
    }

    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn contains_key(&self, key: &str) -> bool {
        self.items
            .iter()
            .any(|item| self.key_of(item).as_deref() == Some(key))
    }
}
