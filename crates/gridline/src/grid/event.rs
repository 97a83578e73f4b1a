//! Grid notifications.
//!
//! Every state change a renderer may care about is announced through one of
//! the [`GridSignals`]. Each carries a [`GridEvent`] with the event kind, a
//! payload (`data`), the previous value where that makes sense, and the
//! column or row the event is about.

use std::fmt;

use gridline_core::Signal;
use serde_json::Value;

/// The kind of a [`GridEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridEventKind {
    SortChange,
    FilterChange,
    PageChange,
    PageSizeChange,
    ItemSelect,
    RequestSend,
    ServerError,
    Update,
    ValidationError,
}

impl GridEventKind {
    /// Wire name of the kind, e.g. `"sortChange"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SortChange => "sortChange",
            Self::FilterChange => "filterChange",
            Self::PageChange => "pageChange",
            Self::PageSizeChange => "pageSizeChange",
            Self::ItemSelect => "itemSelect",
            Self::RequestSend => "requestSend",
            Self::ServerError => "serverError",
            Self::Update => "update",
            Self::ValidationError => "validationError",
        }
    }
}

impl fmt::Display for GridEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an event refers to.
#[derive(Debug, Clone, PartialEq)]
pub enum EventTarget {
    /// A column, by name.
    Column(String),
    /// A row.
    Row(Value),
}

/// A single notification.
#[derive(Debug, Clone, PartialEq)]
pub struct GridEvent {
    pub kind: GridEventKind,
    /// Event payload; for `update`, the rows of the page as an array.
    pub data: Value,
    /// Value before the change, where applicable.
    pub previous: Option<Value>,
    pub target: Option<EventTarget>,
}

impl GridEvent {
    /// An event with no previous value and no target.
    pub fn new(kind: GridEventKind, data: Value) -> Self {
        Self {
            kind,
            data,
            previous: None,
            target: None,
        }
    }

    pub fn with_previous(mut self, previous: Value) -> Self {
        self.previous = Some(previous);
        self
    }

    pub fn with_target(mut self, target: EventTarget) -> Self {
        self.target = Some(target);
        self
    }

    /// The target column name, if the target is a column.
    pub fn target_column(&self) -> Option<&str> {
        match &self.target {
            Some(EventTarget::Column(name)) => Some(name),
            _ => None,
        }
    }

    /// The target row, if the target is a row.
    pub fn target_row(&self) -> Option<&Value> {
        match &self.target {
            Some(EventTarget::Row(row)) => Some(row),
            _ => None,
        }
    }
}

/// Signals emitted by a grid.
///
/// Connect to the ones you need:
///
/// ```
/// use gridline::grid::GridSignals;
///
/// let signals = GridSignals::new();
/// signals.update.connect(|event| {
///     println!("{} rows to paint", event.data.as_array().map_or(0, Vec::len));
/// });
/// ```
pub struct GridSignals {
    // -------------------------------------------------------------------------
    // State changes
    // -------------------------------------------------------------------------
    /// Sort column or direction changed. Data: direction; target: column.
    pub sort_change: Signal<GridEvent>,

    /// A filter was set or cleared. Data: raw value; target: column.
    pub filter_change: Signal<GridEvent>,

    /// Page index changed. Data: new index.
    pub page_change: Signal<GridEvent>,

    /// Page size changed. Data: new size (number or `false`).
    pub page_size_change: Signal<GridEvent>,

    /// A row was selected or deselected. Data: new flag; previous: old flag;
    /// target: row.
    pub item_select: Signal<GridEvent>,

    // -------------------------------------------------------------------------
    // Render cycle
    // -------------------------------------------------------------------------
    /// A remote fetch was sent. Data: the query parameters.
    pub request_send: Signal<GridEvent>,

    /// A remote fetch failed. Data: error message and status.
    pub server_error: Signal<GridEvent>,

    /// A new page is ready to display. Data: the rows.
    pub update: Signal<GridEvent>,

    /// A render was aborted by an invalid filter. Data: message; target:
    /// column.
    pub validation_error: Signal<GridEvent>,
}

impl GridSignals {
    pub fn new() -> Self {
        Self {
            sort_change: Signal::new(),
            filter_change: Signal::new(),
            page_change: Signal::new(),
            page_size_change: Signal::new(),
            item_select: Signal::new(),
            request_send: Signal::new(),
            server_error: Signal::new(),
            update: Signal::new(),
            validation_error: Signal::new(),
        }
    }

    /// The signal carrying events of `kind`.
    pub fn signal(&self, kind: GridEventKind) -> &Signal<GridEvent> {
        match kind {
            GridEventKind::SortChange => &self.sort_change,
            GridEventKind::FilterChange => &self.filter_change,
            GridEventKind::PageChange => &self.page_change,
            GridEventKind::PageSizeChange => &self.page_size_change,
            GridEventKind::ItemSelect => &self.item_select,
            GridEventKind::RequestSend => &self.request_send,
            GridEventKind::ServerError => &self.server_error,
            GridEventKind::Update => &self.update,
            GridEventKind::ValidationError => &self.validation_error,
        }
    }

    /// Emit `event` on the signal matching its kind.
    pub fn emit(&self, event: GridEvent) {
        self.signal(event.kind).emit(event);
    }

    /// Block or unblock every signal.
    pub fn set_blocked(&self, blocked: bool) {
        for signal in self.all() {
            signal.set_blocked(blocked);
        }
    }

    fn all(&self) -> [&Signal<GridEvent>; 9] {
        [
            &self.sort_change,
            &self.filter_change,
            &self.page_change,
            &self.page_size_change,
            &self.item_select,
            &self.request_send,
            &self.server_error,
            &self.update,
            &self.validation_error,
        ]
    }
}

impl Default for GridSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GridSignals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridSignals").finish_non_exhaustive()
    }
}
