//! Grid configuration and orchestration.
//!
//! [`GridOptions`] and [`Column`] describe a grid. [`GridController`] owns a
//! [`DataProvider`](crate::model::DataProvider) built from them and exposes
//! the user-facing operations; every state change is announced through the
//! signals in [`GridSignals`].
//!
//! # Example
//!
//! ```
//! use gridline::grid::{Column, GridController, GridOptions};
//! use serde_json::json;
//!
//! let grid = GridController::new(
//!     GridOptions::new()
//!         .with_data(vec![json!({"id": 1, "name": "Ann"})])
//!         .with_columns(vec![Column::new("name")]),
//! )
//! .unwrap();
//!
//! grid.signals().update.connect(|event| {
//!     println!("{} rows", event.data.as_array().map_or(0, Vec::len));
//! });
//! ```

mod column;
mod controller;
mod event;
mod options;

pub use column::{CellStyleCallback, Column, ColumnType, FilterKind, SelectOption};
pub use controller::{GridController, RenderOutcome};
pub use event::{EventTarget, GridEvent, GridEventKind, GridSignals};
pub use options::{CellStyleHook, GridOptions, RowStyleCallback};
