//! Gridline - a data-grid state engine.
//!
//! Gridline decides, for a configured grid, which rows to show and in what
//! order. It covers sorting (stable, dotted-path keys, nulls last), column
//! filters, pagination with a sliding page-button window, identity-keyed row
//! selection and remote page loading over HTTP. Rendering is left to the
//! host: the grid publishes its state and announces every change through
//! [`Signal`]s.
//!
//! # Example
//!
//! ```
//! use gridline::prelude::*;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> gridline::Result<()> {
//! let options = GridOptions::new()
//!     .with_data(vec![
//!         json!({"id": 1, "name": "Bea"}),
//!         json!({"id": 2, "name": "Al"}),
//!         json!({"id": 3, "name": null}),
//!     ])
//!     .with_columns(vec![Column::new("name")])
//!     .with_default_sort("name", SortDirection::Asc);
//!
//! let mut grid = GridController::new(options)?;
//! grid.render().await;
//!
//! let names: Vec<_> = grid.results().iter().map(|row| row["name"].clone()).collect();
//! assert_eq!(names, vec![json!("Al"), json!("Bea"), json!(null)]);
//! # Ok(())
//! # }
//! ```
//!
//! # Crates
//!
//! - [`gridline_core`] (re-exported at the root): signals and logging targets.
//! - [`net`]: HTTP page fetching.

pub use gridline_core::*;

pub mod error;
pub mod grid;
pub mod model;
pub mod prelude;

pub use error::{GridError, Result};

/// Remote page fetching.
pub mod net {
    pub use gridline_net::*;
}
