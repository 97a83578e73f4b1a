//! Prelude module for Gridline.
//!
//! ```ignore
//! use gridline::prelude::*;
//! ```

// ============================================================================
// Grid
// ============================================================================

pub use crate::grid::{
    Column, ColumnType, EventTarget, FilterKind, GridController, GridEvent, GridEventKind,
    GridOptions, GridSignals, RenderOutcome,
};

// ============================================================================
// Model
// ============================================================================

pub use crate::model::{DataMode, DataProvider, PageSize, SelectionMode, SortDirection};

// ============================================================================
// Signals and errors
// ============================================================================

pub use crate::error::{GridError, Result};
pub use crate::{ConnectionId, Signal};

// ============================================================================
// Networking
// ============================================================================

pub use crate::net::{
    HttpClientConfig, HttpPageFetcher, NetworkError, PageFetcher, PageQuery, PageResponse,
};
