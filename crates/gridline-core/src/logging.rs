//! Tracing targets and span names used across Gridline.
//!
//! Gridline never installs a subscriber. To see its logs, install one in the
//! host application and filter on the targets below:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("gridline::grid=debug,gridline_net=debug")
//!     .init();
//! ```

/// Span names for grid operations.
pub mod span_names {
    /// A full render cycle.
    pub const RENDER: &str = "gridline::render";
    /// A remote page fetch.
    pub const FETCH: &str = "gridline::fetch";
}

/// Target names for log filtering.
pub mod targets {
    /// Grid controller target.
    pub const GRID: &str = "gridline::grid";
    /// Data provider target.
    pub const PROVIDER: &str = "gridline::provider";
    /// Row selection target.
    pub const SELECTION: &str = "gridline::selection";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "gridline_core::signal";
    /// HTTP transport target.
    pub const NET: &str = "gridline_net::http";
}
