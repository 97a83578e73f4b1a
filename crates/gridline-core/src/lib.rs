//! Core primitives for Gridline.
//!
//! This crate holds the pieces shared by every Gridline crate:
//!
//! - [`Signal`]: synchronous signal/slot notifications
//! - [`logging`]: tracing targets and span names

pub mod logging;
pub mod signal;

pub use signal::{ConnectionGuard, ConnectionId, Signal};
