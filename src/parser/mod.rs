//! Trace parsing and event definitions.
//!
//! This module handles:
//! - Decoding trace2 JSON lines
//! - Filtering to start/region_enter/region_leave/exit events
//! - Resolving timestamps to milliseconds

pub mod schema;
pub mod trace2;

// Re-export main types
pub use schema::{EventKind, RawEvent, TraceEvent};
pub use trace2::{parse_events, parse_line, parse_timestamp, read_events};
