//! trace2-flamegraph
//!
//! Turns a Git trace2 event log (`GIT_TRACE2_EVENT`) into a time-scaled
//! SVG flame graph: one bar per process or region, stacked by nesting.
//!
//! ```bash
//! GIT_TRACE2_EVENT="$(pwd)/trace.txt" GIT_TRACE2_EVENT_DEPTH=100 git status
//! trace2-flamegraph render trace.txt -o flamegraph.svg
//! ```

pub mod aggregator;
pub mod commands;
pub mod flamegraph;
pub mod output;
pub mod parser;
pub mod utils;
