//! Flamegraph layout and rendering.
//!
//! This module turns extracted rectangles into a time-scaled SVG
//! flame graph, and hot region stats into a terminal table.

pub mod generator;
pub mod summary;

// Re-export main types
pub use generator::{generate_flamegraph, FlamegraphConfig, TimeScale};
pub use summary::generate_text_summary;
