//! Reconstruction of the region stack and timing metrics.
//!
//! This module transforms decoded trace2 events into:
//! - Depth-assigned rectangles (for flamegraph generation)
//! - Hot region analysis (labels covering the most time)

pub mod metrics;
pub mod stack_builder;

// Re-export main types and functions
pub use metrics::{calculate_hot_regions, calculate_region_stats, RegionStat};
pub use stack_builder::{extract_regions, Extraction, HelperFilter, Rectangle};
