//! Output JSON schema for region reports.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use crate::aggregator::{Extraction, Rectangle, RegionStat};
use crate::utils::config::SCHEMA_VERSION;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level region report written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the report was generated
    pub generated_at: DateTime<Utc>,

    /// Last event time minus first event time
    pub total_duration_ms: i64,

    /// Highest occupied row
    pub max_depth: usize,

    /// Open events counted by the preliminary pass
    pub max_nesting: usize,

    /// Helper process closes that were dropped
    pub excluded_frames: usize,

    /// Close events that did not match the stack
    pub mismatched_closes: usize,

    /// Every extracted rectangle, in flush order
    pub rectangles: Vec<Rectangle>,

    /// Labels covering the most time
    pub hot_regions: Vec<RegionStat>,
}

impl RegionReport {
    pub fn new(extraction: &Extraction, hot_regions: Vec<RegionStat>) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            total_duration_ms: extraction.total_duration_ms,
            max_depth: extraction.max_depth,
            max_nesting: extraction.max_nesting,
            excluded_frames: extraction.excluded,
            mismatched_closes: extraction.mismatched,
            rectangles: extraction.rectangles.clone(),
            hot_regions,
        }
    }
}
