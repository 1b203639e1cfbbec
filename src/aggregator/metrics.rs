//! Calculate per-label timing statistics from extracted rectangles.
//!
//! Hot regions are the labels that cover the most wall-clock time.
//! These are the primary targets when a git command feels slow.

use super::stack_builder::Rectangle;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate timing for one label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionStat {
    pub label: String,

    /// Summed duration of every rectangle with this label
    pub total_ms: i64,

    /// Number of spans, counting merged repeats
    pub calls: u32,

    /// Share of the whole trace duration
    pub percentage: f64,
}

/// Calculate timing stats for every label
///
/// **Public** - base for the summary table and the JSON report
///
/// # Arguments
/// * `rectangles` - Rectangles from `extract_regions`
/// * `total_duration_ms` - Trace duration used as the percentage base
///
/// # Returns
/// Stats sorted by total time (descending), then label
pub fn calculate_region_stats(rectangles: &[Rectangle], total_duration_ms: i64) -> Vec<RegionStat> {
    debug!("Calculating region stats from {} rectangles", rectangles.len());

    let mut by_label: BTreeMap<&str, (i64, u32)> = BTreeMap::new();
    for rect in rectangles {
        let entry = by_label.entry(rect.label.as_str()).or_insert((0, 0));
        entry.0 += rect.duration_ms();
        entry.1 += rect.repeat_count;
    }

    let mut stats: Vec<RegionStat> = by_label
        .into_iter()
        .map(|(label, (total_ms, calls))| RegionStat {
            label: label.to_string(),
            total_ms,
            calls,
            percentage: percentage_of(total_ms, total_duration_ms),
        })
        .collect();

    // BTreeMap already ordered labels, stable sort keeps that for ties
    stats.sort_by(|a, b| b.total_ms.cmp(&a.total_ms));
    stats
}

/// Calculate the `top_n` hottest regions
///
/// **Public** - `calculate_region_stats` cut to the first `top_n` labels
pub fn calculate_hot_regions(
    rectangles: &[Rectangle],
    total_duration_ms: i64,
    top_n: usize,
) -> Vec<RegionStat> {
    let mut stats = calculate_region_stats(rectangles, total_duration_ms);
    stats.truncate(top_n);
    stats
}

fn percentage_of(part: i64, whole: i64) -> f64 {
    if whole > 0 {
        (part as f64 / whole as f64) * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_zero_duration() {
        assert_eq!(percentage_of(10, 0), 0.0);
        assert_eq!(percentage_of(25, 100), 25.0);
    }
}
