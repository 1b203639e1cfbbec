//! Plain-text summary of the hottest regions, for terminal output.

use crate::aggregator::metrics::RegionStat;

const LABEL_WIDTH: usize = 44;

/// Create a text table of hot regions
pub fn generate_text_summary(stats: &[RegionStat], max_lines: usize) -> String {
    let mut lines = Vec::new();

    lines.push("  HOT REGIONS".to_string());
    lines.push(format!("  ┏{}┳{}┳{}┳{}┓", bar(46), bar(12), bar(8), bar(9)));
    lines.push(format!(
        "  ┃ {:<44} ┃ {:^10} ┃ {:^6} ┃ {:^7} ┃",
        "Region (Slowest First)", "TIME (ms)", "CALLS", "%"
    ));
    lines.push(format!("  ┣{}╋{}╋{}╋{}┫", bar(46), bar(12), bar(8), bar(9)));

    for stat in stats.iter().take(max_lines) {
        lines.push(format!(
            "  ┃ {:<44} ┃ {:>10} ┃ {:>6} ┃ {:>6.1}% ┃",
            truncate_label(&stat.label),
            stat.total_ms,
            stat.calls,
            stat.percentage
        ));
    }

    lines.push(format!("  ┗{}┻{}┻{}┻{}┛", bar(46), bar(12), bar(8), bar(9)));

    if stats.len() > max_lines {
        lines.push(String::new());
        lines.push(format!(
            "   (Showing top {} of {} regions)",
            max_lines,
            stats.len()
        ));
    }

    lines.join("\n")
}

fn bar(width: usize) -> String {
    "━".repeat(width)
}

/// Keep the tail of long labels, that is where the region name lives
fn truncate_label(label: &str) -> String {
    let count = label.chars().count();
    if count <= LABEL_WIDTH {
        return label.to_string();
    }
    let tail: String = label.chars().skip(count - (LABEL_WIDTH - 3)).collect();
    format!("...{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(label: &str, total_ms: i64) -> RegionStat {
        RegionStat {
            label: label.to_string(),
            total_ms,
            calls: 1,
            percentage: 10.0,
        }
    }

    #[test]
    fn test_truncate_label_keeps_tail() {
        let label = format!("{}:refresh", "x".repeat(60));
        let truncated = truncate_label(&label);
        assert_eq!(truncated.chars().count(), LABEL_WIDTH);
        assert!(truncated.starts_with("..."));
        assert!(truncated.ends_with(":refresh"));
    }

    #[test]
    fn test_summary_notes_hidden_rows() {
        let stats = vec![stat("a:one", 30), stat("a:two", 20), stat("a:three", 10)];
        let text = generate_text_summary(&stats, 2);
        assert!(text.contains("a:one"));
        assert!(text.contains("a:two"));
        assert!(!text.contains("a:three"));
        assert!(text.contains("Showing top 2 of 3 regions"));
    }
}
