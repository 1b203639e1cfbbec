//! SVG flamegraph generation for trace2 regions.
//!
//! Unlike sampled flame graphs, x is real elapsed time: a bar starts where
//! its region started and is as wide as the region lasted.
//! - Time axis grid with tiered units (ms / s)
//! - Root at the bottom, deeper regions stacked upwards
//! - Shade darkens linearly with depth

use crate::aggregator::stack_builder::{Extraction, Rectangle};
use crate::utils::config::{BOTTOM_MARGIN, DEFAULT_ROW_HEIGHT, HEADER_MARGIN, MIN_VISIBLE_WIDTH};
use log::{debug, info};

/// Flamegraph configuration
#[derive(Debug, Clone, PartialEq)]
pub struct FlamegraphConfig {
    /// Height of one depth row in pixels
    pub row_height: f64,

    /// Space above the top row for the axis labels
    pub header_margin: f64,

    /// Bars narrower than this are not drawn
    pub min_visible_width: f64,
}

impl Default for FlamegraphConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            header_margin: HEADER_MARGIN,
            min_visible_width: MIN_VISIBLE_WIDTH,
        }
    }
}

impl FlamegraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row_height(mut self, row_height: f64) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn with_min_width(mut self, min_visible_width: f64) -> Self {
        self.min_visible_width = min_visible_width;
        self
    }
}

/// Time unit and horizontal compression picked from the trace duration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    /// Axis label suffix
    pub unit: &'static str,

    /// Milliseconds per displayed unit
    pub unit_divisor: f64,

    /// Milliseconds between grid lines
    pub interval: i64,

    /// Milliseconds per pixel
    pub width_divisor: f64,
}

impl TimeScale {
    pub fn for_duration(total_ms: i64) -> Self {
        if total_ms > 10_000 {
            Self {
                unit: "s",
                unit_divisor: 1000.0,
                interval: 5000,
                width_divisor: 50.0,
            }
        } else if total_ms > 2500 {
            Self {
                unit: "s",
                unit_divisor: 1000.0,
                interval: 1000,
                width_divisor: 10.0,
            }
        } else {
            Self {
                unit: "ms",
                unit_divisor: 1.0,
                interval: 100,
                width_divisor: 1.0,
            }
        }
    }

    pub fn to_px(&self, ms: i64) -> f64 {
        ms as f64 / self.width_divisor
    }

    pub fn tick_label(&self, elapsed_ms: i64) -> String {
        format!("{}{}", elapsed_ms as f64 / self.unit_divisor, self.unit)
    }
}

/// Position of `depth` between 0 and `max_depth`, in `[0, 1]`
///
/// A flat trace (`max_depth == 0`) shades everything as depth 0.
pub fn shade_ratio(depth: usize, max_depth: usize) -> f64 {
    if max_depth == 0 {
        return 0.0;
    }
    (depth as f64 / max_depth as f64).min(1.0)
}

pub fn fill_color(ratio: f64) -> String {
    let shade = 150.0 + 100.0 * ratio;
    format!(
        "rgb({:.0},{:.0},{:.0})",
        shade,
        shade / 3.0,
        shade / 3.0
    )
}

pub fn border_color(ratio: f64) -> String {
    let shade = 100.0 * ratio;
    format!("rgb({:.0},{:.0},{:.0})", shade, shade, shade)
}

/// Escape label text for use inside an SVG text node
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Canvas geometry shared by the grid and rectangle layers
struct Canvas<'a> {
    config: &'a FlamegraphConfig,
    scale: TimeScale,
    start_ms: i64,
    height: f64,
    max_depth: usize,
}

/// Generate an SVG flamegraph from extracted rectangles
///
/// **Public** - main entry point for rendering
///
/// Draw order is grid first, rectangles second, so labels are never
/// covered by grid lines.
pub fn generate_flamegraph(extraction: &Extraction, config: Option<&FlamegraphConfig>) -> String {
    let config = config.cloned().unwrap_or_default();
    let total_ms = extraction.total_duration_ms;

    let scale = TimeScale::for_duration(total_ms);
    let width = scale.to_px(total_ms);
    let height = config.header_margin + config.row_height * (extraction.max_depth + 1) as f64;

    info!(
        "Generating flamegraph: {} rectangles, {}x{} px, grid every {}{}",
        extraction.rectangles.len(),
        width,
        height,
        scale.interval as f64 / scale.unit_divisor,
        scale.unit
    );

    let canvas = Canvas {
        config: &config,
        scale,
        start_ms: extraction.start_ms,
        height,
        max_depth: extraction.max_depth,
    };

    let mut svg = String::new();

    // Header
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">\n",
        width, height
    ));

    // Styles
    svg.push_str("<style>\n");
    svg.push_str(".box { font: 16px sans-serif; }\n");
    svg.push_str(".axis { font: 12px sans-serif; }\n");
    svg.push_str("</style>\n");

    render_grid(&canvas, total_ms, &mut svg);

    let mut drawn = 0usize;
    for rect in &extraction.rectangles {
        if render_rectangle(&canvas, rect, &mut svg) {
            drawn += 1;
        }
    }

    svg.push_str("</svg>\n");

    debug!(
        "Drew {} rectangles, skipped {} below {}px",
        drawn,
        extraction.rectangles.len() - drawn,
        config.min_visible_width
    );
    info!("Flamegraph generated successfully ({} bytes)", svg.len());

    svg
}

fn render_grid(canvas: &Canvas<'_>, total_ms: i64, out: &mut String) {
    let mut elapsed = 0i64;
    while elapsed < total_ms {
        let x = canvas.scale.to_px(elapsed);
        out.push_str(&format!(
            "<line x1=\"{}\" y1=\"0\" x2=\"{}\" y2=\"{}\" style=\"stroke-width:1; stroke:black;\" />\n",
            x, x, canvas.height
        ));
        out.push_str(&format!(
            "<text class=\"axis\" x=\"{}\" y=\"10\">{}</text>\n",
            x + 3.0,
            canvas.scale.tick_label(elapsed)
        ));
        elapsed += canvas.scale.interval;
    }
}

/// Draw one bar and its label. Returns false when the bar is too narrow.
fn render_rectangle(canvas: &Canvas<'_>, rect: &Rectangle, out: &mut String) -> bool {
    let row_height = canvas.config.row_height;

    let w = canvas.scale.to_px(rect.duration_ms());
    if w < canvas.config.min_visible_width {
        return false;
    }

    let x = canvas.scale.to_px(rect.start_ms - canvas.start_ms);
    let y = canvas.height - BOTTOM_MARGIN - row_height * (rect.depth + 1) as f64;

    let ratio = shade_ratio(rect.depth, canvas.max_depth);
    let style = format!(
        "fill:{};stroke-width:3;stroke:{}",
        fill_color(ratio),
        border_color(ratio)
    );

    out.push_str(&format!(
        "<rect width=\"{:.2}\" height=\"{}\" x=\"{:.2}\" y=\"{:.2}\" style=\"{}\" />\n",
        w, row_height, x, y, style
    ));
    out.push_str(&format!(
        "<text class=\"box\" x=\"{:.2}\" y=\"{:.2}\">{}</text>\n",
        x + 5.0,
        y + 0.8 * row_height,
        escape_xml(&rect.display_label())
    ));

    true
}
