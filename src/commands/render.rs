//! Render command implementation.
//!
//! The render command:
//! 1. Reads the trace2 event log (file or stdin)
//! 2. Decodes the relevant events
//! 3. Reconstructs the region stack into rectangles
//! 4. Generates the flamegraph
//! 5. Writes the SVG (file or stdout) and optional JSON report

use crate::aggregator::{calculate_region_stats, extract_regions, Extraction, HelperFilter, RegionStat};
use crate::commands::models::RenderArgs;
use crate::flamegraph::{generate_flamegraph, generate_text_summary};
use crate::output::{write_report, write_svg, write_svg_to, RegionReport};
use crate::parser::{read_events, TraceEvent};
use anyhow::{Context, Result};
use log::{debug, info};
use std::fs::File;
use std::time::Instant;

/// Execute the render command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Input read or decode failures
/// * Empty trace (no start/region/exit events)
/// * File write errors
pub fn execute_render(args: RenderArgs) -> Result<()> {
    let start_time = Instant::now();

    let events = read_input(&args).context("Failed to read trace events")?;
    debug!("Decoded {} events", events.len());

    info!("Reconstructing region stack...");
    let filter = HelperFilter::new(args.helper_marker.clone());
    let extraction = extract_regions(&events, &filter).context("Failed to extract regions")?;
    info!("Extraction: {}", extraction.summary());

    let (hot_regions, summary) = summarize_regions(&extraction, args.top_regions);

    let svg = generate_flamegraph(&extraction, Some(&args.flamegraph_config));

    write_outputs(&args, &extraction, &hot_regions, &svg)?;

    if args.print_summary {
        // stdout may be carrying the SVG
        if args.output_svg.is_some() {
            println!("{}", summary);
        } else {
            eprintln!("{}", summary);
        }
    }

    info!(
        "Render completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Hot regions for the report and the summary table.
///
/// **Private** - internal helper for execute_render
///
/// The table sees every label so it can say how many were left out;
/// the report keeps only the first `top_regions`.
fn summarize_regions(extraction: &Extraction, top_regions: usize) -> (Vec<RegionStat>, String) {
    let mut stats = calculate_region_stats(&extraction.rectangles, extraction.total_duration_ms);
    let summary = generate_text_summary(&stats, top_regions);
    stats.truncate(top_regions);
    (stats, summary)
}

/// Read and decode events from the input file or stdin.
///
/// **Private** - internal helper for execute_render
fn read_input(args: &RenderArgs) -> Result<Vec<TraceEvent>> {
    match &args.input {
        Some(path) if !args.reads_stdin() => {
            info!("Reading trace from: {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("Cannot open trace file {}", path.display()))?;
            Ok(read_events(file)?)
        }
        _ => {
            info!("Reading trace from stdin...");
            Ok(read_events(std::io::stdin().lock())?)
        }
    }
}

/// Write the SVG and the optional JSON report.
///
/// **Private** - internal helper for execute_render
fn write_outputs(
    args: &RenderArgs,
    extraction: &Extraction,
    hot_regions: &[RegionStat],
    svg: &str,
) -> Result<()> {
    match &args.output_svg {
        Some(path) => {
            write_svg(svg, path).context("Failed to write flamegraph SVG")?;
            info!("✓ Flamegraph written to: {}", path.display());
        }
        None => {
            write_svg_to(svg, std::io::stdout().lock())
                .context("Failed to write flamegraph SVG to stdout")?;
        }
    }

    if let Some(path) = &args.output_json {
        let report = RegionReport::new(extraction, hot_regions.to_vec());
        write_report(&report, path).context("Failed to write region report")?;
        info!("✓ Region report written to: {}", path.display());
    }

    Ok(())
}

/// Validate render arguments
///
/// **Public** - can be called before execute_render for early validation
pub fn validate_args(args: &RenderArgs) -> Result<()> {
    if !args.reads_stdin() {
        if let Some(path) = &args.input {
            if !path.is_file() {
                anyhow::bail!("Trace file not found: {}", path.display());
            }
        }
    }

    if args.top_regions == 0 {
        anyhow::bail!("top must be greater than 0");
    }

    if args.top_regions > 1000 {
        anyhow::bail!("top is too large (max 1000)");
    }

    let config = &args.flamegraph_config;
    if !config.row_height.is_finite() || config.row_height <= 0.0 {
        anyhow::bail!("row height must be a positive number");
    }

    if !config.min_visible_width.is_finite() || config.min_visible_width < 0.0 {
        anyhow::bail!("min width cannot be negative");
    }

    Ok(())
}
