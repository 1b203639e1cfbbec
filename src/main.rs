//! trace2-flamegraph CLI
//!
//! Renders Git trace2 event logs as time-scaled flame graphs.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use trace2_flamegraph::commands::{display_version, execute_render, validate_args, RenderArgs};
use trace2_flamegraph::flamegraph::FlamegraphConfig;
use trace2_flamegraph::utils::config::{
    DEFAULT_HELPER_MARKER, DEFAULT_ROW_HEIGHT, DEFAULT_TOP_REGIONS, HELPER_MARKER_ENV,
    MIN_VISIBLE_WIDTH,
};

/// trace2-flamegraph - flame graphs from Git trace2 event logs
#[derive(Parser, Debug)]
#[command(name = "trace2-flamegraph")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a trace2 event log as an SVG flame graph
    Render {
        /// trace2 event log (reads stdin if omitted or "-")
        input: Option<PathBuf>,

        /// Output path for the SVG (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write a JSON region report to this path
        #[arg(long)]
        json: Option<PathBuf>,

        /// Print a table of the slowest regions
        #[arg(long)]
        summary: bool,

        /// Number of regions in the summary and report
        #[arg(long, default_value_t = DEFAULT_TOP_REGIONS)]
        top: usize,

        /// argv marker of long-lived helper processes to leave out (empty disables)
        #[arg(long, env = HELPER_MARKER_ENV, default_value = DEFAULT_HELPER_MARKER)]
        helper_marker: String,

        /// Height of one depth row in pixels
        #[arg(long, default_value_t = DEFAULT_ROW_HEIGHT)]
        row_height: f64,

        /// Bars narrower than this many pixels are not drawn
        #[arg(long, default_value_t = MIN_VISIBLE_WIDTH)]
        min_width: f64,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging (stderr, stdout may carry the SVG)
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Render {
            input,
            output,
            json,
            summary,
            top,
            helper_marker,
            row_height,
            min_width,
        } => {
            let args = RenderArgs {
                input,
                output_svg: output,
                output_json: json,
                top_regions: top,
                helper_marker,
                flamegraph_config: FlamegraphConfig::new()
                    .with_row_height(row_height)
                    .with_min_width(min_width),
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_render(args)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
