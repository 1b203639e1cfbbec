use crate::flamegraph::FlamegraphConfig;
use crate::utils::config::{DEFAULT_HELPER_MARKER, DEFAULT_TOP_REGIONS};
use std::path::PathBuf;

/// Arguments for the render command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct RenderArgs {
    /// trace2 event log (None or "-" = stdin)
    pub input: Option<PathBuf>,

    /// Output path for the SVG flamegraph (None = stdout)
    pub output_svg: Option<PathBuf>,

    /// Output path for the JSON region report (optional)
    pub output_json: Option<PathBuf>,

    /// Number of hot regions in the summary and report
    pub top_regions: usize,

    /// argv marker identifying long-lived helper processes
    pub helper_marker: String,

    /// Flamegraph layout
    pub flamegraph_config: FlamegraphConfig,

    /// Print hot region table
    pub print_summary: bool,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            input: None,
            output_svg: None,
            output_json: None,
            top_regions: DEFAULT_TOP_REGIONS,
            helper_marker: DEFAULT_HELPER_MARKER.to_string(),
            flamegraph_config: FlamegraphConfig::default(),
            print_summary: false,
        }
    }
}

impl RenderArgs {
    /// True when the input is read from stdin
    pub fn reads_stdin(&self) -> bool {
        self.input
            .as_ref()
            .map_or(true, |path| path.as_os_str() == "-")
    }
}
