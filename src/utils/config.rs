//! Configuration and constants for the CLI.

/// Current JSON region report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// trace2 event tags that take part in flame graph reconstruction.
// Everything else in the log (data, def_param, cmd_name, ...) is ignored.
pub const EVENT_PROCESS_START: &str = "start";
pub const EVENT_REGION_ENTER: &str = "region_enter";
pub const EVENT_REGION_LEAVE: &str = "region_leave";
pub const EVENT_PROCESS_EXIT: &str = "exit";

/// Processes whose argv carries this marker are long-lived helpers and are
/// left out of depth accounting.
pub const DEFAULT_HELPER_MARKER: &str = "gvfs-helper";

/// Env var that overrides the helper marker
pub const HELPER_MARKER_ENV: &str = "TRACE2_FLAMEGRAPH_HELPER_MARKER";

// Layout defaults (pixels)
pub const DEFAULT_ROW_HEIGHT: f64 = 50.0;
pub const HEADER_MARGIN: f64 = 70.0;
pub const BOTTOM_MARGIN: f64 = 10.0;
pub const MIN_VISIBLE_WIDTH: f64 = 10.0;

/// Default number of regions listed by the text summary and JSON report
pub const DEFAULT_TOP_REGIONS: usize = 20;
