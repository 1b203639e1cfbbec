use crate::utils::config::SCHEMA_VERSION;

/// Display version information
pub fn display_version() {
    println!("trace2-flamegraph v{}", env!("CARGO_PKG_VERSION"));
    println!("Region Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Render Git trace2 event logs as time-scaled flame graphs.");
    println!();
    println!("Collect a trace with:");
    println!("  GIT_TRACE2_EVENT=\"$(pwd)/trace.txt\" GIT_TRACE2_EVENT_DEPTH=100 git <command>");
}
