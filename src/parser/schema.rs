//! Event record definitions for trace2 input.
//!
//! `RawEvent` mirrors the JSON object on a single trace2 line. Only the
//! fields needed for flame graph reconstruction are kept; serde ignores
//! the rest (sid, thread, file, line, t_abs, ...).

use serde::Deserialize;

/// One trace2 line as it appears on disk
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    /// Event tag ("start", "region_enter", "region_leave", "exit", ...)
    pub event: String,

    /// ISO-8601 UTC timestamp
    #[serde(default)]
    pub time: Option<String>,

    /// Command line of the process (start events only)
    #[serde(default)]
    pub argv: Option<Vec<String>>,

    /// Region category (region events only)
    #[serde(default)]
    pub category: Option<String>,

    /// Region label (region events only)
    #[serde(default)]
    pub label: Option<String>,
}

/// The four event kinds that drive stack reconstruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    ProcessStart { argv: Vec<String> },
    RegionEnter,
    RegionLeave { category: String, label: String },
    ProcessExit,
}

impl EventKind {
    /// True for events that open a frame
    pub fn is_open(&self) -> bool {
        matches!(self, EventKind::ProcessStart { .. } | EventKind::RegionEnter)
    }

    /// trace2 tag for this kind
    pub fn tag(&self) -> &'static str {
        use crate::utils::config::*;
        match self {
            EventKind::ProcessStart { .. } => EVENT_PROCESS_START,
            EventKind::RegionEnter => EVENT_REGION_ENTER,
            EventKind::RegionLeave { .. } => EVENT_REGION_LEAVE,
            EventKind::ProcessExit => EVENT_PROCESS_EXIT,
        }
    }
}

/// A decoded event with its timestamp resolved to milliseconds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    /// Milliseconds since the Unix epoch
    pub time_ms: i64,
    pub kind: EventKind,
}

impl TraceEvent {
    /// Event at `time_ms` of the given kind
    pub fn new(time_ms: i64, kind: EventKind) -> Self {
        Self { time_ms, kind }
    }

    /// `start` event for a process with this argv
    pub fn start(time_ms: i64, argv: &[&str]) -> Self {
        Self::new(
            time_ms,
            EventKind::ProcessStart {
                argv: argv.iter().map(|a| a.to_string()).collect(),
            },
        )
    }

    /// `region_enter` event
    pub fn enter(time_ms: i64) -> Self {
        Self::new(time_ms, EventKind::RegionEnter)
    }

    /// `region_leave` event for `category:label`
    pub fn leave(time_ms: i64, category: &str, label: &str) -> Self {
        Self::new(
            time_ms,
            EventKind::RegionLeave {
                category: category.to_string(),
                label: label.to_string(),
            },
        )
    }

    /// `exit` event
    pub fn exit(time_ms: i64) -> Self {
        Self::new(time_ms, EventKind::ProcessExit)
    }
}
