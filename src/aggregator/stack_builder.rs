//! Rebuild the process/region stack from a flat trace2 event sequence.
//!
//! Each matched open/close pair becomes a `Rectangle` placed at the depth
//! the pair occupied. Runs of same-label siblings at one depth collapse
//! into a single wider rectangle with a repeat count.
//!
//! Example: three back-to-back `net:fetch` regions under `git fetch`
//! come out as one `net:fetch (3)` bar at depth 1.

use crate::parser::{EventKind, TraceEvent};
use crate::utils::config::DEFAULT_HELPER_MARKER;
use crate::utils::error::FlamegraphError;
use log::debug;
use serde::{Deserialize, Serialize};

/// One flame graph bar
///
/// **Public** - consumed by the flamegraph generator and JSON report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rectangle {
    /// `category:label` for regions, joined argv for processes
    pub label: String,

    /// Open time in milliseconds since the Unix epoch
    pub start_ms: i64,

    /// Close time in milliseconds since the Unix epoch
    pub end_ms: i64,

    /// Row index, 0 = bottom
    pub depth: usize,

    /// Number of adjacent same-label siblings merged into this bar
    pub repeat_count: u32,
}

impl Rectangle {
    pub fn new(label: impl Into<String>, start_ms: i64, end_ms: i64, depth: usize) -> Self {
        Self {
            label: label.into(),
            start_ms,
            end_ms,
            depth,
            repeat_count: 1,
        }
    }

    pub fn duration_ms(&self) -> i64 {
        (self.end_ms - self.start_ms).max(0)
    }

    /// Label as drawn, with the repeat count appended when merged
    pub fn display_label(&self) -> String {
        if self.repeat_count > 1 {
            format!("{} ({})", self.label, self.repeat_count)
        } else {
            self.label.clone()
        }
    }

    fn absorb(&mut self, other: &Rectangle) {
        self.start_ms = self.start_ms.min(other.start_ms);
        self.end_ms = self.end_ms.max(other.end_ms);
        self.repeat_count += other.repeat_count;
    }
}

/// Decides which processes are long-lived helpers
///
/// A process is a helper when its first or second argv entry contains
/// the marker as a substring. An empty marker disables exclusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperFilter {
    marker: String,
}

impl Default for HelperFilter {
    fn default() -> Self {
        Self::new(DEFAULT_HELPER_MARKER)
    }
}

impl HelperFilter {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn is_helper(&self, argv: &[String]) -> bool {
        !self.marker.is_empty() && argv.iter().take(2).any(|arg| arg.contains(&self.marker))
    }
}

/// A start or region_enter event that has not been closed yet
#[derive(Debug, Clone)]
pub struct OpenFrame<'a> {
    pub event: &'a TraceEvent,

    /// Helper process; its close is dropped and it never affects depth
    pub excluded: bool,
}

impl<'a> OpenFrame<'a> {
    pub fn new(event: &'a TraceEvent, excluded: bool) -> Self {
        Self { event, excluded }
    }
}

/// Result of pairing a close event with the top of the stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopOutcome {
    /// A real span: emit a rectangle
    Matched { label: String, start_ms: i64 },

    /// The popped frame was a helper process
    ExcludedDiscard,

    /// Close event does not fit the popped frame (or the stack was empty)
    MismatchDiscard,
}

/// Pop the top frame and pair it with `close`
///
/// **Public** - the matching step of `extract_regions`
///
/// A `region_leave` always takes its label from the close event itself.
/// An `exit` only matches a `start` frame; anything else is a mismatch,
/// which happens when a helper subtree leaves the stack out of order.
pub fn pop_frame(stack: &mut Vec<OpenFrame<'_>>, close: &TraceEvent) -> PopOutcome {
    let Some(top) = stack.pop() else {
        return PopOutcome::MismatchDiscard;
    };

    if top.excluded {
        return PopOutcome::ExcludedDiscard;
    }

    let label = match (&close.kind, &top.event.kind) {
        (EventKind::RegionLeave { category, label }, _) => format!("{}:{}", category, label),
        (EventKind::ProcessExit, EventKind::ProcessStart { argv }) => argv.join(" "),
        _ => return PopOutcome::MismatchDiscard,
    };

    PopOutcome::Matched {
        label,
        start_ms: top.event.time_ms,
    }
}

/// Count the stack pushes of the preliminary pass
///
/// Only opens are simulated, so this is an upper bound on nesting
/// rather than the true concurrent depth.
pub fn measure_nesting(events: &[TraceEvent]) -> usize {
    events.iter().filter(|e| e.kind.is_open()).count()
}

/// Most recent unflushed rectangle per depth
struct HeldRectangles {
    slots: Vec<Option<Rectangle>>,
}

impl HeldRectangles {
    fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Hold `candidate`, merging it into a same-label held rectangle.
    /// Returns the rectangle displaced from the slot, if any.
    fn offer(&mut self, candidate: Rectangle) -> Option<Rectangle> {
        let depth = candidate.depth;
        if depth >= self.slots.len() {
            self.slots.resize(depth + 1, None);
        }

        let slot = &mut self.slots[depth];
        if let Some(held) = slot.as_mut() {
            if held.label == candidate.label {
                held.absorb(&candidate);
                return None;
            }
        }
        slot.replace(candidate)
    }

    /// Remaining held rectangles, shallowest first
    fn drain(self) -> impl Iterator<Item = Rectangle> {
        self.slots.into_iter().flatten()
    }
}

/// Rectangles extracted from a trace, plus the global bounds the
/// renderer needs
#[derive(Debug, Clone)]
pub struct Extraction {
    pub rectangles: Vec<Rectangle>,

    /// Time of the first event
    pub start_ms: i64,

    /// Last event time minus first event time
    pub total_duration_ms: i64,

    /// Highest depth of any emitted rectangle
    pub max_depth: usize,

    /// Open events seen by the preliminary pass
    pub max_nesting: usize,

    /// Close events dropped because they closed a helper process
    pub excluded: usize,

    /// Close events dropped because they did not fit the stack
    pub mismatched: usize,
}

impl Extraction {
    /// Get human-readable summary
    ///
    /// **Public** - for logging
    pub fn summary(&self) -> String {
        format!(
            "Duration: {}ms | Rectangles: {} | Max depth: {} | Excluded: {} | Mismatched: {}",
            self.total_duration_ms,
            self.rectangles.len(),
            self.max_depth,
            self.excluded,
            self.mismatched
        )
    }
}

/// Extract flame graph rectangles from an ordered event sequence
///
/// **Public** - main entry point for stack reconstruction
///
/// # Algorithm
/// 1. Preliminary pass: total duration and open-event count
/// 2. Walk events with an explicit stack and a depth counter
/// 3. Pair each close with the top frame via `pop_frame`
/// 4. Merge same-label siblings per depth, flush on label change
/// 5. Flush every still-held rectangle in depth order
///
/// # Errors
/// * `FlamegraphError::EmptyTrace` - no events
pub fn extract_regions(
    events: &[TraceEvent],
    filter: &HelperFilter,
) -> Result<Extraction, FlamegraphError> {
    let (Some(first), Some(last)) = (events.first(), events.last()) else {
        return Err(FlamegraphError::EmptyTrace);
    };

    let start_ms = first.time_ms;
    let total_duration_ms = (last.time_ms - first.time_ms).max(0);
    let max_nesting = measure_nesting(events);

    debug!(
        "Extracting regions from {} events ({}ms, {} opens)",
        events.len(),
        total_duration_ms,
        max_nesting
    );

    let mut stack: Vec<OpenFrame<'_>> = Vec::new();
    let mut held = HeldRectangles::new();
    let mut rectangles = Vec::new();

    let mut depth = 0usize;
    let mut max_depth = 0usize;
    let mut excluded = 0usize;
    let mut mismatched = 0usize;

    for event in events {
        match &event.kind {
            EventKind::ProcessStart { argv } => {
                let frame = OpenFrame::new(event, filter.is_helper(argv));
                if !frame.excluded {
                    depth += 1;
                }
                stack.push(frame);
            }
            EventKind::RegionEnter => {
                depth += 1;
                stack.push(OpenFrame::new(event, false));
            }
            EventKind::RegionLeave { .. } | EventKind::ProcessExit => {
                match pop_frame(&mut stack, event) {
                    PopOutcome::ExcludedDiscard => excluded += 1,
                    PopOutcome::MismatchDiscard => {
                        debug!(
                            "Dropping unmatched {} at {}ms",
                            event.kind.tag(),
                            event.time_ms - start_ms
                        );
                        mismatched += 1;
                    }
                    PopOutcome::Matched {
                        label,
                        start_ms: region_start,
                    } => {
                        // Every matched frame incremented depth when pushed
                        depth = depth.saturating_sub(1);
                        max_depth = max_depth.max(depth);

                        let candidate = Rectangle::new(label, region_start, event.time_ms, depth);
                        if let Some(flushed) = held.offer(candidate) {
                            rectangles.push(flushed);
                        }
                    }
                }
            }
        }
    }

    rectangles.extend(held.drain());

    debug!(
        "Extracted {} rectangles, {} frames left open",
        rectangles.len(),
        stack.len()
    );

    Ok(Extraction {
        rectangles,
        start_ms,
        total_duration_ms,
        max_depth,
        max_nesting,
        excluded,
        mismatched,
    })
}
