//! Main parser for trace2 event output.
//!
//! Git writes one JSON object per line when `GIT_TRACE2_EVENT` is set.
//! This module decodes those lines into `TraceEvent` records, keeping
//! only the event kinds the flame graph needs.

use super::schema::{EventKind, RawEvent, TraceEvent};
use crate::utils::config::{
    EVENT_PROCESS_EXIT, EVENT_PROCESS_START, EVENT_REGION_ENTER, EVENT_REGION_LEAVE,
};
use crate::utils::error::ParseError;
use chrono::{DateTime, NaiveDateTime};
use log::{debug, warn};
use std::io::Read;

/// Decode a single trace2 line
///
/// **Public** - building block for `parse_events`
///
/// # Returns
/// * `Ok(Some(event))` - one of the four relevant event kinds
/// * `Ok(None)` - blank line or an event kind we do not track
///
/// # Errors
/// * `ParseError::JsonError` - line is not a valid JSON object
/// * `ParseError::MissingField` - `event` or `time` is absent
/// * `ParseError::InvalidTimestamp` - `time` cannot be parsed
pub fn parse_line(line: &str) -> Result<Option<TraceEvent>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let value: serde_json::Value = serde_json::from_str(line)?;
    let tag = value
        .get("event")
        .and_then(|v| v.as_str())
        .ok_or(ParseError::MissingField("event"))?;

    if !is_relevant(tag) {
        return Ok(None);
    }

    let raw: RawEvent = serde_json::from_value(value)?;
    let time = raw.time.as_deref().ok_or(ParseError::MissingField("time"))?;
    let time_ms = parse_timestamp(time)?;

    let kind = match raw.event.as_str() {
        EVENT_PROCESS_START => EventKind::ProcessStart {
            argv: raw.argv.unwrap_or_default(),
        },
        EVENT_REGION_ENTER => EventKind::RegionEnter,
        EVENT_REGION_LEAVE => EventKind::RegionLeave {
            category: raw.category.unwrap_or_default(),
            label: raw.label.unwrap_or_default(),
        },
        _ => EventKind::ProcessExit,
    };

    Ok(Some(TraceEvent::new(time_ms, kind)))
}

fn is_relevant(tag: &str) -> bool {
    matches!(
        tag,
        EVENT_PROCESS_START | EVENT_REGION_ENTER | EVENT_REGION_LEAVE | EVENT_PROCESS_EXIT
    )
}

/// Parse a trace2 timestamp into milliseconds since the Unix epoch
///
/// Accepts RFC 3339 (`2024-03-01T10:15:30.123456Z`) and, failing that,
/// an offset-less timestamp that is taken to be UTC. Sub-millisecond
/// digits are truncated.
pub fn parse_timestamp(value: &str) -> Result<i64, ParseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.timestamp_millis());
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc().timestamp_millis())
        .map_err(|e| ParseError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Decode every line of a trace2 event log
///
/// **Public** - main entry point for parsing
///
/// Malformed lines are logged and skipped. The call only fails when
/// the input had content and none of it could be decoded.
pub fn parse_events(text: &str) -> Result<Vec<TraceEvent>, ParseError> {
    let mut events = Vec::new();
    let mut non_blank = 0usize;
    let mut failures = 0usize;

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        non_blank += 1;

        match parse_line(line) {
            Ok(Some(event)) => events.push(event),
            Ok(None) => {}
            Err(e) => {
                // Log but don't fail - a truncated last line is common
                warn!("Skipping trace line {}: {}", index + 1, e);
                failures += 1;
            }
        }
    }

    if non_blank > 0 && failures == non_blank {
        return Err(ParseError::InvalidFormat(format!(
            "All {} trace lines failed to decode",
            non_blank
        )));
    }

    debug!(
        "Decoded {} relevant events from {} lines ({} skipped)",
        events.len(),
        non_blank,
        failures
    );

    Ok(events)
}

/// Read and decode a trace2 event log from any reader (file, stdin)
pub fn read_events(mut reader: impl Read) -> Result<Vec<TraceEvent>, ParseError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_events(&text)
}
