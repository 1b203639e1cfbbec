//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while decoding trace2 event lines
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid trace format: {0}")]
    InvalidFormat(String),

    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Failed to read trace input: {0}")]
    ReadFailed(#[from] std::io::Error),
}

/// Errors that can occur during region extraction and flamegraph generation
#[derive(Error, Debug)]
pub enum FlamegraphError {
    /// No start/region_enter/region_leave/exit events in the input
    #[error("Trace contains no process or region events")]
    EmptyTrace,
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
