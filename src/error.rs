//! Error types for the timegrid layout engine.

use thiserror::Error;

/// Main error type for timegrid operations.
#[derive(Error, Debug)]
pub enum TimegridError {
    #[error("Instant error: {0}")]
    Instant(#[from] InstantError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Instant-related errors (unparseable item boundaries).
///
/// These are never fatal to a layout pass: an item that fails to parse is
/// dropped during normalization and the error travels through the
/// [`DiagnosticSink`](crate::timetable::DiagnosticSink) instead of the
/// return path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstantError {
    #[error("Unparseable {field} instant: \"{value}\"")]
    Unparseable { field: InstantField, value: String },
}

/// Which boundary of an item failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstantField {
    Start,
    End,
}

impl std::fmt::Display for InstantField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstantField::Start => write!(f, "start"),
            InstantField::End => write!(f, "end"),
        }
    }
}

/// Result type alias for timegrid operations.
pub type Result<T> = std::result::Result<T, TimegridError>;
