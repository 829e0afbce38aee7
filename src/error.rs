//! Error types for scanning and editing

use thiserror::Error;

/// Errors returned by a [`DocumentStore`](crate::traits::DocumentStore).
///
/// During a scan these are non-fatal: an unreadable document is logged and
/// skipped, and the scan carries on with the rest of the corpus.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The document does not exist in the store
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A store-specific failure (e.g. an injected failure in tests)
    #[error("{0}")]
    Backend(String),
}

/// Errors aborting a single edit.
///
/// Every one of these leaves the source document untouched; the caller must
/// revert whatever optimistic presentation state it holds for the event.
#[derive(Debug, Error)]
pub enum EditError {
    /// Header events are synthetic; a gesture on one reverts with no write
    #[error("header events cannot be edited")]
    HeaderNotEditable,

    /// The event id does not have the `path:line` shape
    #[error("invalid task id: {0}")]
    InvalidTaskId(String),

    /// No event with this id in the current event list
    #[error("unknown event id: {0}")]
    UnknownEvent(String),

    /// The target document is missing at write time
    #[error("document not found: {0}")]
    DocumentNotFound(String),

    /// The recorded line index exceeds the document's current line count
    #[error("line {line} is out of bounds for {path} ({line_count} lines)")]
    LineOutOfBounds {
        path: String,
        line: usize,
        line_count: usize,
    },

    /// The addressed line no longer matches the line the task was scanned from
    #[error("line {line} of {path} has changed since the last scan")]
    StaleLineReference { path: String, line: usize },

    /// The line carries none of the three date markers
    #[error("no date marker on line {line} of {path}")]
    NoDateMarker { path: String, line: usize },

    /// The checkbox construct was absent, or the substitution left the line unchanged
    #[error("could not rewrite the status checkbox on line {line} of {path}")]
    StatusWriteFailed { path: String, line: usize },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// A string that does not have the canonical `YYYY-MM-DD` shape
#[derive(Debug, Error)]
#[error("not a YYYY-MM-DD date: {0}")]
pub struct InvalidDate(pub String);
