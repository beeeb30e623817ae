//! Error types for transcript extraction.
//!
//! This module defines all error types that can occur while assembling the
//! chunk stream, parsing a transcript and producing the GPA report.

use crate::parser::ParseState;

/// Result type alias for transcript operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during transcript processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document has no recognizable transcript header or Student ID.
    ///
    /// Detected on the assembled text before the state machine runs.
    #[error("Input is not a transcript: {0}")]
    InputFormat(String),

    /// A required fixed-format field (name, student ID, OEN) did not match.
    #[error("Structural mismatch: expected {expected}, found '{found}'")]
    StructuralMismatch {
        /// Field the parser required at this point
        expected: &'static str,
        /// Chunk that was seen instead
        found: String,
    },

    /// The chunk stream ended before the end-of-document marker was seen.
    #[error("Incomplete parse: stream ended in state {state:?}, parsed file was not a transcript")]
    IncompleteParse {
        /// State the parser was left in
        state: ParseState,
    },

    /// A single chunk was re-dispatched more times than allowed.
    #[error("Re-dispatch limit exceeded in state {state:?} for chunk '{chunk}'")]
    RedispatchLimit {
        /// State reached when the limit tripped
        state: ParseState,
        /// Chunk being re-dispatched
        chunk: String,
    },

    /// Page number outside `1..=total_pages`
    #[error("Page {page} is out of range (document has {total} pages)")]
    PageOutOfRange {
        /// Offending page number
        page: u32,
        /// Total number of pages expected
        total: u32,
    },

    /// The same page was delivered twice
    #[error("Page {0} was delivered more than once")]
    DuplicatePage(u32),

    /// Extraction finished without delivering every page
    #[error("Only {received} of {total} pages were delivered")]
    IncompletePages {
        /// Pages received before the source stopped
        received: u32,
        /// Total number of pages expected
        total: u32,
    },

    /// Fragment source failure
    #[error("Fragment source error on page {page}: {message}")]
    Source {
        /// Page being extracted
        page: u32,
        /// Message from the source
        message: String,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
