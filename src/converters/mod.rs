//! Output converters for GPA reports.
//!
//! A [`TranscriptReport`] is rendered through a [`ReportConverter`]:
//!
//! - [`PlainTextConverter`]: aligned per-term tables for a terminal
//! - [`JsonConverter`]: pretty-printed JSON for other tools
//!
//! ```
//! use transcript_oxide::converters::{create_converter, ReportFormat};
//! use transcript_oxide::report::TranscriptReport;
//!
//! let report = TranscriptReport::from_terms(12345678, "Computer Science".to_string(), vec![]);
//! let text = create_converter(ReportFormat::PlainText).convert(&report).unwrap();
//! assert!(text.contains("Student ID: 12345678"));
//! ```

mod json;
mod plain_text;

pub use json::JsonConverter;
pub use plain_text::PlainTextConverter;

use crate::error::Result;
use crate::report::TranscriptReport;

/// Renders a report to a string.
pub trait ReportConverter: Send + Sync {
    /// Render the report.
    fn convert(&self, report: &TranscriptReport) -> Result<String>;

    /// Name of this converter, for logging.
    fn name(&self) -> &'static str;
}

/// Available report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Human-readable tables
    #[default]
    PlainText,
    /// Pretty-printed JSON
    Json,
}

/// Create the converter for a format.
pub fn create_converter(format: ReportFormat) -> Box<dyn ReportConverter> {
    match format {
        ReportFormat::PlainText => Box::new(PlainTextConverter::new()),
        ReportFormat::Json => Box::new(JsonConverter::new()),
    }
}
