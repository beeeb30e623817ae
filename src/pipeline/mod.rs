//! Transcript extraction pipeline.
//!
//! ```text
//! FragmentSource (per-page fragments, any order)
//!     ↓
//! [ChunkStreamBuilder] (buffer until complete, order by page)
//!     ↓
//! ChunkStream ──→ text() ──→ check_input_format
//!     ↓
//! [TranscriptParser] (one chunk at a time)
//!     ↓
//! TranscriptRecord
//!     ↓
//! [TranscriptReport] (recomputed GPAs)
//! ```
//!
//! Older single-line layouts skip the state machine and go through
//! [`TranscriptPipeline::scan`] instead.

pub mod chunk_stream;
pub mod line_join;
pub mod source;

pub use chunk_stream::{ChunkStream, ChunkStreamBuilder};
pub use line_join::{assemble_page_text, separator_between, Separator, LINE_BREAK};
pub use source::{read_source, FragmentSource, MemorySource};

use crate::config::TranscriptConfig;
use crate::error::Result;
use crate::parser::TranscriptParser;
use crate::report::TranscriptReport;
use crate::scan::{check_input_format, scan_text};
use crate::transcript::TranscriptRecord;

/// Orchestrates extraction from a chunk stream to a GPA report.
///
/// The pipeline holds only configuration; every call builds its own
/// parser, so one pipeline can serve many documents.
#[derive(Debug, Clone, Default)]
pub struct TranscriptPipeline {
    config: TranscriptConfig,
}

impl TranscriptPipeline {
    /// Create a pipeline with default markers.
    pub fn new() -> Self {
        Self::with_config(TranscriptConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: TranscriptConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &TranscriptConfig {
        &self.config
    }

    /// Run the input check and the state machine over a stream.
    ///
    /// # Errors
    ///
    /// `InputFormat` if the text is not a transcript, otherwise any parser
    /// error.
    pub fn parse_record(&self, stream: &ChunkStream) -> Result<TranscriptRecord> {
        check_input_format(&stream.text(), &self.config)?;
        TranscriptParser::parse(self.config.clone(), stream.chunks())
    }

    /// Parse a stream and compute its report.
    pub fn process(&self, stream: &ChunkStream) -> Result<TranscriptReport> {
        let record = self.parse_record(stream)?;
        let report = TranscriptReport::from_record(&record);
        log::info!(
            "Student {}: cumulative GPA {:.3} over {} credits",
            report.student_id,
            report.cumulative_gpa,
            report.total_credits
        );
        Ok(report)
    }

    /// Pull every page from a source, then [`process`](Self::process) it.
    pub fn extract<S: FragmentSource + ?Sized>(&self, source: &S) -> Result<TranscriptReport> {
        let stream = read_source(source)?;
        self.process(&stream)
    }

    /// Compute a report with the line scanner instead of the state machine.
    pub fn scan(&self, stream: &ChunkStream) -> Result<TranscriptReport> {
        let record = scan_text(&stream.text(), &self.config)?;
        Ok(TranscriptReport::from_record(&record))
    }
}
