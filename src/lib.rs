// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::enum_variant_names)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::match_like_matches_macro)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Transcript Oxide
//!
//! Extracts structured academic records from the text layer of university
//! transcripts and computes GPA summaries on the OMSAS 4.0 scale.
//!
//! ## Core Features
//!
//! - **Chunk Stream**: per-page text fragments arriving in any order are
//!   buffered, ordered by page and joined into a reading-order stream
//! - **Transcript Parser**: a finite-state reader over the chunk stream
//!   producing student, term and course records
//! - **GPA Aggregation**: term and cumulative averages recomputed from
//!   course grades and credit weights
//! - **Line Scanner**: a regex scanner for older single-line course layouts
//! - **Report Conversion**: plain-text tables and JSON
//!
//! ## Architecture
//!
//! ```text
//! FragmentSource → ChunkStreamBuilder → ChunkStream
//!     → TranscriptParser → TranscriptRecord → TranscriptReport → ReportConverter
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use transcript_oxide::converters::{create_converter, ReportFormat};
//! use transcript_oxide::pipeline::{ChunkStream, TranscriptPipeline};
//!
//! # fn main() -> transcript_oxide::Result<()> {
//! let stream = ChunkStream::from_chunks(&[
//!     "Undergraduate Unofficial Transcript",
//!     "Name: Jane Doe",
//!     "Student ID: 12345678",
//!     "Ontario Education Nbr: 999999999",
//!     "Fall 2019",
//!     "Program: Computer Science",
//!     "Level: 1A Load: Full Form Of Study: Enrollment",
//!     "CS 135",
//!     "Grade",
//!     "Intro to Computer Science",
//!     "0.50",
//!     "0.50",
//!     "85",
//!     "Term GPA",
//!     "3.50",
//!     "2.00",
//!     "2.00",
//!     "Cumulative GPA",
//!     "3.50",
//!     "2.00",
//!     "2.00",
//!     "End of Undergraduate Unofficial Transcript",
//! ]);
//!
//! let report = TranscriptPipeline::new().process(&stream)?;
//! assert_eq!(report.cumulative_gpa, 3.9);
//!
//! let text = create_converter(ReportFormat::PlainText).convert(&report)?;
//! println!("{}", text);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Positioned text fragments
pub mod layout;

// Page assembly and orchestration
pub mod pipeline;

// Finite-state transcript reader
pub mod parser;

// Data model
pub mod transcript;

// GPA conversion and aggregation
pub mod gpa;
pub mod report;

// Single-line layout scanner and input checks
pub mod scan;

// Report output
pub mod converters;

// Re-exports
pub use config::TranscriptConfig;
pub use error::{Error, Result};
pub use parser::TranscriptParser;
pub use pipeline::{ChunkStream, ChunkStreamBuilder, TranscriptPipeline};
pub use report::TranscriptReport;
pub use transcript::{CourseRecord, TermRecord, TranscriptRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
