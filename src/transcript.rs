//! Structured transcript record.
//!
//! The record is built incrementally by the parser: a term is opened when a
//! term label is seen, a course when a course subject is seen, and fields are
//! filled in as later chunks arrive. Values printed on the transcript (term
//! and cumulative GPA, credit totals) are kept as reported; the authoritative
//! averages are recomputed by [`crate::gpa`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One course entry within a term.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Subject and catalog number, e.g. `CS 135`
    pub id: String,
    /// Course title, possibly joined from several wrapped chunks
    pub description: String,
    /// Credits attempted
    pub credit_worth: f64,
    /// Credits earned
    pub credit_earned: f64,
    /// Grade exactly as printed (`85`, `CR`)
    pub grade: String,
    /// Numeric grade, 0 when the grade is not a number
    pub numeric_grade: f64,
    /// Whether the grade counts towards averages
    pub in_average: bool,
}

impl CourseRecord {
    /// Start a course from its subject (or full id).
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            in_average: true,
            ..Default::default()
        }
    }

    /// True once a grade has been recorded.
    pub fn has_grade(&self) -> bool {
        !self.grade.is_empty()
    }

    /// Graded and not excluded. In-progress courses have no grade yet.
    pub fn counts_in_average(&self) -> bool {
        self.in_average && self.has_grade()
    }
}

/// One academic term.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TermRecord {
    /// Session label, e.g. `Fall 2019`
    pub term_label: String,
    /// Program name, joined across wrapped lines
    pub program: String,
    /// Program level, e.g. `1A`
    pub level: String,
    /// Course load, e.g. `Full`
    pub load: String,
    /// Form of study as printed
    pub form_of_study: String,
    /// Academic (enrolment) term
    pub is_study_term: bool,
    /// Co-op work term
    pub is_work_term: bool,
    /// Courses in document order
    pub courses: Vec<CourseRecord>,
    /// Term GPA as printed
    pub term_gpa: f64,
    /// Term credits in GPA as printed
    pub term_total_credits: f64,
    /// Term credits earned as printed
    pub term_earned_credits: f64,
    /// Cumulative GPA as printed
    pub cumulative_gpa: f64,
    /// Cumulative credits in GPA as printed
    pub cumulative_total_credits: f64,
    /// Cumulative credits earned as printed
    pub cumulative_earned_credits: f64,
    /// Academic standing, e.g. `Good Standing`
    pub academic_standing: String,
    /// Date the standing took effect
    pub standing_effective: Option<NaiveDate>,
    /// Term honours
    pub honours: String,
}

impl TermRecord {
    /// Open a term with its label.
    pub fn new(term_label: impl Into<String>) -> Self {
        Self {
            term_label: term_label.into(),
            ..Default::default()
        }
    }

    /// The course currently being filled in.
    pub fn current_course_mut(&mut self) -> Option<&mut CourseRecord> {
        self.courses.last_mut()
    }
}

/// Root aggregate for one parsed transcript.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TranscriptRecord {
    /// Student name
    pub student_name: String,
    /// Student ID
    pub student_id: u64,
    /// Ontario Education Number
    pub student_oen: u64,
    /// Terms in document order
    pub terms: Vec<TermRecord>,
}

impl TranscriptRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// The term currently being filled in.
    pub fn current_term_mut(&mut self) -> Option<&mut TermRecord> {
        self.terms.last_mut()
    }

    /// The course currently being filled in.
    pub fn current_course_mut(&mut self) -> Option<&mut CourseRecord> {
        self.current_term_mut()
            .and_then(TermRecord::current_course_mut)
    }

    /// Program of the first term, or empty.
    pub fn program_name(&self) -> &str {
        self.terms.first().map(|t| t.program.as_str()).unwrap_or("")
    }

    /// Total number of courses across all terms.
    pub fn course_count(&self) -> usize {
        self.terms.iter().map(|t| t.courses.len()).sum()
    }
}
