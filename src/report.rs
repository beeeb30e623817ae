//! GPA report handed to the display layer.

use serde::{Deserialize, Serialize};

use crate::gpa::{percent_to_gpa, GpaTotals};
use crate::transcript::{CourseRecord, TermRecord, TranscriptRecord};

/// One course line of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseReport {
    /// Course id, e.g. `CS 135`
    pub course_id: String,
    /// Percentage grade, 0 when not numeric
    pub percent_grade: f64,
    /// Credit weight
    pub credit_weight: f64,
    /// Grade points, absent when the course does not count
    pub gpa_value: Option<f64>,
    /// Whether the course counts towards averages
    pub counted_in_average: bool,
}

impl CourseReport {
    /// Summarise one parsed course.
    pub fn from_course(course: &CourseRecord) -> Self {
        Self {
            course_id: course.id.clone(),
            percent_grade: course.numeric_grade,
            credit_weight: course.credit_worth,
            gpa_value: course
                .counts_in_average()
                .then(|| percent_to_gpa(course.numeric_grade)),
            counted_in_average: course.counts_in_average(),
        }
    }
}

/// One term of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermReport {
    /// Session label, e.g. `Fall 2019`
    pub term_label: String,
    /// Program level, e.g. `1A`
    pub level: String,
    /// Courses in document order
    pub courses: Vec<CourseReport>,
    /// Recomputed term GPA
    pub term_gpa: f64,
    /// Weighted grade-point sum of counted courses
    pub sum_weighted_gpa: f64,
    /// Credit sum of counted courses
    pub sum_credits: f64,
}

impl TermReport {
    /// Summarise one parsed term.
    pub fn from_term(term: &TermRecord) -> Self {
        let mut totals = GpaTotals::default();
        let courses = term
            .courses
            .iter()
            .map(|course| {
                totals.add_course(course);
                CourseReport::from_course(course)
            })
            .collect();

        Self {
            term_label: term.term_label.clone(),
            level: term.level.clone(),
            courses,
            term_gpa: totals.gpa(),
            sum_weighted_gpa: totals.weighted_sum,
            sum_credits: totals.credit_sum,
        }
    }

    fn totals(&self) -> GpaTotals {
        GpaTotals {
            weighted_sum: self.sum_weighted_gpa,
            credit_sum: self.sum_credits,
        }
    }
}

/// Final GPA report for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptReport {
    /// Student ID
    pub student_id: u64,
    /// Program of the first term
    pub program_name: String,
    /// Recomputed cumulative GPA
    pub cumulative_gpa: f64,
    /// Weighted grade-point sum over all terms
    pub total_weighted_gpa: f64,
    /// Credit sum over all terms
    pub total_credits: f64,
    /// Terms in document order
    pub terms: Vec<TermReport>,
}

impl TranscriptReport {
    /// Compute the report from a parsed record.
    ///
    /// The cumulative GPA is the credit-weighted average of every counted
    /// course; values printed on the transcript are not consulted.
    pub fn from_record(record: &TranscriptRecord) -> Self {
        let terms: Vec<TermReport> = record.terms.iter().map(TermReport::from_term).collect();
        Self::from_terms(record.student_id, record.program_name().to_string(), terms)
    }

    /// Assemble a report from per-term summaries.
    pub fn from_terms(student_id: u64, program_name: String, terms: Vec<TermReport>) -> Self {
        let mut totals = GpaTotals::default();
        for term in &terms {
            totals.add(term.totals());
        }
        Self {
            student_id,
            program_name,
            cumulative_gpa: totals.gpa(),
            total_weighted_gpa: totals.weighted_sum,
            total_credits: totals.credit_sum,
            terms,
        }
    }

    /// Terms that carry GPA credit.
    pub fn graded_terms(&self) -> impl Iterator<Item = &TermReport> {
        self.terms.iter().filter(|t| t.sum_credits != 0.0)
    }
}
