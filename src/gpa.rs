//! Percentage to grade-point conversion and weighted averages.
//!
//! Conversion follows the OMSAS 4.0 scale. Averages are always recomputed
//! from course-level data; GPA values printed on a transcript are never
//! used, since they carry their own rounding.

use crate::transcript::{CourseRecord, TermRecord};

/// Fixed conversion breakpoints, highest threshold first.
///
/// A percentage maps to the grade point of the first threshold it meets;
/// anything below the last threshold is 0.
pub const GRADE_CONVERSION_TABLE: [(f64, f64); 12] = [
    (90.0, 4.0),
    (85.0, 3.9),
    (80.0, 3.7),
    (77.0, 3.3),
    (73.0, 3.0),
    (70.0, 2.7),
    (67.0, 2.3),
    (63.0, 2.0),
    (60.0, 1.7),
    (57.0, 1.3),
    (53.0, 1.0),
    (50.0, 0.7),
];

/// Convert a percentage grade to grade points.
///
/// Non-finite input converts to 0.
///
/// # Example
///
/// ```
/// use transcript_oxide::gpa::percent_to_gpa;
///
/// assert_eq!(percent_to_gpa(85.0), 3.9);
/// assert_eq!(percent_to_gpa(49.9), 0.0);
/// ```
pub fn percent_to_gpa(percent: f64) -> f64 {
    GRADE_CONVERSION_TABLE
        .iter()
        .find(|(threshold, _)| percent >= *threshold)
        .map(|(_, points)| *points)
        .unwrap_or(0.0)
}

/// `weighted / credits`, or 0 when there are no credits.
pub fn weighted_average(weighted: f64, credits: f64) -> f64 {
    if credits != 0.0 {
        weighted / credits
    } else {
        0.0
    }
}

/// Running weighted grade-point sum and credit sum.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GpaTotals {
    /// Sum of grade points times credit weight
    pub weighted_sum: f64,
    /// Sum of credit weights
    pub credit_sum: f64,
}

impl GpaTotals {
    /// Add one course. Ungraded courses and courses outside the average
    /// are ignored.
    pub fn add_course(&mut self, course: &CourseRecord) {
        if !course.counts_in_average() {
            return;
        }
        self.weighted_sum += percent_to_gpa(course.numeric_grade) * course.credit_worth;
        self.credit_sum += course.credit_worth;
    }

    /// Fold in another set of totals.
    pub fn add(&mut self, other: GpaTotals) {
        self.weighted_sum += other.weighted_sum;
        self.credit_sum += other.credit_sum;
    }

    /// Weighted average, 0 without credits.
    pub fn gpa(&self) -> f64 {
        weighted_average(self.weighted_sum, self.credit_sum)
    }
}

/// Totals over the counted courses of one term.
pub fn term_totals(term: &TermRecord) -> GpaTotals {
    let mut totals = GpaTotals::default();
    for course in &term.courses {
        totals.add_course(course);
    }
    totals
}

/// Totals over every term.
pub fn cumulative_totals(terms: &[TermRecord]) -> GpaTotals {
    let mut totals = GpaTotals::default();
    for term in terms {
        totals.add(term_totals(term));
    }
    totals
}
