//! Plain-text report tables.

use std::fmt::Write;

use super::ReportConverter;
use crate::error::Result;
use crate::report::{CourseReport, TermReport, TranscriptReport};

/// Plain-text output with one table per graded term.
///
/// ```text
/// Cumulative GPA: 3.900
/// Student ID: 12345678
/// Program: Computer Science
///
/// Fall 2019 (1A)
/// Course       Grade  Weight   GPA  Counted
/// CS 135          85    0.50  3.90  Y
/// Term GPA: 3.900
/// ```
#[derive(Debug, Clone)]
pub struct PlainTextConverter {
    /// Width of the course id column
    pub course_width: usize,
}

impl PlainTextConverter {
    /// Create a converter with default column widths.
    pub fn new() -> Self {
        Self { course_width: 12 }
    }

    fn write_course(&self, out: &mut String, course: &CourseReport) {
        let grade = if course.percent_grade > 0.0 {
            format!("{}", course.percent_grade)
        } else {
            "N/A".to_string()
        };
        let gpa = course
            .gpa_value
            .map(|g| format!("{:.2}", g))
            .unwrap_or_else(|| "N/A".to_string());
        let _ = writeln!(
            out,
            "{:<width$} {:>5} {:>7.2} {:>5}  {}",
            course.course_id,
            grade,
            course.credit_weight,
            gpa,
            if course.counted_in_average { "Y" } else { "N" },
            width = self.course_width,
        );
    }

    fn write_term(&self, out: &mut String, term: &TermReport) {
        let _ = writeln!(out);
        let _ = writeln!(out, "{} ({})", term.term_label, term.level);
        let _ = writeln!(
            out,
            "{:<width$} {:>5} {:>7} {:>5}  Counted",
            "Course",
            "Grade",
            "Weight",
            "GPA",
            width = self.course_width,
        );
        for course in &term.courses {
            self.write_course(out, course);
        }
        let _ = writeln!(out, "Term GPA: {:.3}", term.term_gpa);
    }
}

impl Default for PlainTextConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportConverter for PlainTextConverter {
    fn convert(&self, report: &TranscriptReport) -> Result<String> {
        let mut out = String::new();
        let _ = writeln!(out, "Cumulative GPA: {:.3}", report.cumulative_gpa);
        let _ = writeln!(out, "Student ID: {}", report.student_id);
        let _ = writeln!(out, "Program: {}", report.program_name);

        for term in report.graded_terms() {
            self.write_term(&mut out, term);
        }
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "PlainText"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> TranscriptReport {
        let graded = TermReport {
            term_label: "Fall 2019".to_string(),
            level: "1A".to_string(),
            courses: vec![
                CourseReport {
                    course_id: "CS 135".to_string(),
                    percent_grade: 85.0,
                    credit_weight: 0.5,
                    gpa_value: Some(3.9),
                    counted_in_average: true,
                },
                CourseReport {
                    course_id: "PD 1".to_string(),
                    percent_grade: 0.0,
                    credit_weight: 0.5,
                    gpa_value: None,
                    counted_in_average: false,
                },
            ],
            term_gpa: 3.9,
            sum_weighted_gpa: 1.95,
            sum_credits: 0.5,
        };
        let work = TermReport {
            term_label: "Spring 2020".to_string(),
            level: "1B".to_string(),
            courses: vec![],
            term_gpa: 0.0,
            sum_weighted_gpa: 0.0,
            sum_credits: 0.0,
        };
        TranscriptReport::from_terms(12345678, "Computer Science".to_string(), vec![graded, work])
    }

    #[test]
    fn test_plain_text_layout() {
        let text = PlainTextConverter::new().convert(&report()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Cumulative GPA: 3.900");
        assert_eq!(lines[1], "Student ID: 12345678");
        assert_eq!(lines[2], "Program: Computer Science");
        assert!(text.contains("Fall 2019 (1A)"));
        assert!(text.contains("Term GPA: 3.900"));
        assert!(text.contains("0.50  3.90  Y"));
        assert!(text.contains("N/A"));
    }

    #[test]
    fn test_ungraded_terms_are_omitted() {
        let text = PlainTextConverter::new().convert(&report()).unwrap();
        assert!(!text.contains("Spring 2020"));
    }
}
