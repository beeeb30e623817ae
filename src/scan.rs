//! Line-oriented transcript scanning over assembled page text.
//!
//! Older transcript layouts print each course on one line, with attempted
//! and earned credits joined by a slash:
//!
//! ```text
//! CS 135 Designing Functional Programs 0.50/0.50 85 Y Y
//! ```
//!
//! This module reads that layout straight from the plain-text export of the
//! chunk stream. It also hosts the input-format check that runs before the
//! state machine is started.

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::TranscriptConfig;
use crate::error::{Error, Result};
use crate::parser::patterns::RE_STUDENT_ID;
use crate::transcript::{CourseRecord, TermRecord, TranscriptRecord};

lazy_static! {
    static ref RE_PROGRAM_LINE: Regex = Regex::new(r"Program:\s*(.*?)\s*Level:").unwrap();
    static ref RE_TERM_START: Regex = Regex::new(r"Spring|Fall|Winter").unwrap();
    static ref RE_TERM_LABEL: Regex = Regex::new(r"(?:Spring|Fall|Winter) \d{4}").unwrap();
    static ref RE_LEVEL: Regex = Regex::new(r"Level:\s+(\d[A-B]|NL)\s*Load:").unwrap();
    static ref RE_LINE_BREAK: Regex = Regex::new(r"\r\n|\r|\n").unwrap();

    /// Course id at line start, then `attempted/earned grade credit in-gpa` at line end
    static ref RE_COURSE_LINE: Regex =
        Regex::new(r"^(\s*[A-Z]+ \d{3}[A-Z]?).+?(\d+\.\d+/\d+\.\d+\s[\s\w/\.]+)$").unwrap();
}

/// Text between the header and end markers.
///
/// Without a header the body starts at the beginning; without an end
/// marker it runs to the end.
fn transcript_body<'a>(text: &'a str, config: &TranscriptConfig) -> &'a str {
    let begin = text
        .find(config.header_marker.as_str())
        .map(|i| i + config.header_marker.len())
        .unwrap_or(0);
    let end = text
        .find(config.end_marker.as_str())
        .unwrap_or(text.len())
        .max(begin);
    &text[begin..end]
}

/// Verify the text looks like a transcript and return the student ID.
///
/// # Errors
///
/// Returns [`Error::InputFormat`] when the header marker or the
/// `Student ID:` field is missing.
pub fn check_input_format(text: &str, config: &TranscriptConfig) -> Result<u64> {
    if !text.contains(config.header_marker.as_str()) {
        return Err(Error::InputFormat(format!(
            "Couldn't find '{}'. Verify this is actually a transcript PDF",
            config.header_marker
        )));
    }
    RE_STUDENT_ID
        .captures(transcript_body(text, config))
        .and_then(|caps| caps[1].parse::<u64>().ok())
        .ok_or_else(|| {
            Error::InputFormat(
                "Couldn't find Student ID in transcript. Verify this is actually a transcript PDF"
                    .to_string(),
            )
        })
}

/// Parse one course line, if it is one.
fn scan_course_line(line: &str) -> Option<CourseRecord> {
    let caps = RE_COURSE_LINE.captures(line)?;
    let details: Vec<&str> = caps[2].split_whitespace().collect();
    let (attempted, earned) = details.first()?.split_once('/')?;
    let grade = details.get(1).copied().unwrap_or("");

    Some(CourseRecord {
        id: caps[1].trim().to_string(),
        credit_worth: attempted.parse().unwrap_or(0.0),
        credit_earned: earned.parse().unwrap_or(0.0),
        grade: grade.to_string(),
        numeric_grade: grade.parse::<f64>().map(f64::trunc).unwrap_or(0.0),
        in_average: details.get(3) == Some(&"Y"),
        ..Default::default()
    })
}

/// Scan assembled transcript text into a record.
///
/// Terms without both a session label and a level line (transfer credit,
/// for example) are dropped.
///
/// # Errors
///
/// Returns [`Error::InputFormat`] if the student ID or program is missing.
pub fn scan_text(text: &str, config: &TranscriptConfig) -> Result<TranscriptRecord> {
    let student_id = check_input_format(text, config)?;
    let body = transcript_body(text, config);

    let program = RE_PROGRAM_LINE
        .captures(body)
        .map(|caps| caps[1].trim().to_string())
        .ok_or_else(|| {
            Error::InputFormat(
                "Couldn't find Program in transcript. Verify this is actually a transcript PDF"
                    .to_string(),
            )
        })?;

    let starts: Vec<usize> = RE_TERM_START.find_iter(body).map(|m| m.start()).collect();
    let mut terms = Vec::new();

    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(body.len());
        let raw = &body[start..end];

        let (Some(label), Some(level)) = (RE_TERM_LABEL.find(raw), RE_LEVEL.captures(raw)) else {
            log::debug!("Skipping term block without label or level at offset {}", start);
            continue;
        };

        let mut term = TermRecord::new(label.as_str());
        term.program = program.clone();
        term.level = level[1].to_string();
        term.courses = RE_LINE_BREAK
            .split(&raw[label.end()..])
            .filter_map(scan_course_line)
            .collect();
        terms.push(term);
    }

    log::debug!("Scanned {} terms for student {}", terms.len(), student_id);
    Ok(TranscriptRecord {
        student_id,
        terms,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "University of Waterloo\r\n\
        Undergraduate Unofficial Transcript\r\n\
        Name: Jane Doe\r\n\
        Student ID: 12345678\r\n\
        Fall 2019\r\n\
        Program: Computer Science Level: 1A Load: Full Form Of Study: Enrollment\r\n\
        CS 135 Designing Functional Programs 0.50/0.50 85 Y Y\r\n\
        MATH 135 Algebra for Honours Mathematics 0.50/0.50 72 Y Y\r\n\
        PD 1 Career Fundamentals 0.50/0.50 CR Y N\r\n\
        Winter 2020\r\n\
        Level: 1B Load: Full\r\n\
        CS 136L Tools and Techniques 0.25/0.25 95 Y Y\r\n\
        Transfer Credit Spring\r\n\
        End of Undergraduate Unofficial Transcript\n\n";

    #[test]
    fn test_check_input_format() {
        let config = TranscriptConfig::default();
        assert_eq!(check_input_format(TEXT, &config).unwrap(), 12345678);

        let err = check_input_format("Name: Jane Doe\nStudent ID: 1", &config).unwrap_err();
        assert!(matches!(err, Error::InputFormat(_)));

        let err = check_input_format(
            "Undergraduate Unofficial Transcript\nName: Jane Doe\n",
            &config,
        )
        .unwrap_err();
        assert!(format!("{}", err).contains("Student ID"));
    }

    #[test]
    fn test_end_marker_only() {
        let config = TranscriptConfig::default();
        let text = "Student ID: 1\nEnd of Undergraduate Unofficial Transcript";
        assert!(check_input_format(text, &config).is_err());
    }

    #[test]
    fn test_scan_course_line() {
        let course =
            scan_course_line("CS 135 Designing Functional Programs 0.50/0.50 85 Y Y").unwrap();
        assert_eq!(course.id, "CS 135");
        assert_eq!(course.credit_worth, 0.5);
        assert_eq!(course.credit_earned, 0.5);
        assert_eq!(course.numeric_grade, 85.0);
        assert!(course.in_average);

        let course = scan_course_line("PD 1 Career Fundamentals 0.50/0.50 CR Y N");
        assert!(course.is_none(), "catalog numbers need three digits");

        let course = scan_course_line("COOP 001 Co-op Work Term 0.00/0.00 CR Y N").unwrap();
        assert_eq!(course.grade, "CR");
        assert_eq!(course.numeric_grade, 0.0);
        assert!(!course.in_average);

        assert!(scan_course_line("Level: 1A Load: Full").is_none());
    }

    #[test]
    fn test_scan_text() {
        let record = scan_text(TEXT, &TranscriptConfig::default()).unwrap();
        assert_eq!(record.student_id, 12345678);
        assert_eq!(record.program_name(), "Computer Science");
        assert_eq!(record.terms.len(), 2);

        let fall = &record.terms[0];
        assert_eq!(fall.term_label, "Fall 2019");
        assert_eq!(fall.level, "1A");
        assert_eq!(fall.courses.len(), 2);
        assert_eq!(fall.courses[1].id, "MATH 135");
        assert_eq!(fall.courses[1].numeric_grade, 72.0);

        let winter = &record.terms[1];
        assert_eq!(winter.level, "1B");
        assert_eq!(winter.courses[0].id, "CS 136L");
        assert_eq!(winter.courses[0].credit_worth, 0.25);
    }

    #[test]
    fn test_scan_text_without_program() {
        let text = "Undergraduate Unofficial Transcript\nStudent ID: 7\nFall 2019\n";
        let err = scan_text(text, &TranscriptConfig::default()).unwrap_err();
        assert!(format!("{}", err).contains("Program"));
    }
}
