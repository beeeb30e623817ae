//! Chunk classification for the transcript state machine.
//!
//! Fixed-format fields are recognised with anchored regexes; everything else
//! is classified as a number, a course subject, a label or free text.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    pub(crate) static ref RE_NAME: Regex = Regex::new(r"Name:\s*(.*)$").unwrap();
    pub(crate) static ref RE_STUDENT_ID: Regex = Regex::new(r"Student ID:\s*(\d+)").unwrap();
    pub(crate) static ref RE_OEN: Regex =
        Regex::new(r"Ontario Education Nbr:\s*(\d+)\s*$").unwrap();

    /// Term label anywhere in a chunk
    pub(crate) static ref RE_TERM: Regex = Regex::new(r"(?:Fall|Winter|Spring) \d{4}").unwrap();
    /// A chunk that is nothing but a term label
    static ref RE_TERM_ONLY: Regex = Regex::new(r"^(?:Fall|Winter|Spring) \d{4}$").unwrap();

    pub(crate) static ref RE_PROGRAM: Regex = Regex::new(r"Program:\s*(.*)").unwrap();
    pub(crate) static ref RE_STATUS: Regex = Regex::new(
        r"Level:\s+(\d[A-B]|NL)\s*Load:\s+([\w-]*)\s*Form Of Study:\s*(.*?)\s*$"
    )
    .unwrap();

    /// Subject and catalog number in one chunk, e.g. `CS 135` or `MATH 239L`
    static ref RE_FULL_COURSE_ID: Regex = Regex::new(r"^[A-Z]+\s+\d{3}[A-Z]?$").unwrap();
    /// Credit weight such as `0.50`
    static ref RE_CREDIT_VALUE: Regex = Regex::new(r"^\d+\.\d+$").unwrap();

    pub(crate) static ref RE_STANDING: Regex =
        Regex::new(r"Academic Standing:\s*(.*?)\s*(?:Effective\b.*)?$").unwrap();
    pub(crate) static ref RE_HONOURS: Regex = Regex::new(r"Term Honours:\s*(.*?)\s*$").unwrap();
    pub(crate) static ref RE_EFFECTIVE: Regex =
        Regex::new(r"Effective (\d{2}/\d{2}/\d{4})").unwrap();
}

/// Parse a chunk as a finite number, ignoring surrounding whitespace.
pub fn parse_number(chunk: &str) -> Option<f64> {
    let trimmed = chunk.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Empty or whitespace-only chunk.
pub fn is_blank(chunk: &str) -> bool {
    chunk.trim().is_empty()
}

/// Uppercase text with at least one letter, e.g. `CS` or `MATH 135`.
///
/// Inside the credit columns this means the next course has started.
pub fn is_course_subject(chunk: &str) -> bool {
    let trimmed = chunk.trim();
    trimmed.chars().any(char::is_alphabetic) && !trimmed.chars().any(char::is_lowercase)
}

/// Subject and catalog number together in one chunk.
pub fn is_full_course_id(chunk: &str) -> bool {
    RE_FULL_COURSE_ID.is_match(chunk.trim())
}

/// A decimal credit weight.
pub fn is_credit_value(chunk: &str) -> bool {
    RE_CREDIT_VALUE.is_match(chunk.trim())
}

/// A chunk consisting only of a term label.
pub fn is_term_label(chunk: &str) -> bool {
    RE_TERM_ONLY.is_match(chunk.trim())
}

/// Date on an `Effective MM/DD/YYYY` line.
///
/// Falls back to day-first when the month-first reading is impossible.
/// Returns `None` when there is no such line or the date is invalid.
pub fn effective_date(chunk: &str) -> Option<Option<NaiveDate>> {
    let caps = RE_EFFECTIVE.captures(chunk)?;
    let raw = &caps[1];
    let date = NaiveDate::parse_from_str(raw, "%m/%d/%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .ok();
    Some(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("0.50"), Some(0.5));
        assert_eq!(parse_number(" 85 "), Some(85.0));
        assert_eq!(parse_number("CR"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_course_subject() {
        assert!(is_course_subject("CS"));
        assert!(is_course_subject("MATH 135"));
        assert!(is_course_subject(" PD "));
        assert!(!is_course_subject("In GPA"));
        assert!(!is_course_subject("Intro to Computer Science"));
        assert!(!is_course_subject("135"));
        assert!(!is_course_subject(" "));
    }

    #[test]
    fn test_full_course_id() {
        assert!(is_full_course_id("CS 135"));
        assert!(is_full_course_id("MATH 239L"));
        assert!(!is_full_course_id("CS"));
        assert!(!is_full_course_id("Intro to CS 135"));
    }

    #[test]
    fn test_credit_value() {
        assert!(is_credit_value("0.50"));
        assert!(!is_credit_value("135"));
        assert!(!is_credit_value("CR"));
    }

    #[test]
    fn test_term_label() {
        assert!(is_term_label("Fall 2019"));
        assert!(is_term_label(" Winter 2020 "));
        assert!(!is_term_label("Spring 2021 Co-op"));
        assert!(RE_TERM.is_match("Term: Spring 2021"));
    }

    #[test]
    fn test_status_regex() {
        let caps = RE_STATUS
            .captures("Level: 2B Load: Full Form Of Study: Co-op Work Term")
            .unwrap();
        assert_eq!(&caps[1], "2B");
        assert_eq!(&caps[2], "Full");
        assert_eq!(&caps[3], "Co-op Work Term");
    }

    #[test]
    fn test_standing_regex() {
        let caps = RE_STANDING.captures("Academic Standing: Good Standing").unwrap();
        assert_eq!(&caps[1], "Good Standing");

        let caps = RE_STANDING
            .captures("Academic Standing: Good Standing Effective 05/01/2020")
            .unwrap();
        assert_eq!(&caps[1], "Good Standing");
    }

    #[test]
    fn test_effective_date() {
        assert_eq!(
            effective_date("Effective 05/01/2020"),
            Some(NaiveDate::from_ymd_opt(2020, 5, 1))
        );
        assert_eq!(
            effective_date("Effective 25/12/2019"),
            Some(NaiveDate::from_ymd_opt(2019, 12, 25))
        );
        assert_eq!(effective_date("Effective 99/99/2019"), Some(None));
        assert_eq!(effective_date("Good Standing"), None);
    }
}
