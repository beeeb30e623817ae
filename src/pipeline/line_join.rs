//! Joining consecutive fragments into readable page text.
//!
//! The engine emits fragments roughly top-to-bottom and left-to-right but
//! gives no explicit line or word boundaries. The separator placed between
//! two fragments is inferred from their relative position only; fragments
//! are never re-sorted.

use crate::layout::Fragment;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A lone letter, or text ending in a space and one letter: the tail of a wrapped word.
    static ref RE_SINGLE_LETTER_WRAP: Regex =
        Regex::new(r"^(\s?[a-zA-Z])$|^(.+\s[a-zA-Z])$").unwrap();
}

/// Line break inserted when a fragment starts left of its predecessor.
pub const LINE_BREAK: &str = "\r\n";

/// Separator placed before a fragment during page assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// Concatenate directly
    None,
    /// Insert a single space
    Space,
    /// Insert a line break
    LineBreak,
}

impl Separator {
    /// Text to insert for this separator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Separator::None => "",
            Separator::Space => " ",
            Separator::LineBreak => LINE_BREAK,
        }
    }
}

/// Decide what goes between `prev` and `cur`.
///
/// - previous text ends in whitespace: nothing
/// - `cur` starts left of `prev`: line break
/// - different baseline and `prev` is not a single-letter wrap: space
/// - otherwise: nothing
pub fn separator_between(prev: &Fragment, cur: &Fragment) -> Separator {
    if prev.ends_with_whitespace() {
        return Separator::None;
    }
    if cur.x < prev.x {
        Separator::LineBreak
    } else if prev.y != cur.y && !RE_SINGLE_LETTER_WRAP.is_match(&prev.text) {
        Separator::Space
    } else {
        Separator::None
    }
}

/// Assemble one page of fragments into text, followed by a blank line.
pub fn assemble_page_text(fragments: &[Fragment]) -> String {
    let mut text = String::new();
    let mut last: Option<&Fragment> = None;

    for fragment in fragments {
        if let Some(prev) = last {
            text.push_str(separator_between(prev, fragment).as_str());
        }
        text.push_str(&fragment.text);
        last = Some(fragment);
    }

    text.push_str("\n\n");
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(text: &str, x: f32, y: f32) -> Fragment {
        Fragment::new(text, x, y)
    }

    #[test]
    fn test_line_break_when_moving_left() {
        let prev = frag("Introduction to", 200.0, 500.0);
        let cur = frag("CS", 72.0, 488.0);
        assert_eq!(separator_between(&prev, &cur), Separator::LineBreak);
    }

    #[test]
    fn test_space_on_new_baseline() {
        let prev = frag("Elementary Algorithm", 200.0, 500.0);
        let cur = frag("Design", 210.0, 490.0);
        assert_eq!(separator_between(&prev, &cur), Separator::Space);
    }

    #[test]
    fn test_no_space_after_single_letter_wrap() {
        let prev = frag("Data Abstraction and Implementation a", 200.0, 500.0);
        let cur = frag("nd more", 210.0, 490.0);
        assert_eq!(separator_between(&prev, &cur), Separator::None);

        let prev = frag("I", 200.0, 500.0);
        assert_eq!(separator_between(&prev, &cur), Separator::None);
    }

    #[test]
    fn test_trailing_whitespace_suppresses_separator() {
        let prev = frag("Name: ", 300.0, 700.0);
        let cur = frag("Jane Doe", 72.0, 688.0);
        assert_eq!(separator_between(&prev, &cur), Separator::None);
    }

    #[test]
    fn test_same_line_concatenates() {
        let prev = frag("0.50", 400.0, 500.0);
        let cur = frag("85", 450.0, 500.0);
        assert_eq!(separator_between(&prev, &cur), Separator::None);
    }

    #[test]
    fn test_assemble_page_text() {
        let fragments = vec![
            frag("CS 135", 72.0, 500.0),
            frag("Designing Functional", 150.0, 500.0),
            frag("Programs", 160.0, 490.0),
            frag("MATH 135", 72.0, 470.0),
        ];
        let text = assemble_page_text(&fragments);
        assert_eq!(
            text,
            "CS 135Designing Functional Programs\r\nMATH 135\n\n"
        );
    }

    #[test]
    fn test_assemble_empty_page() {
        assert_eq!(assemble_page_text(&[]), "\n\n");
    }
}
