//! Positioned text fragments as delivered by the extraction engine.
//!
//! A fragment is one string placed on the page at a left edge `x` and a
//! baseline `y`. Fragments are produced per page, in the order the engine
//! emits them, which is close to (but not guaranteed to be) reading order.

use serde::{Deserialize, Serialize};

/// A positioned string on one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// The string exactly as extracted
    pub text: String,
    /// Left edge of the string
    pub x: f32,
    /// Baseline of the string
    pub y: f32,
}

impl Fragment {
    /// Create a new fragment.
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
        }
    }

    /// True if the text ends in a whitespace character.
    ///
    /// An empty string does not end in whitespace.
    pub fn ends_with_whitespace(&self) -> bool {
        self.text.chars().last().is_some_and(char::is_whitespace)
    }
}

/// All fragments extracted from a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFragments {
    /// Page number (1-indexed)
    pub page_number: u32,
    /// Fragments in engine order
    pub fragments: Vec<Fragment>,
}

impl PageFragments {
    /// Create a page from its number and fragments.
    pub fn new(page_number: u32, fragments: Vec<Fragment>) -> Self {
        Self {
            page_number,
            fragments,
        }
    }

    /// Build a page of fragments that all sit on successive lines at `x = 0`.
    ///
    /// Useful for feeding an already tokenized stream through the pipeline.
    pub fn from_lines<S: AsRef<str>>(page_number: u32, lines: &[S]) -> Self {
        let fragments = lines
            .iter()
            .enumerate()
            .map(|(i, line)| Fragment::new(line.as_ref(), 0.0, -(i as f32) * 12.0))
            .collect();
        Self::new(page_number, fragments)
    }

    /// Raw text of each fragment, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().map(|f| f.text.as_str())
    }
}
