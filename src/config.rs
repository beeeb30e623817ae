//! Configuration for transcript parsing.

/// Marker texts and limits used by the transcript state machine.
///
/// The defaults match the undergraduate unofficial transcript layout.
///
/// # Example
///
/// ```
/// use transcript_oxide::config::TranscriptConfig;
///
/// let config = TranscriptConfig::new().with_max_redispatch(4);
/// assert_eq!(config.max_redispatch, 4);
/// assert!(config.is_grade_sentinel("CR"));
/// assert!(!config.is_grade_sentinel("CS"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptConfig {
    /// Text that opens the transcript body.
    pub header_marker: String,

    /// Text that closes the transcript body.
    pub end_marker: String,

    /// Section heading for program milestones.
    pub milestones_marker: String,

    /// Section heading for scholarships and awards.
    pub scholarships_marker: String,

    /// Description text flagging a course as excluded from averages.
    pub not_in_average_marker: String,

    /// Non-numeric grades (`CR`, `WD`, `INC`, ...). A course with one of
    /// these is never counted in averages.
    pub grade_sentinels: Vec<String>,

    /// Maximum number of times one chunk may be re-dispatched.
    pub max_redispatch: usize,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            header_marker: "Undergraduate Unofficial Transcript".to_string(),
            end_marker: "End of Undergraduate Unofficial Transcript".to_string(),
            milestones_marker: "Milestones".to_string(),
            scholarships_marker: "Scholarships and Awards".to_string(),
            not_in_average_marker: "Not in Avg".to_string(),
            grade_sentinels: ["CR", "NCR", "WD", "WF", "INC", "DNW", "AEG", "IP"]
                .iter()
                .map(|g| g.to_string())
                .collect(),
            max_redispatch: 8,
        }
    }

    /// Set the header marker.
    pub fn with_header_marker(mut self, marker: impl Into<String>) -> Self {
        self.header_marker = marker.into();
        self
    }

    /// Set the end-of-document marker.
    pub fn with_end_marker(mut self, marker: impl Into<String>) -> Self {
        self.end_marker = marker.into();
        self
    }

    /// Set the not-in-average marker.
    pub fn with_not_in_average_marker(mut self, marker: impl Into<String>) -> Self {
        self.not_in_average_marker = marker.into();
        self
    }

    /// Replace the set of non-numeric grade sentinels.
    pub fn with_grade_sentinels<I, S>(mut self, sentinels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.grade_sentinels = sentinels.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `chunk` is one of the non-numeric grade sentinels.
    pub fn is_grade_sentinel(&self, chunk: &str) -> bool {
        let trimmed = chunk.trim();
        self.grade_sentinels.iter().any(|g| g == trimmed)
    }

    /// Set the re-dispatch limit per chunk.
    pub fn with_max_redispatch(mut self, limit: usize) -> Self {
        self.max_redispatch = limit;
        self
    }
}
