use super::ReportConverter;
use crate::error::Result;
use crate::report::TranscriptReport;

/// JSON output.
#[derive(Debug, Clone, Default)]
pub struct JsonConverter;

impl JsonConverter {
    /// Create a JSON converter.
    pub fn new() -> Self {
        Self
    }
}

impl ReportConverter for JsonConverter {
    fn convert(&self, report: &TranscriptReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    fn name(&self) -> &'static str {
        "Json"
    }
}
