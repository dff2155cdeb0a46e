//! Parsing of raw model output into the structured report.

use krackedrepo_core::MvpReport;

use crate::{LlmError, LlmResult};

/// Parse the raw response text into a report.
///
/// Empty or whitespace-only text is rejected before any JSON parsing.
/// Beyond typed deserialization there is no field-by-field validation;
/// the declared schema constraint is trusted.
pub fn parse_report(text: &str) -> LlmResult<MvpReport> {
    if text.trim().is_empty() {
        return Err(LlmError::EmptyResponse);
    }
    Ok(serde_json::from_str(text)?)
}
