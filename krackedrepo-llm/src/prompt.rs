//! Prompt assembly for the MVP synthesis call.
//!
//! Pure string work: per-file previews capped at a fixed character count,
//! joined by a delimiter and interpolated into the instruction template.
//! No I/O happens here.

use serde_json::{json, Value};

use krackedrepo_core::FileRecord;

use crate::backend::AnalysisRequest;

/// Maximum characters of file content embedded per file.
pub const PREVIEW_CHAR_LIMIT: usize = 1000;

/// Separator between embedded files.
pub const FILE_DELIMITER: &str = "\n\n---\n\n";

/// Conversion rate quoted to the model. Illustrative, not live data; the
/// valuation fields in the report are pass-through estimates either way.
pub const USD_TO_MYR_RATE: f64 = 4.70;

/// Render the per-file preview block: a header line naming the file, then
/// the first [`PREVIEW_CHAR_LIMIT`] characters of its content.
#[must_use]
pub fn build_file_summary(files: &[FileRecord]) -> String {
    files
        .iter()
        .map(|file| {
            let preview: String = file.content.chars().take(PREVIEW_CHAR_LIMIT).collect();
            format!("FILE: {}\nCONTENT PREVIEW:\n{}", file.name, preview)
        })
        .collect::<Vec<_>>()
        .join(FILE_DELIMITER)
}

/// Assemble the full instruction prompt around the file previews.
#[must_use]
pub fn build_prompt(files: &[FileRecord]) -> String {
    format!(
        "\
You are a senior product engineer and venture architect. Analyze this repository (it might be incomplete) and conceptualize a polished MVP version.

TASK:
1. Identify the core value proposition.
2. Extract the actual tech stack used and suggest missing pieces. For each technology, provide its name and a brief (1 sentence) description of its specific role in this product's architecture.
3. Generate a structured roadmap for launch.
4. Propose a specific MVP version number based on completeness.
5. Estimate a potential market valuation (Seed/Pre-seed stage) based on the technical complexity and market potential.
   - Provide valuation in USD.
   - Provide valuation in Ringgit Malaysia (MYR) using an approximate exchange rate of 1 USD = {rate:.2} MYR.

INPUT REPO FILES:
{file_summary}

Return the response strictly in the specified JSON format. Ensure valuations are reasonable numbers (not strings).",
        rate = USD_TO_MYR_RATE,
        file_summary = build_file_summary(files),
    )
}

/// The structured-output declaration for the report, in the uppercase
/// OpenAPI-subset form the Gemini API expects.
#[must_use]
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "projectName": { "type": "STRING" },
            "tagline": { "type": "STRING" },
            "overview": { "type": "STRING" },
            "techStack": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "role": { "type": "STRING" }
                    },
                    "required": ["name", "role"]
                }
            },
            "features": { "type": "ARRAY", "items": { "type": "STRING" } },
            "roadmap": { "type": "ARRAY", "items": { "type": "STRING" } },
            "suggestedMvpVersion": { "type": "STRING" },
            "valuationUSD": { "type": "NUMBER" },
            "valuationMYR": { "type": "NUMBER" }
        },
        "required": [
            "projectName", "tagline", "overview", "techStack", "features",
            "roadmap", "suggestedMvpVersion", "valuationUSD", "valuationMYR"
        ]
    })
}

/// Bundle the prompt and schema for one invocation.
#[must_use]
pub fn build_analysis_request(files: &[FileRecord]) -> AnalysisRequest {
    AnalysisRequest {
        prompt: build_prompt(files),
        response_schema: response_schema(),
    }
}
