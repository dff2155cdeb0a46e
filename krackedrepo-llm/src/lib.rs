//! KrackedRepo LLM - Prompt Contract and Model-Fallback Protocol
//!
//! This crate owns everything between the collected file list and the
//! structured MVP report:
//! - Prompt assembly with fixed per-file content previews
//! - The Gemini API client with structured-output schema constraints
//! - A strictly sequential fallback sweep over candidate model identifiers
//! - Parsing of the raw response into the report

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod analyzer;
pub mod backend;
pub mod fallback;
pub mod gemini;
pub mod prompt;
pub mod response;

// Re-export main types for convenience
pub use analyzer::RepoAnalyzer;
pub use backend::{AnalysisRequest, GenerativeBackend};
pub use fallback::{FailedAttempt, FallbackPlan, ModelSweep, SweepState};
pub use gemini::GeminiClient;
pub use response::parse_report;

/// Result type for LLM operations
pub type LlmResult<T> = std::result::Result<T, LlmError>;

/// Error types for LLM operations
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The model API answered with a non-success status
    #[error("model API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The backend produced no usable text
    #[error("AI failed to generate content")]
    EmptyResponse,

    /// Every candidate model in the fallback plan failed
    #[error("all {} candidate models failed: {}", .attempts.len(), fallback::summarize(.attempts))]
    Exhausted {
        attempts: Vec<fallback::FailedAttempt>,
    },
}
