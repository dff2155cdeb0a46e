//! Backend seam for generative model calls.

use async_trait::async_trait;
use serde_json::Value;

use crate::LlmResult;

/// A fully assembled prompt plus its declared output schema.
///
/// Ephemeral; exists only for the duration of one invocation.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub prompt: String,
    /// Structured-output declaration forwarded to backends that support it
    pub response_schema: Value,
}

/// Opaque request/response seam over a hosted generative API.
///
/// Implementations make exactly one call per `generate` and surface any
/// failure as an error; the fallback sweep is the sole retry mechanism.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Run one generation call against `model` and return the raw
    /// response text.
    async fn generate(&self, model: &str, request: &AnalysisRequest) -> LlmResult<String>;
}
