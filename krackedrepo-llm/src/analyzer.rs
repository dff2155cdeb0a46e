//! End-to-end repo-to-MVP pipeline.
//!
//! Prompt assembly, the model sweep, and response parsing glued into one
//! call. All-or-nothing: either a complete report comes back or the
//! invocation fails as a whole.

use tracing::info;

use krackedrepo_core::{FileRecord, MvpReport};

use crate::backend::GenerativeBackend;
use crate::fallback::{FallbackPlan, ModelSweep};
use crate::prompt::build_analysis_request;
use crate::response::parse_report;
use crate::LlmResult;

/// Converts a collected file set into a structured MVP report.
pub struct RepoAnalyzer<B: GenerativeBackend> {
    backend: B,
    plan: FallbackPlan,
}

impl<B: GenerativeBackend> RepoAnalyzer<B> {
    /// Analyzer with the default fallback order.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            plan: FallbackPlan::default(),
        }
    }

    /// Analyzer with an explicit candidate order.
    pub fn with_plan(backend: B, plan: FallbackPlan) -> Self {
        Self { backend, plan }
    }

    /// Run one full synthesis over the collected files.
    pub async fn convert(&self, files: &[FileRecord]) -> LlmResult<MvpReport> {
        let request = build_analysis_request(files);

        let mut sweep = ModelSweep::new(&self.backend, &self.plan);
        let text = sweep.run(&request).await?;

        info!(
            "model sweep succeeded after {} failed candidate(s)",
            sweep.failures().len()
        );

        parse_report(&text)
    }
}
