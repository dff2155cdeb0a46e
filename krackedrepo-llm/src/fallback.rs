//! Sequential model-fallback protocol.
//!
//! Hosted model identifiers get renamed, deprecated, and rate-limited
//! unpredictably; an ordered sweep over a candidate list tolerates that
//! churn without a circuit breaker or dynamic discovery. Candidates are
//! tried for availability, not speed, so the sweep is strictly
//! sequential: no backoff, no same-candidate retry, no partial-result
//! merging across attempts.

use tracing::warn;

use crate::backend::{AnalysisRequest, GenerativeBackend};
use crate::{LlmError, LlmResult};

/// Model identifiers tried in order when no override is supplied.
pub const DEFAULT_MODEL_FALLBACK: &[&str] =
    &["gemini-1.5-pro", "gemini-1.5-flash", "gemini-2.0-flash-exp"];

/// Ordered list of candidate model identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackPlan {
    models: Vec<String>,
}

impl FallbackPlan {
    /// Build a plan from an explicit candidate order.
    pub fn new(models: Vec<String>) -> LlmResult<Self> {
        if models.is_empty() {
            return Err(LlmError::Config(
                "fallback plan needs at least one model identifier".to_string(),
            ));
        }
        Ok(Self { models })
    }

    /// Candidates in attempt order.
    #[must_use]
    pub fn models(&self) -> &[String] {
        &self.models
    }
}

impl Default for FallbackPlan {
    fn default() -> Self {
        Self {
            models: DEFAULT_MODEL_FALLBACK
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// One failed candidate attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAttempt {
    pub model: String,
    pub error: String,
}

/// `model: error` pairs joined for the aggregate exhaustion message.
#[must_use]
pub fn summarize(attempts: &[FailedAttempt]) -> String {
    attempts
        .iter()
        .map(|attempt| format!("{}: {}", attempt.model, attempt.error))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Sweep progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepState {
    Pending,
    Trying(usize),
    Succeeded,
    Exhausted,
}

/// Drives one sequential sweep over a [`FallbackPlan`].
///
/// Each candidate is attempted at most once; the first success wins and
/// stops the loop. A sweep is single-use.
pub struct ModelSweep<'a, B: GenerativeBackend> {
    backend: &'a B,
    plan: &'a FallbackPlan,
    state: SweepState,
    failures: Vec<FailedAttempt>,
}

impl<'a, B: GenerativeBackend> ModelSweep<'a, B> {
    pub fn new(backend: &'a B, plan: &'a FallbackPlan) -> Self {
        Self {
            backend,
            plan,
            state: SweepState::Pending,
            failures: Vec::new(),
        }
    }

    /// Current position in the sweep.
    #[must_use]
    pub fn state(&self) -> SweepState {
        self.state
    }

    /// Candidates that have failed so far, in attempt order.
    #[must_use]
    pub fn failures(&self) -> &[FailedAttempt] {
        &self.failures
    }

    /// Try each candidate in order until one returns text.
    ///
    /// Failures below exhaustion are absorbed here: each one is recorded
    /// and logged as a warning, then the next candidate is tried. Only
    /// total exhaustion surfaces to the caller.
    pub async fn run(&mut self, request: &AnalysisRequest) -> LlmResult<String> {
        if self.state != SweepState::Pending {
            return Err(LlmError::Config(
                "model sweep already consumed".to_string(),
            ));
        }

        for (index, model) in self.plan.models().iter().enumerate() {
            self.state = SweepState::Trying(index);
            match self.backend.generate(model, request).await {
                Ok(text) => {
                    self.state = SweepState::Succeeded;
                    return Ok(text);
                }
                Err(err) => {
                    warn!("model candidate {model} failed: {err}");
                    self.failures.push(FailedAttempt {
                        model: model.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }

        self.state = SweepState::Exhausted;
        Err(LlmError::Exhausted {
            attempts: self.failures.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Backend that replays a scripted sequence of outcomes.
    struct ScriptedBackend {
        outcomes: Mutex<VecDeque<Result<String, String>>>,
        calls: AtomicUsize,
    }

    impl ScriptedBackend {
        fn new(outcomes: Vec<Result<String, String>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GenerativeBackend for ScriptedBackend {
        async fn generate(&self, _model: &str, _request: &AnalysisRequest) -> LlmResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.outcomes.lock().unwrap().pop_front() {
                Some(Ok(text)) => Ok(text),
                Some(Err(message)) => Err(LlmError::Api {
                    status: 500,
                    message,
                }),
                None => panic!("backend called more times than scripted"),
            }
        }
    }

    fn request() -> AnalysisRequest {
        AnalysisRequest {
            prompt: "analyze".to_string(),
            response_schema: json!({}),
        }
    }

    fn plan(models: &[&str]) -> FallbackPlan {
        FallbackPlan::new(models.iter().map(ToString::to_string).collect()).unwrap()
    }

    #[tokio::test]
    async fn first_success_wins_and_stops_the_loop() {
        let backend = ScriptedBackend::new(vec![Ok("text".to_string())]);
        let plan = plan(&["a", "b", "c"]);
        let mut sweep = ModelSweep::new(&backend, &plan);

        let text = sweep.run(&request()).await.unwrap();

        assert_eq!(text, "text");
        assert_eq!(backend.calls(), 1);
        assert!(sweep.failures().is_empty());
        assert_eq!(sweep.state(), SweepState::Succeeded);
    }

    #[tokio::test]
    async fn two_failures_then_success_records_exactly_two_attempts() {
        let backend = ScriptedBackend::new(vec![
            Err("quota".to_string()),
            Err("renamed".to_string()),
            Ok("from c".to_string()),
        ]);
        let plan = plan(&["a", "b", "c"]);
        let mut sweep = ModelSweep::new(&backend, &plan);

        let text = sweep.run(&request()).await.unwrap();

        assert_eq!(text, "from c");
        assert_eq!(backend.calls(), 3);
        assert_eq!(sweep.failures().len(), 2);
        assert_eq!(sweep.failures()[0].model, "a");
        assert_eq!(sweep.failures()[1].model, "b");
        assert_eq!(sweep.state(), SweepState::Succeeded);
    }

    #[tokio::test]
    async fn exhaustion_raises_one_aggregate_error_and_no_more_calls() {
        let backend = ScriptedBackend::new(vec![
            Err("down".to_string()),
            Err("down".to_string()),
            Err("down".to_string()),
        ]);
        let plan = plan(&["a", "b", "c"]);
        let mut sweep = ModelSweep::new(&backend, &plan);

        let err = sweep.run(&request()).await.unwrap_err();

        assert_eq!(backend.calls(), 3);
        assert_eq!(sweep.state(), SweepState::Exhausted);
        match err {
            LlmError::Exhausted { attempts } => {
                assert_eq!(attempts.len(), 3);
                assert_eq!(attempts[2].model, "c");
            }
            other => panic!("expected Exhausted, got {other}"),
        }
    }

    #[tokio::test]
    async fn empty_response_counts_as_an_attempt_failure() {
        struct EmptyThenOk {
            calls: AtomicUsize,
        }

        #[async_trait]
        impl GenerativeBackend for EmptyThenOk {
            async fn generate(
                &self,
                _model: &str,
                _request: &AnalysisRequest,
            ) -> LlmResult<String> {
                if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(LlmError::EmptyResponse)
                } else {
                    Ok("late text".to_string())
                }
            }
        }

        let backend = EmptyThenOk {
            calls: AtomicUsize::new(0),
        };
        let plan = plan(&["a", "b"]);
        let mut sweep = ModelSweep::new(&backend, &plan);

        let text = sweep.run(&request()).await.unwrap();
        assert_eq!(text, "late text");
        assert_eq!(sweep.failures()[0].error, "AI failed to generate content");
    }

    #[tokio::test]
    async fn a_sweep_is_single_use() {
        let backend = ScriptedBackend::new(vec![Ok("text".to_string())]);
        let plan = plan(&["a"]);
        let mut sweep = ModelSweep::new(&backend, &plan);

        sweep.run(&request()).await.unwrap();
        let err = sweep.run(&request()).await.unwrap_err();

        assert!(matches!(err, LlmError::Config(_)));
        assert_eq!(backend.calls(), 1);
    }

    #[test]
    fn empty_plan_is_rejected() {
        assert!(FallbackPlan::new(Vec::new()).is_err());
    }

    #[test]
    fn default_plan_matches_the_published_order() {
        let plan = FallbackPlan::default();
        assert_eq!(plan.models(), DEFAULT_MODEL_FALLBACK);
    }

    #[test]
    fn exhaustion_message_names_every_candidate() {
        let err = LlmError::Exhausted {
            attempts: vec![
                FailedAttempt {
                    model: "a".to_string(),
                    error: "quota".to_string(),
                },
                FailedAttempt {
                    model: "b".to_string(),
                    error: "gone".to_string(),
                },
            ],
        };
        let message = err.to_string();
        assert!(message.contains("all 2 candidate models failed"));
        assert!(message.contains("a: quota"));
        assert!(message.contains("b: gone"));
    }
}
