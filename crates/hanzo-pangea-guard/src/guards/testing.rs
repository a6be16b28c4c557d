//! In-memory service doubles for guard tests

use async_trait::async_trait;
use hanzo_pangea::{
    AiGuardService, Message, PangeaResponse, PromptGuardResult, PromptGuardService, RedactResult,
    RedactService, ReputationData, ReputationResult, ReputationService, Result, TextGuardResult,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub(crate) fn envelope<T>(result: Option<T>) -> PangeaResponse<T> {
    PangeaResponse {
        request_id: Some("prq_test".to_string()),
        request_time: None,
        response_time: None,
        status: "Success".to_string(),
        summary: Some("ok".to_string()),
        result,
    }
}

/// Call counter that outlives the boxed service
#[derive(Clone, Default)]
pub(crate) struct Calls(Arc<AtomicUsize>);

impl Calls {
    pub(crate) fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Reputation double returning fixed scores
pub(crate) struct FakeReputation {
    scores: Vec<(String, i64)>,
    missing_result: bool,
    calls: Calls,
    seen: Arc<Mutex<Vec<Vec<String>>>>,
}

impl FakeReputation {
    pub(crate) fn with_scores(scores: &[(&str, i64)]) -> Self {
        Self {
            scores: scores.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            missing_result: false,
            calls: Calls::default(),
            seen: Arc::default(),
        }
    }

    pub(crate) fn missing_result() -> Self {
        Self {
            missing_result: true,
            ..Self::with_scores(&[])
        }
    }

    pub(crate) fn calls(&self) -> Calls {
        self.calls.clone()
    }

    pub(crate) fn seen(&self) -> Arc<Mutex<Vec<Vec<String>>>> {
        self.seen.clone()
    }
}

#[async_trait]
impl ReputationService for FakeReputation {
    fn service_name(&self) -> &str {
        "fake-intel"
    }

    async fn reputation_bulk(
        &self,
        indicators: &[String],
    ) -> Result<PangeaResponse<ReputationResult>> {
        self.calls.hit();
        self.seen.lock().unwrap().push(indicators.to_vec());

        if self.missing_result {
            return Ok(envelope(None));
        }

        let data = self
            .scores
            .iter()
            .map(|(indicator, score)| {
                (
                    indicator.clone(),
                    ReputationData {
                        score: *score,
                        verdict: None,
                        category: None,
                    },
                )
            })
            .collect();
        Ok(envelope(Some(ReputationResult { data })))
    }
}

/// Redact double
pub(crate) struct FakeRedact {
    pub(crate) result: Option<RedactResult>,
    pub(crate) calls: Calls,
}

#[async_trait]
impl RedactService for FakeRedact {
    async fn redact(&self, _text: &str) -> Result<PangeaResponse<RedactResult>> {
        self.calls.hit();
        Ok(envelope(self.result.clone()))
    }
}

/// Prompt Guard double
pub(crate) struct FakePromptGuard {
    pub(crate) result: Option<PromptGuardResult>,
    pub(crate) calls: Calls,
    pub(crate) seen: Arc<Mutex<Vec<Message>>>,
}

#[async_trait]
impl PromptGuardService for FakePromptGuard {
    async fn guard(&self, messages: &[Message]) -> Result<PangeaResponse<PromptGuardResult>> {
        self.calls.hit();
        self.seen.lock().unwrap().extend_from_slice(messages);
        Ok(envelope(self.result.clone()))
    }
}

/// AI Guard double
pub(crate) struct FakeAiGuard {
    pub(crate) result: Option<TextGuardResult>,
    pub(crate) calls: Calls,
    pub(crate) recipes: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl AiGuardService for FakeAiGuard {
    async fn guard_text(
        &self,
        _text: &str,
        recipe: &str,
    ) -> Result<PangeaResponse<TextGuardResult>> {
        self.calls.hit();
        self.recipes.lock().unwrap().push(recipe.to_string());
        Ok(envelope(self.result.clone()))
    }
}
