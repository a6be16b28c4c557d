//! Threshold check shared by the Domain, IP and URL Intel guards

use crate::error::{GuardError, GuardKind, Result};
use hanzo_pangea::ReputationService;
use tracing::debug;

/// A reputation service paired with a block threshold
pub(crate) struct ReputationCheck {
    kind: GuardKind,
    service: Box<dyn ReputationService>,
    threshold: u8,
}

impl ReputationCheck {
    pub(crate) fn new(
        kind: GuardKind,
        service: Box<dyn ReputationService>,
        threshold: u8,
    ) -> Result<Self> {
        if threshold > 100 {
            return Err(GuardError::Config(format!(
                "{} threshold must be between 0 and 100, got {}",
                kind, threshold
            )));
        }
        Ok(Self {
            kind,
            service,
            threshold,
        })
    }

    pub(crate) fn threshold(&self) -> u8 {
        self.threshold
    }

    /// One bulk lookup; true if any returned score reaches the threshold
    pub(crate) async fn any_malicious(&self, indicators: &[String]) -> Result<bool> {
        debug!(
            service = self.service.service_name(),
            indicators = indicators.len(),
            "reputation lookup"
        );
        let response = self.service.reputation_bulk(indicators).await?;
        let result = response
            .result
            .ok_or(GuardError::InvalidResult { guard: self.kind })?;

        let threshold = i64::from(self.threshold);
        Ok(result.data.values().any(|data| data.score >= threshold))
    }
}
