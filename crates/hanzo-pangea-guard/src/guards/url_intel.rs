//! URL Intel guard

use super::reputation::ReputationCheck;
use crate::audit::AuditLogger;
use crate::config::{AuditConfig, IntelGuardConfig};
use crate::credential::resolve_token;
use crate::error::{GuardError, GuardKind, Result};
use crate::extract::extract_urls;
use crate::tool::Tool;
use crate::types::GuardOutcome;
use async_trait::async_trait;
use hanzo_pangea::{ReputationService, UrlIntel};
use std::time::Instant;

/// Rejects input containing a malicious URL
///
/// Unlike the domain and IP guards, a hit is an error
/// ([`GuardError::MaliciousUrls`]) rather than a replacement message, so
/// the agent run stops instead of carrying on with a warning string.
pub struct UrlIntelGuard {
    check: ReputationCheck,
    audit: AuditLogger,
}

impl UrlIntelGuard {
    pub const NAME: &'static str = "pangea-url-intel-guard-tool";
    pub const DESCRIPTION: &'static str =
        "This tool finds malicious urls in the input text using the Pangea URL Intel service.";
    pub const TOKEN_ENV_KEY_NAME: &'static str = "PANGEA_URL_INTEL_TOKEN";

    /// Build the guard, resolving the token before any client is created
    pub fn new(config: IntelGuardConfig) -> Result<Self> {
        let IntelGuardConfig {
            token,
            token_env_key_name,
            pangea,
            config_id,
            threshold,
            audit,
        } = config;

        let env_var = token_env_key_name.as_deref().unwrap_or(Self::TOKEN_ENV_KEY_NAME);
        let token = resolve_token(token, env_var)?;
        let service = UrlIntel::new(token, &pangea, config_id)?;

        Ok(Self::with_service(service, threshold)?.with_audit(audit))
    }

    pub fn from_env() -> Result<Self> {
        Self::new(IntelGuardConfig::default())
    }

    pub fn with_service(service: impl ReputationService + 'static, threshold: u8) -> Result<Self> {
        Ok(Self {
            check: ReputationCheck::new(GuardKind::UrlIntel, Box::new(service), threshold)?,
            audit: AuditLogger::default(),
        })
    }

    pub fn with_audit(mut self, config: AuditConfig) -> Self {
        self.audit = AuditLogger::new(config);
        self
    }

    pub fn threshold(&self) -> u8 {
        self.check.threshold()
    }

    /// Screen `input_text`
    pub async fn check(&self, input_text: &str) -> Result<GuardOutcome> {
        let started = Instant::now();
        let urls = extract_urls(input_text);
        let result = self.decide(input_text, &urls).await;
        self.audit
            .record(Self::NAME, input_text, urls.len(), started, &result)
            .await;
        result
    }

    async fn decide(&self, input_text: &str, urls: &[String]) -> Result<GuardOutcome> {
        if !urls.is_empty() && self.check.any_malicious(urls).await? {
            return Err(GuardError::MaliciousUrls);
        }
        Ok(GuardOutcome::Clean(input_text.to_string()))
    }
}

#[async_trait]
impl Tool for UrlIntelGuard {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        Self::DESCRIPTION
    }

    async fn run(&self, input_text: &str) -> Result<String> {
        Ok(self.check(input_text).await?.into_text())
    }
}
