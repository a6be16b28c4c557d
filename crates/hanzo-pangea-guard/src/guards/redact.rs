//! Redact guard

use crate::audit::AuditLogger;
use crate::config::{AuditConfig, ServiceGuardConfig};
use crate::credential::resolve_token;
use crate::error::{GuardError, GuardKind, Result};
use crate::tool::Tool;
use crate::types::GuardOutcome;
use async_trait::async_trait;
use hanzo_pangea::{Redact, RedactService};
use std::time::Instant;

/// Masks sensitive data in the input using Pangea Redact
///
/// The whole text is sent; the service's `redacted_text` is returned when
/// present, the input otherwise.
pub struct RedactGuard {
    service: Box<dyn RedactService>,
    audit: AuditLogger,
}

impl RedactGuard {
    pub const NAME: &'static str = "pangea-redact-guard-tool";
    pub const DESCRIPTION: &'static str =
        "This tool redacts sensitive information from prompts using the Pangea Redact service.";
    pub const TOKEN_ENV_KEY_NAME: &'static str = "PANGEA_REDACT_TOKEN";

    pub fn new(config: ServiceGuardConfig) -> Result<Self> {
        let ServiceGuardConfig {
            token,
            token_env_key_name,
            pangea,
            config_id,
            audit,
        } = config;

        let env_var = token_env_key_name.as_deref().unwrap_or(Self::TOKEN_ENV_KEY_NAME);
        let token = resolve_token(token, env_var)?;
        let service = Redact::new(token, &pangea, config_id)?;

        Ok(Self::with_service(service).with_audit(audit))
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ServiceGuardConfig::default())
    }

    pub fn with_service(service: impl RedactService + 'static) -> Self {
        Self {
            service: Box::new(service),
            audit: AuditLogger::default(),
        }
    }

    pub fn with_audit(mut self, config: AuditConfig) -> Self {
        self.audit = AuditLogger::new(config);
        self
    }

    pub async fn check(&self, input_text: &str) -> Result<GuardOutcome> {
        let started = Instant::now();
        let result = self.decide(input_text).await;
        self.audit
            .record(Self::NAME, input_text, 0, started, &result)
            .await;
        result
    }

    async fn decide(&self, input_text: &str) -> Result<GuardOutcome> {
        let response = self.service.redact(input_text).await?;
        let result = response.result.ok_or(GuardError::InvalidResult {
            guard: GuardKind::Redact,
        })?;

        Ok(match result.redacted_text {
            Some(text) if !text.is_empty() => GuardOutcome::Redacted(text),
            _ => GuardOutcome::Clean(input_text.to_string()),
        })
    }
}

#[async_trait]
impl Tool for RedactGuard {
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
