//! Prompt Guard tool

use crate::audit::AuditLogger;
use crate::config::{AuditConfig, ServiceGuardConfig};
use crate::credential::resolve_token;
use crate::error::{GuardError, GuardKind, Result};
use crate::tool::Tool;
use crate::types::GuardOutcome;
use async_trait::async_trait;
use hanzo_pangea::{Message, PromptGuard, PromptGuardService};
use std::time::Instant;

/// Rejects prompt injection attempts
///
/// The input goes to Pangea Prompt Guard as a single user message. A
/// detection fails the call with [`GuardError::MaliciousPrompt`].
pub struct PromptGuardTool {
    service: Box<dyn PromptGuardService>,
    audit: AuditLogger,
}

impl PromptGuardTool {
    pub const NAME: &'static str = "pangea-prompt-guard-tool";
    pub const DESCRIPTION: &'static str =
        "Uses Pangea's Prompt Guard service to defend against prompt injection.";
    pub const TOKEN_ENV_KEY_NAME: &'static str = "PANGEA_PROMPT_GUARD_TOKEN";

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
        let service = PromptGuard::new(token, &pangea, config_id)?;

        Ok(Self::with_service(service).with_audit(audit))
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ServiceGuardConfig::default())
    }

    pub fn with_service(service: impl PromptGuardService + 'static) -> Self {
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
        let messages = [Message::user(input_text)];
        let response = self.service.guard(&messages).await?;
        let result = response.result.ok_or(GuardError::InvalidResult {
            guard: GuardKind::PromptGuard,
        })?;

        if result.detected {
            tracing::debug!(
                kind = ?result.kind,
                analyzer = ?result.analyzer,
                confidence = ?result.confidence,
                "prompt injection detected"
            );
            return Err(GuardError::MaliciousPrompt);
        }
        Ok(GuardOutcome::Clean(input_text.to_string()))
    }
}

#[async_trait]
impl Tool for PromptGuardTool {
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
