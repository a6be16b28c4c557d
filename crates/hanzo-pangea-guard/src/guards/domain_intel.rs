//! Domain Intel guard

use super::reputation::ReputationCheck;
use crate::audit::AuditLogger;
use crate::config::{AuditConfig, IntelGuardConfig};
use crate::credential::resolve_token;
use crate::error::{GuardKind, Result};
use crate::extract::extract_domains;
use crate::tool::Tool;
use crate::types::GuardOutcome;
use async_trait::async_trait;
use hanzo_pangea::{DomainIntel, ReputationService};
use std::time::Instant;

/// Replaces input containing a malicious domain with a fixed warning
///
/// Domains are pulled out of the text with a loose pattern and scored in
/// one bulk call to Pangea Domain Intel. If any score reaches the
/// threshold the whole input is replaced by [`DomainIntelGuard::BLOCK_MESSAGE`];
/// otherwise it passes through untouched. Text with no domains never
/// reaches the service.
///
/// ```no_run
/// use hanzo_pangea_guard::{DomainIntelGuard, Tool};
///
/// # async fn run() -> hanzo_pangea_guard::Result<()> {
/// // Reads PANGEA_DOMAIN_INTEL_TOKEN
/// let guard = DomainIntelGuard::from_env()?;
/// let output = guard
///     .run("Leave us a feedback here: http://malware123.com/feedback")
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct DomainIntelGuard {
    check: ReputationCheck,
    audit: AuditLogger,
}

impl DomainIntelGuard {
    pub const NAME: &'static str = "pangea-domain-intel-guard-tool";
    pub const DESCRIPTION: &'static str =
        "Detects malicious domains in the input text using the Pangea Domain Intel service.";
    pub const TOKEN_ENV_KEY_NAME: &'static str = "PANGEA_DOMAIN_INTEL_TOKEN";
    pub const BLOCK_MESSAGE: &'static str = "Malicious domains found in the provided input.";

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
        let service = DomainIntel::new(token, &pangea, config_id)?;

        Ok(Self::with_service(service, threshold)?.with_audit(audit))
    }

    /// Build from the environment with default settings
    pub fn from_env() -> Result<Self> {
        Self::new(IntelGuardConfig::default())
    }

    /// Build around any reputation service
    pub fn with_service(service: impl ReputationService + 'static, threshold: u8) -> Result<Self> {
        Ok(Self {
            check: ReputationCheck::new(GuardKind::DomainIntel, Box::new(service), threshold)?,
            audit: AuditLogger::default(),
        })
    }

    /// Configure audit logging
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
        let domains = extract_domains(input_text);
        let result = self.decide(input_text, &domains).await;
        self.audit
            .record(Self::NAME, input_text, domains.len(), started, &result)
            .await;
        result
    }

    async fn decide(&self, input_text: &str, domains: &[String]) -> Result<GuardOutcome> {
        if domains.is_empty() {
            return Ok(GuardOutcome::Clean(input_text.to_string()));
        }

        if self.check.any_malicious(domains).await? {
            Ok(GuardOutcome::Blocked {
                message: Self::BLOCK_MESSAGE.to_string(),
            })
        } else {
            Ok(GuardOutcome::Clean(input_text.to_string()))
        }
    }
}

#[async_trait]
impl Tool for DomainIntelGuard {
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
