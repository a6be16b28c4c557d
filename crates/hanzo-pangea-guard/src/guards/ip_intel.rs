//! IP Intel guard

use super::reputation::ReputationCheck;
use crate::audit::AuditLogger;
use crate::config::{AuditConfig, IntelGuardConfig};
use crate::credential::resolve_token;
use crate::error::{GuardKind, Result};
use crate::extract::extract_ips;
use crate::tool::Tool;
use crate::types::GuardOutcome;
use async_trait::async_trait;
use hanzo_pangea::{IpIntel, ReputationService};
use std::time::Instant;

/// Replaces input containing a malicious IPv4 address with a fixed warning
///
/// Same flow as the domain guard: extract, one bulk lookup, any score at or
/// above the threshold blocks the whole input.
pub struct IpIntelGuard {
    check: ReputationCheck,
    audit: AuditLogger,
}

impl IpIntelGuard {
    pub const NAME: &'static str = "pangea-ip-intel-guard-tool";
    pub const DESCRIPTION: &'static str =
        "Detects malicious IP addresses in the input text using the Pangea IP Intel service.";
    pub const TOKEN_ENV_KEY_NAME: &'static str = "PANGEA_IP_INTEL_TOKEN";
    pub const BLOCK_MESSAGE: &'static str = "Malicious IPs found in the provided input.";

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
        let service = IpIntel::new(token, &pangea, config_id)?;

        Ok(Self::with_service(service, threshold)?.with_audit(audit))
    }

    pub fn from_env() -> Result<Self> {
        Self::new(IntelGuardConfig::default())
    }

    pub fn with_service(service: impl ReputationService + 'static, threshold: u8) -> Result<Self> {
        Ok(Self {
            check: ReputationCheck::new(GuardKind::IpIntel, Box::new(service), threshold)?,
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
        let ips = extract_ips(input_text);
        let result = self.decide(input_text, &ips).await;
        self.audit
            .record(Self::NAME, input_text, ips.len(), started, &result)
            .await;
        result
    }

    async fn decide(&self, input_text: &str, ips: &[String]) -> Result<GuardOutcome> {
        if ips.is_empty() {
            return Ok(GuardOutcome::Clean(input_text.to_string()));
        }

        if self.check.any_malicious(ips).await? {
            Ok(GuardOutcome::Blocked {
                message: Self::BLOCK_MESSAGE.to_string(),
            })
        } else {
            Ok(GuardOutcome::Clean(input_text.to_string()))
        }
    }
}

#[async_trait]
impl Tool for IpIntelGuard {
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
