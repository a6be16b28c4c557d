//! Configuration for the guard tools
//!
//! Each guard takes its own config struct. [`GuardsConfig`] is the TOML
//! file layout used by the CLI: a shared `[pangea]` and `[audit]` table plus
//! one optional section per guard. Tokens are never read from the file.

use crate::error::{GuardKind, Result};
use hanzo_pangea::{PangeaConfig, DEFAULT_RECIPE};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default score at or above which an indicator counts as malicious
pub const DEFAULT_THRESHOLD: u8 = 80;

/// Configuration for the reputation guards (Domain, IP and URL Intel)
#[derive(Debug, Clone)]
pub struct IntelGuardConfig {
    /// Explicit token; falls back to the environment when unset
    pub token: Option<SecretString>,
    /// Environment variable holding the token (each guard has its own default)
    pub token_env_key_name: Option<String>,
    /// Pangea connection settings
    pub pangea: PangeaConfig,
    /// Pangea service configuration id
    pub config_id: Option<String>,
    /// Block threshold, 0-100, inclusive
    pub threshold: u8,
    /// Audit logging
    pub audit: AuditConfig,
}

impl Default for IntelGuardConfig {
    fn default() -> Self {
        Self {
            token: None,
            token_env_key_name: None,
            pangea: PangeaConfig::default(),
            config_id: None,
            threshold: DEFAULT_THRESHOLD,
            audit: AuditConfig::default(),
        }
    }
}

impl IntelGuardConfig {
    /// Use an explicit token
    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    /// Read the token from a different environment variable
    pub fn with_token_env_key_name(mut self, name: impl Into<String>) -> Self {
        self.token_env_key_name = Some(name.into());
        self
    }

    /// Set Pangea connection settings
    pub fn with_pangea(mut self, pangea: PangeaConfig) -> Self {
        self.pangea = pangea;
        self
    }

    /// Send a service configuration id with each request
    pub fn with_config_id(mut self, config_id: impl Into<String>) -> Self {
        self.config_id = Some(config_id.into());
        self
    }

    /// Set the block threshold
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Configure audit logging
    pub fn with_audit(mut self, audit: AuditConfig) -> Self {
        self.audit = audit;
        self
    }
}

/// Configuration for the whole-text guards (Redact and Prompt Guard)
#[derive(Debug, Clone, Default)]
pub struct ServiceGuardConfig {
    /// Explicit token; falls back to the environment when unset
    pub token: Option<SecretString>,
    /// Environment variable holding the token
    pub token_env_key_name: Option<String>,
    /// Pangea connection settings
    pub pangea: PangeaConfig,
    /// Pangea service configuration id
    pub config_id: Option<String>,
    /// Audit logging
    pub audit: AuditConfig,
}

impl ServiceGuardConfig {
    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    pub fn with_token_env_key_name(mut self, name: impl Into<String>) -> Self {
        self.token_env_key_name = Some(name.into());
        self
    }

    pub fn with_pangea(mut self, pangea: PangeaConfig) -> Self {
        self.pangea = pangea;
        self
    }

    pub fn with_config_id(mut self, config_id: impl Into<String>) -> Self {
        self.config_id = Some(config_id.into());
        self
    }

    pub fn with_audit(mut self, audit: AuditConfig) -> Self {
        self.audit = audit;
        self
    }
}

/// Configuration for the AI Guard tool
#[derive(Debug, Clone)]
pub struct AiGuardConfig {
    /// Explicit token; falls back to the environment when unset
    pub token: Option<SecretString>,
    /// Environment variable holding the token
    pub token_env_key_name: Option<String>,
    /// Pangea connection settings
    pub pangea: PangeaConfig,
    /// Pangea service configuration id
    pub config_id: Option<String>,
    /// AI Guard recipe
    pub recipe: String,
    /// Audit logging
    pub audit: AuditConfig,
}

impl Default for AiGuardConfig {
    fn default() -> Self {
        Self {
            token: None,
            token_env_key_name: None,
            pangea: PangeaConfig::default(),
            config_id: None,
            recipe: DEFAULT_RECIPE.to_string(),
            audit: AuditConfig::default(),
        }
    }
}

impl AiGuardConfig {
    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    pub fn with_token_env_key_name(mut self, name: impl Into<String>) -> Self {
        self.token_env_key_name = Some(name.into());
        self
    }

    pub fn with_pangea(mut self, pangea: PangeaConfig) -> Self {
        self.pangea = pangea;
        self
    }

    pub fn with_config_id(mut self, config_id: impl Into<String>) -> Self {
        self.config_id = Some(config_id.into());
        self
    }

    pub fn with_recipe(mut self, recipe: impl Into<String>) -> Self {
        self.recipe = recipe.into();
        self
    }

    pub fn with_audit(mut self, audit: AuditConfig) -> Self {
        self.audit = audit;
        self
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Enable audit logging
    pub enabled: bool,
    /// Log full content (vs. just hashes)
    pub log_content: bool,
    /// Append JSON lines to this file
    pub log_file: Option<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_content: false,
            log_file: None,
        }
    }
}

impl AuditConfig {
    /// Audit logging switched off
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

/// Per-guard overrides in a [`GuardsConfig`] file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardSection {
    pub token_env_key_name: Option<String>,
    pub config_id: Option<String>,
    /// Reputation guards only
    pub threshold: Option<u8>,
    /// AI Guard only
    pub recipe: Option<String>,
}

/// Command-line overrides layered on top of a [`GuardsConfig`]
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub domain: Option<String>,
    pub threshold: Option<u8>,
    pub recipe: Option<String>,
    pub config_id: Option<String>,
}

/// Settings for every guard, as loaded from a TOML file
///
/// ```toml
/// [pangea]
/// domain = "aws.us.pangea.cloud"
///
/// [domain_intel]
/// threshold = 70
///
/// [ai_guard]
/// recipe = "pangea_llm_response_guard"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardsConfig {
    pub pangea: PangeaConfig,
    pub audit: AuditConfig,
    pub domain_intel: GuardSection,
    pub ip_intel: GuardSection,
    pub url_intel: GuardSection,
    pub redact: GuardSection,
    pub prompt_guard: GuardSection,
    pub ai_guard: GuardSection,
}

impl GuardsConfig {
    /// Parse from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// The section for a guard
    pub fn section(&self, kind: GuardKind) -> &GuardSection {
        match kind {
            GuardKind::DomainIntel => &self.domain_intel,
            GuardKind::IpIntel => &self.ip_intel,
            GuardKind::UrlIntel => &self.url_intel,
            GuardKind::Redact => &self.redact,
            GuardKind::PromptGuard => &self.prompt_guard,
            GuardKind::AiGuard => &self.ai_guard,
        }
    }

    /// Mutable section for a guard
    pub fn section_mut(&mut self, kind: GuardKind) -> &mut GuardSection {
        match kind {
            GuardKind::DomainIntel => &mut self.domain_intel,
            GuardKind::IpIntel => &mut self.ip_intel,
            GuardKind::UrlIntel => &mut self.url_intel,
            GuardKind::Redact => &mut self.redact,
            GuardKind::PromptGuard => &mut self.prompt_guard,
            GuardKind::AiGuard => &mut self.ai_guard,
        }
    }

    /// Config for a reputation guard
    pub fn intel_config(&self, kind: GuardKind) -> IntelGuardConfig {
        let section = self.section(kind);
        IntelGuardConfig {
            token: None,
            token_env_key_name: section.token_env_key_name.clone(),
            pangea: self.pangea.clone(),
            config_id: section.config_id.clone(),
            threshold: section.threshold.unwrap_or(DEFAULT_THRESHOLD),
            audit: self.audit.clone(),
        }
    }

    /// Config for the Redact or Prompt Guard tool
    pub fn service_config(&self, kind: GuardKind) -> ServiceGuardConfig {
        let section = self.section(kind);
        ServiceGuardConfig {
            token: None,
            token_env_key_name: section.token_env_key_name.clone(),
            pangea: self.pangea.clone(),
            config_id: section.config_id.clone(),
            audit: self.audit.clone(),
        }
    }

    /// Config for the AI Guard tool
    pub fn ai_guard_config(&self) -> AiGuardConfig {
        let section = &self.ai_guard;
        AiGuardConfig {
            token: None,
            token_env_key_name: section.token_env_key_name.clone(),
            pangea: self.pangea.clone(),
            config_id: section.config_id.clone(),
            recipe: section
                .recipe
                .clone()
                .unwrap_or_else(|| DEFAULT_RECIPE.to_string()),
            audit: self.audit.clone(),
        }
    }

    /// Apply overrides; per-guard values land in `kind`'s section only
    pub fn apply_overrides(&mut self, kind: GuardKind, overrides: Overrides) {
        let Overrides {
            domain,
            threshold,
            recipe,
            config_id,
        } = overrides;

        if let Some(domain) = domain {
            self.pangea.domain = domain;
        }

        let section = self.section_mut(kind);
        if threshold.is_some() {
            section.threshold = threshold;
        }
        if recipe.is_some() {
            section.recipe = recipe;
        }
        if config_id.is_some() {
            section.config_id = config_id;
        }
    }
}
