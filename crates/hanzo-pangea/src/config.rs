//! Client configuration

use crate::error::{PangeaError, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Default Pangea cluster domain
pub const DEFAULT_DOMAIN: &str = "aws.us.pangea.cloud";

/// How service URLs are derived from the configured domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// `{scheme}://{service}.{domain}/`
    #[default]
    Production,
    /// `{scheme}://{domain}/`, every service behind one host
    Local,
}

/// Connection settings shared by every Pangea service client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PangeaConfig {
    /// Cluster domain, e.g. `aws.us.pangea.cloud`
    pub domain: String,
    /// URL layout
    pub environment: Environment,
    /// Use plain HTTP instead of HTTPS
    pub insecure: bool,
    /// Per-request timeout in milliseconds (no timeout when unset)
    pub timeout_ms: Option<u64>,
    /// Appended to the default `User-Agent`
    pub custom_user_agent: Option<String>,
}

impl Default for PangeaConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
            environment: Environment::Production,
            insecure: false,
            timeout_ms: None,
            custom_user_agent: None,
        }
    }
}

impl PangeaConfig {
    /// Create a config for the given cluster domain
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Default::default()
        }
    }

    /// Set the URL layout
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Use plain HTTP
    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Set a per-request timeout
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Append a product token to the `User-Agent` header
    pub fn with_custom_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.custom_user_agent = Some(user_agent.into());
        self
    }

    /// Base URL for a service, always ending in `/` so relative paths join under it
    pub fn base_url(&self, service: &str) -> Result<Url> {
        let domain = self.domain.trim().trim_end_matches('/');
        if domain.is_empty() {
            return Err(PangeaError::Config("domain must not be empty".to_string()));
        }

        let scheme = if self.insecure { "http" } else { "https" };
        let raw = match self.environment {
            Environment::Production => format!("{}://{}.{}/", scheme, service, domain),
            Environment::Local => format!("{}://{}/", scheme, domain),
        };

        Url::parse(&raw).map_err(|e| PangeaError::InvalidUrl(format!("{}: {}", raw, e)))
    }
}
