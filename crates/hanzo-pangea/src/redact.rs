//! Redact service

use crate::client::PangeaClient;
use crate::config::PangeaConfig;
use crate::error::Result;
use crate::response::PangeaResponse;
use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Result of a text redaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RedactResult {
    /// Text with sensitive values replaced; absent when nothing was redacted
    #[serde(default)]
    pub redacted_text: Option<String>,
    /// Number of redactions applied
    #[serde(default)]
    pub count: u64,
}

/// Text redaction
#[async_trait]
pub trait RedactService: Send + Sync {
    async fn redact(&self, text: &str) -> Result<PangeaResponse<RedactResult>>;
}

/// Redact client
#[derive(Debug)]
pub struct Redact {
    client: PangeaClient,
}

impl Redact {
    pub const SERVICE_NAME: &'static str = "redact";

    pub fn new(
        token: SecretString,
        config: &PangeaConfig,
        config_id: Option<String>,
    ) -> Result<Self> {
        Ok(Self {
            client: PangeaClient::new(Self::SERVICE_NAME, token, config, config_id)?,
        })
    }
}

#[async_trait]
impl RedactService for Redact {
    async fn redact(&self, text: &str) -> Result<PangeaResponse<RedactResult>> {
        self.client.post("v1/redact", &json!({ "text": text })).await
    }
}
