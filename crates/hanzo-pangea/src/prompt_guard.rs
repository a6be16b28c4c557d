//! Prompt Guard service (beta): prompt injection detection

use crate::client::PangeaClient;
use crate::config::PangeaConfig;
use crate::error::Result;
use crate::response::PangeaResponse;
use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// A chat message submitted for analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    /// A `user` role message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Prompt Guard verdict
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptGuardResult {
    /// Whether an injection was detected
    pub detected: bool,
    /// Injection type, e.g. `direct`
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Analyzer that flagged the prompt
    #[serde(default)]
    pub analyzer: Option<String>,
    /// Detection confidence, 0-100
    #[serde(default)]
    pub confidence: Option<i64>,
}

/// Prompt injection detection
#[async_trait]
pub trait PromptGuardService: Send + Sync {
    async fn guard(&self, messages: &[Message]) -> Result<PangeaResponse<PromptGuardResult>>;
}

/// Prompt Guard client
#[derive(Debug)]
pub struct PromptGuard {
    client: PangeaClient,
}

impl PromptGuard {
    pub const SERVICE_NAME: &'static str = "prompt-guard";

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
impl PromptGuardService for PromptGuard {
    async fn guard(&self, messages: &[Message]) -> Result<PangeaResponse<PromptGuardResult>> {
        self.client
            .post("v1beta/guard", &json!({ "messages": messages }))
            .await
    }
}
