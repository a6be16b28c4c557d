//! AI Guard service (beta): recipe-driven text sanitization

use crate::client::PangeaClient;
use crate::config::PangeaConfig;
use crate::error::Result;
use crate::response::PangeaResponse;
use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Recipe applied when none is configured
pub const DEFAULT_RECIPE: &str = "pangea_prompt_guard";

/// Result of guarding a piece of text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextGuardResult {
    /// Sanitized text; absent when the recipe changed nothing
    #[serde(default)]
    pub redacted_prompt: Option<String>,
    /// Per-detector findings, passed through untyped
    #[serde(default)]
    pub findings: Option<Value>,
}

/// Text sanitization under a named recipe
#[async_trait]
pub trait AiGuardService: Send + Sync {
    async fn guard_text(
        &self,
        text: &str,
        recipe: &str,
    ) -> Result<PangeaResponse<TextGuardResult>>;
}

/// AI Guard client
#[derive(Debug)]
pub struct AiGuard {
    client: PangeaClient,
}

impl AiGuard {
    pub const SERVICE_NAME: &'static str = "ai-guard";

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
impl AiGuardService for AiGuard {
    async fn guard_text(
        &self,
        text: &str,
        recipe: &str,
    ) -> Result<PangeaResponse<TextGuardResult>> {
        self.client
            .post("v1beta/text/guard", &json!({ "text": text, "recipe": recipe }))
            .await
    }
}
