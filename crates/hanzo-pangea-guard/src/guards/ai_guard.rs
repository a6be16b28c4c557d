//! AI Guard tool

use crate::audit::AuditLogger;
use crate::config::{AiGuardConfig, AuditConfig};
use crate::credential::resolve_token;
use crate::error::{GuardError, GuardKind, Result};
use crate::tool::Tool;
use crate::types::GuardOutcome;
use async_trait::async_trait;
use hanzo_pangea::{AiGuard, AiGuardService, DEFAULT_RECIPE};
use std::time::Instant;

/// Sanitizes text with Pangea AI Guard
///
/// The input is guarded under the configured recipe. A non-empty
/// `redacted_prompt` replaces the input; otherwise the input is returned
/// as is.
///
/// ```no_run
/// use hanzo_pangea_guard::{AiGuardConfig, AiGuardTool, Tool};
///
/// # async fn run() -> hanzo_pangea_guard::Result<()> {
/// let guard = AiGuardTool::new(
///     AiGuardConfig::default().with_recipe("pangea_llm_response_guard"),
/// )?;
/// let safe = guard.run("My card is 4111 1111 1111 1111").await?;
/// # Ok(())
/// # }
/// ```
pub struct AiGuardTool {
    service: Box<dyn AiGuardService>,
    recipe: String,
    audit: AuditLogger,
}

impl AiGuardTool {
    pub const NAME: &'static str = "pangea-ai-guard-tool";
    pub const DESCRIPTION: &'static str =
        "Identifies and redacts PII and prompt injection using the Pangea AI Guard service.";
    pub const TOKEN_ENV_KEY_NAME: &'static str = "PANGEA_AI_GUARD_TOKEN";

    /// Build the tool, resolving the token before any client is created
    pub fn new(config: AiGuardConfig) -> Result<Self> {
        let AiGuardConfig {
            token,
            token_env_key_name,
            pangea,
            config_id,
            recipe,
            audit,
        } = config;

        let env_var = token_env_key_name.as_deref().unwrap_or(Self::TOKEN_ENV_KEY_NAME);
        let token = resolve_token(token, env_var)?;
        let service = AiGuard::new(token, &pangea, config_id)?;

        Ok(Self::with_service(service)
            .with_recipe(recipe)
            .with_audit(audit))
    }

    pub fn from_env() -> Result<Self> {
        Self::new(AiGuardConfig::default())
    }

    /// Build around any AI Guard service, using the default recipe
    pub fn with_service(service: impl AiGuardService + 'static) -> Self {
        Self {
            service: Box::new(service),
            recipe: DEFAULT_RECIPE.to_string(),
            audit: AuditLogger::default(),
        }
    }

    pub fn with_recipe(mut self, recipe: impl Into<String>) -> Self {
        self.recipe = recipe.into();
        self
    }

    pub fn with_audit(mut self, config: AuditConfig) -> Self {
        self.audit = AuditLogger::new(config);
        self
    }

    pub fn recipe(&self) -> &str {
        &self.recipe
    }

    /// Guard `input_text`
    pub async fn check(&self, input_text: &str) -> Result<GuardOutcome> {
        let started = Instant::now();
        let result = self.decide(input_text).await;
        self.audit
            .record(Self::NAME, input_text, 0, started, &result)
            .await;
        result
    }

    async fn decide(&self, input_text: &str) -> Result<GuardOutcome> {
        let response = self.service.guard_text(input_text, &self.recipe).await?;
        let result = response.result.ok_or(GuardError::InvalidResult {
            guard: GuardKind::AiGuard,
        })?;

        Ok(match result.redacted_prompt {
            Some(text) if !text.is_empty() => GuardOutcome::Redacted(text),
            _ => GuardOutcome::Clean(input_text.to_string()),
        })
    }
}

#[async_trait]
impl Tool for AiGuardTool {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guards::testing::{Calls, FakeAiGuard};
    use hanzo_pangea::TextGuardResult;
    use std::sync::{Arc, Mutex};

    struct Harness {
        guard: AiGuardTool,
        calls: Calls,
        recipes: Arc<Mutex<Vec<String>>>,
    }

    fn harness(result: Option<TextGuardResult>) -> Harness {
        let calls = Calls::default();
        let recipes = Arc::new(Mutex::new(Vec::new()));
        let service = FakeAiGuard {
            result,
            calls: calls.clone(),
            recipes: recipes.clone(),
        };
        Harness {
            guard: AiGuardTool::with_service(service).with_audit(AuditConfig::disabled()),
            calls,
            recipes,
        }
    }

    #[tokio::test]
    async fn test_redacted_prompt_returned() {
        let h = harness(Some(TextGuardResult {
            redacted_prompt: Some("My SSN is <US_SSN>".to_string()),
            findings: None,
        }));

        let output = h.guard.run("My SSN is 234-56-7890").await.unwrap();

        assert_eq!(output, "My SSN is <US_SSN>");
        assert_eq!(h.calls.count(), 1);
        assert_eq!(h.recipes.lock().unwrap().as_slice(), &["pangea_prompt_guard"]);
    }

    #[tokio::test]
    async fn test_empty_redacted_prompt_returns_input() {
        let h = harness(Some(TextGuardResult {
            redacted_prompt: Some(String::new()),
            findings: None,
        }));
        let outcome = h.guard.check("hello").await.unwrap();
        assert_eq!(outcome, GuardOutcome::Clean("hello".to_string()));

        let h = harness(Some(TextGuardResult::default()));
        assert_eq!(h.guard.run("hello").await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_custom_recipe_sent() {
        let h = harness(Some(TextGuardResult::default()));
        let guard = h.guard.with_recipe("pangea_llm_response_guard");

        guard.run("hello").await.unwrap();

        assert_eq!(guard.recipe(), "pangea_llm_response_guard");
        assert_eq!(
            h.recipes.lock().unwrap().as_slice(),
            &["pangea_llm_response_guard"]
        );
    }

    #[tokio::test]
    async fn test_missing_result_is_invalid_result() {
        let h = harness(None);
        let err = h.guard.run("hello").await.unwrap_err();
        assert!(matches!(
            err,
            GuardError::InvalidResult {
                guard: GuardKind::AiGuard
            }
        ));
    }

    #[test]
    fn test_missing_token_names_variable() {
        let config = AiGuardConfig::default()
            .with_token_env_key_name("HANZO_PANGEA_GUARD_TEST_NO_AI_TOKEN");
        let err = AiGuardTool::new(config).err().unwrap();
        assert_eq!(
            err.to_string(),
            "'HANZO_PANGEA_GUARD_TEST_NO_AI_TOKEN' must be set or passed"
        );
    }
}
