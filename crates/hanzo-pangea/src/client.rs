//! Authenticated transport shared by the service clients

use crate::config::PangeaConfig;
use crate::error::{PangeaError, Result};
use crate::response::PangeaResponse;
use reqwest::header::USER_AGENT;
use reqwest::{StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Longest response body kept in an `UnexpectedResponse` error
const MAX_ERROR_BODY: usize = 512;

/// Low-level client bound to one Pangea service
///
/// Posts JSON bodies with bearer auth, injects `config_id` when set, and
/// unwraps the response envelope. Typed service clients sit on top.
pub struct PangeaClient {
    http: reqwest::Client,
    base_url: Url,
    token: SecretString,
    config_id: Option<String>,
    user_agent: String,
    service_name: &'static str,
}

impl std::fmt::Debug for PangeaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PangeaClient")
            .field("service_name", &self.service_name)
            .field("base_url", &self.base_url.as_str())
            .field("config_id", &self.config_id)
            .finish_non_exhaustive()
    }
}

impl PangeaClient {
    /// Create a client for `service_name` (e.g. `domain-intel`)
    pub fn new(
        service_name: &'static str,
        token: SecretString,
        config: &PangeaConfig,
        config_id: Option<String>,
    ) -> Result<Self> {
        if token.expose_secret().is_empty() {
            return Err(PangeaError::Config(format!(
                "{} token must not be empty",
                service_name
            )));
        }

        let base_url = config.base_url(service_name)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let http = builder.build()?;

        let mut user_agent = format!("hanzo-pangea/{}", env!("CARGO_PKG_VERSION"));
        if let Some(ref extra) = config.custom_user_agent {
            user_agent.push(' ');
            user_agent.push_str(extra);
        }

        Ok(Self {
            http,
            base_url,
            token,
            config_id: config_id.filter(|id| !id.is_empty()),
            user_agent,
            service_name,
        })
    }

    /// Service this client talks to
    pub fn service_name(&self) -> &'static str {
        self.service_name
    }

    /// Configuration id sent with each request, if any
    pub fn config_id(&self) -> Option<&str> {
        self.config_id.as_deref()
    }

    /// POST `body` to `path` and decode the envelope's `result` as `R`
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<PangeaResponse<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| PangeaError::InvalidUrl(format!("{}{}: {}", self.base_url, path, e)))?;

        let mut payload = serde_json::to_value(body)?;
        if let (Some(config_id), Some(map)) = (&self.config_id, payload.as_object_mut()) {
            map.entry("config_id")
                .or_insert_with(|| Value::String(config_id.clone()));
        }

        debug!(service = self.service_name, url = %url, "Pangea request");

        let response = self
            .http
            .post(url)
            .bearer_auth(self.token.expose_secret())
            .header(USER_AGENT, &self.user_agent)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let envelope = serde_json::from_str::<PangeaResponse<Value>>(&text);

        if status == StatusCode::ACCEPTED {
            let request_id = envelope.ok().and_then(|e| e.request_id);
            return Err(PangeaError::Accepted { request_id });
        }

        let envelope = envelope.map_err(|_| PangeaError::UnexpectedResponse {
            status: status.as_u16(),
            body: truncate(&text, MAX_ERROR_BODY),
        })?;

        debug!(
            service = self.service_name,
            http_status = status.as_u16(),
            status = %envelope.status,
            request_id = ?envelope.request_id,
            "Pangea response"
        );

        if !envelope.is_success() {
            return Err(PangeaError::Api {
                status: envelope.status,
                summary: envelope.summary.unwrap_or_default(),
                request_id: envelope.request_id,
            });
        }

        envelope.decode()
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
