//! Reputation services: Domain Intel, IP Intel and URL Intel
//!
//! All three expose the same bulk reputation call and return a map of
//! indicator to verdict, so they share [`ReputationService`].

use crate::client::PangeaClient;
use crate::config::PangeaConfig;
use crate::error::Result;
use crate::response::PangeaResponse;
use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;

const REPUTATION_PATH: &str = "v2/reputation";

/// Verdict for one indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReputationData {
    /// Maliciousness score, 0-100
    pub score: i64,
    /// Provider verdict, e.g. `malicious` or `benign`
    #[serde(default)]
    pub verdict: Option<String>,
    /// Provider categories
    #[serde(default)]
    pub category: Option<Vec<String>>,
}

/// Result of a bulk reputation lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReputationResult {
    /// Indicator to verdict
    #[serde(default)]
    pub data: HashMap<String, ReputationData>,
}

impl ReputationResult {
    /// Highest score in the result
    pub fn max_score(&self) -> Option<i64> {
        self.data.values().map(|d| d.score).max()
    }
}

/// Bulk reputation lookup
#[async_trait]
pub trait ReputationService: Send + Sync {
    /// Pangea service name, e.g. `domain-intel`
    fn service_name(&self) -> &str;

    /// Look up every indicator in one request
    async fn reputation_bulk(
        &self,
        indicators: &[String],
    ) -> Result<PangeaResponse<ReputationResult>>;
}

/// Domain Intel client
#[derive(Debug)]
pub struct DomainIntel {
    client: PangeaClient,
}

impl DomainIntel {
    pub const SERVICE_NAME: &'static str = "domain-intel";

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
impl ReputationService for DomainIntel {
    fn service_name(&self) -> &str {
        self.client.service_name()
    }

    async fn reputation_bulk(
        &self,
        indicators: &[String],
    ) -> Result<PangeaResponse<ReputationResult>> {
        self.client
            .post(REPUTATION_PATH, &json!({ "domains": indicators }))
            .await
    }
}

/// IP Intel client
#[derive(Debug)]
pub struct IpIntel {
    client: PangeaClient,
}

impl IpIntel {
    pub const SERVICE_NAME: &'static str = "ip-intel";

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
impl ReputationService for IpIntel {
    fn service_name(&self) -> &str {
        self.client.service_name()
    }

    async fn reputation_bulk(
        &self,
        indicators: &[String],
    ) -> Result<PangeaResponse<ReputationResult>> {
        self.client
            .post(REPUTATION_PATH, &json!({ "ips": indicators }))
            .await
    }
}

/// URL Intel client
#[derive(Debug)]
pub struct UrlIntel {
    client: PangeaClient,
}

impl UrlIntel {
    pub const SERVICE_NAME: &'static str = "url-intel";

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
impl ReputationService for UrlIntel {
    fn service_name(&self) -> &str {
        self.client.service_name()
    }

    async fn reputation_bulk(
        &self,
        indicators: &[String],
    ) -> Result<PangeaResponse<ReputationResult>> {
        self.client
            .post(REPUTATION_PATH, &json!({ "urls": indicators }))
            .await
    }
}
