//! The response envelope shared by all Pangea services

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `status` value of a successful call
pub const STATUS_SUCCESS: &str = "Success";

/// Pangea response envelope
///
/// Every service wraps its payload the same way; `result` is absent or
/// `null` when the call produced nothing usable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PangeaResponse<T> {
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub request_time: Option<String>,
    #[serde(default)]
    pub response_time: Option<String>,
    pub status: String,
    #[serde(default)]
    pub summary: Option<String>,
    pub result: Option<T>,
}

impl<T> PangeaResponse<T> {
    /// Whether the service reported success
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

impl PangeaResponse<Value> {
    /// Decode the untyped `result` into the service's result type
    pub(crate) fn decode<R: DeserializeOwned>(self) -> Result<PangeaResponse<R>> {
        let result = match self.result {
            None | Some(Value::Null) => None,
            Some(value) => Some(serde_json::from_value(value)?),
        };

        Ok(PangeaResponse {
            request_id: self.request_id,
            request_time: self.request_time,
            response_time: self.response_time,
            status: self.status,
            summary: self.summary,
            result,
        })
    }
}
