//! Audit logging for guard decisions

use crate::config::AuditConfig;
use crate::error::Result;
use crate::types::GuardOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Instant;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};
use uuid::Uuid;

/// One guard invocation, as recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique id for this invocation
    pub request_id: Uuid,
    /// When the decision was made
    pub timestamp: DateTime<Utc>,
    /// Tool name
    pub tool: String,
    /// Hash of the input text
    pub content_hash: String,
    /// Number of indicators extracted (0 for whole-text guards)
    pub indicators: usize,
    /// What happened
    pub result: AuditResult,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Result for audit logging (simplified)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditResult {
    Passed,
    Redacted,
    Blocked,
    Failed { error: String },
}

impl AuditResult {
    fn from_result(result: &Result<GuardOutcome>) -> Self {
        match result {
            Ok(GuardOutcome::Clean(_)) => AuditResult::Passed,
            Ok(GuardOutcome::Redacted(_)) => AuditResult::Redacted,
            Ok(GuardOutcome::Blocked { .. }) => AuditResult::Blocked,
            Err(e) => AuditResult::Failed {
                error: e.to_string(),
            },
        }
    }
}

/// Audit logger
#[derive(Debug, Clone, Default)]
pub struct AuditLogger {
    config: AuditConfig,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(config: AuditConfig) -> Self {
        Self { config }
    }

    /// Record a guard decision, returning the entry when logging is enabled
    pub async fn record(
        &self,
        tool: &str,
        content: &str,
        indicators: usize,
        started: Instant,
        result: &Result<GuardOutcome>,
    ) -> Option<AuditEntry> {
        if !self.config.enabled {
            return None;
        }

        let entry = AuditEntry {
            request_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            tool: tool.to_string(),
            content_hash: hash_content(content),
            indicators,
            result: AuditResult::from_result(result),
            processing_time_ms: started.elapsed().as_millis() as u64,
        };

        self.emit(&entry, content);
        if let Some(ref path) = self.config.log_file {
            if let Err(e) = append_json_line(path, &entry).await {
                warn!(path = %path, error = %e, "Failed to write audit log");
            }
        }
        Some(entry)
    }

    fn emit(&self, entry: &AuditEntry, content: &str) {
        let content_field = if self.config.log_content {
            Some(truncate(content, 500))
        } else {
            None
        };

        match entry.result {
            AuditResult::Blocked | AuditResult::Failed { .. } => warn!(
                request_id = %entry.request_id,
                tool = %entry.tool,
                content_hash = %entry.content_hash,
                indicators = entry.indicators,
                result = ?entry.result,
                processing_time_ms = entry.processing_time_ms,
                content = ?content_field,
                "Guard audit"
            ),
            _ => info!(
                request_id = %entry.request_id,
                tool = %entry.tool,
                content_hash = %entry.content_hash,
                indicators = entry.indicators,
                result = ?entry.result,
                processing_time_ms = entry.processing_time_ms,
                content = ?content_field,
                "Guard audit"
            ),
        }
    }
}

/// Append `entry` to `path` as one JSON line
async fn append_json_line(path: &str, entry: &AuditEntry) -> std::io::Result<()> {
    let mut line = serde_json::to_string(entry)?;
    line.push('\n');

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(line.as_bytes()).await?;
    file.flush().await
}

/// Hash content for audit (privacy-preserving)
fn hash_content(content: &str) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("{:x}", hasher.finish())
}

/// Truncate string for logging, on a char boundary
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
