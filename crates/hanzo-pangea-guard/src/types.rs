//! Core types for the guard tools

use serde::{Deserialize, Serialize};

/// What a guard decided for one input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuardOutcome {
    /// Input passed, returned verbatim
    Clean(String),

    /// The service returned a sanitized version of the input
    Redacted(String),

    /// Input replaced by a fixed warning
    Blocked {
        /// Message returned in place of the input
        message: String,
    },
}

impl GuardOutcome {
    /// The tool's textual output
    pub fn text(&self) -> &str {
        match self {
            GuardOutcome::Clean(text) => text,
            GuardOutcome::Redacted(text) => text,
            GuardOutcome::Blocked { message } => message,
        }
    }

    /// Consume the outcome, returning the tool's textual output
    pub fn into_text(self) -> String {
        match self {
            GuardOutcome::Clean(text) => text,
            GuardOutcome::Redacted(text) => text,
            GuardOutcome::Blocked { message } => message,
        }
    }

    /// Check if the input was blocked
    pub fn is_blocked(&self) -> bool {
        matches!(self, GuardOutcome::Blocked { .. })
    }

    /// Check if the input was modified
    pub fn is_modified(&self) -> bool {
        !matches!(self, GuardOutcome::Clean(_))
    }
}
