//! Error types for the guard tools

use hanzo_pangea::PangeaError;
use thiserror::Error;

/// Result type alias for guard operations
pub type Result<T> = std::result::Result<T, GuardError>;

/// Guard error types
#[derive(Debug, Error)]
pub enum GuardError {
    /// No usable token was passed or found in the environment
    #[error("'{env_var}' must be set or passed")]
    MissingToken { env_var: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The Pangea call itself failed
    #[error(transparent)]
    Service(#[from] PangeaError),

    /// The call succeeded but carried no result payload
    #[error("{guard}: result is invalid or missing")]
    InvalidResult { guard: GuardKind },

    /// URL Intel scored at least one URL at or above the threshold
    #[error("Malicious URLs found in the provided input.")]
    MaliciousUrls,

    /// Prompt Guard flagged the input as an injection
    #[error("Malicious prompt detected.")]
    MaliciousPrompt,

    /// Tool arguments were not valid JSON
    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(#[from] serde_json::Error),

    /// Config file could not be parsed
    #[error("Config file error: {0}")]
    ConfigFile(#[from] toml::de::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The guard tools shipped in this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GuardKind {
    DomainIntel,
    IpIntel,
    UrlIntel,
    Redact,
    PromptGuard,
    AiGuard,
}

impl GuardKind {
    /// Every guard, in CLI listing order
    pub const ALL: [GuardKind; 6] = [
        GuardKind::DomainIntel,
        GuardKind::IpIntel,
        GuardKind::UrlIntel,
        GuardKind::Redact,
        GuardKind::PromptGuard,
        GuardKind::AiGuard,
    ];

    /// Short identifier, e.g. `domain-intel`
    pub fn as_str(&self) -> &'static str {
        match self {
            GuardKind::DomainIntel => "domain-intel",
            GuardKind::IpIntel => "ip-intel",
            GuardKind::UrlIntel => "url-intel",
            GuardKind::Redact => "redact",
            GuardKind::PromptGuard => "prompt-guard",
            GuardKind::AiGuard => "ai-guard",
        }
    }
}

impl std::fmt::Display for GuardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuardKind::DomainIntel => write!(f, "Domain Intel guard"),
            GuardKind::IpIntel => write!(f, "IP Intel guard"),
            GuardKind::UrlIntel => write!(f, "URL Intel guard"),
            GuardKind::Redact => write!(f, "Redact guard"),
            GuardKind::PromptGuard => write!(f, "Prompt Guard"),
            GuardKind::AiGuard => write!(f, "AI Guard"),
        }
    }
}

impl std::str::FromStr for GuardKind {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self> {
        GuardKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| GuardError::Config(format!("unknown guard: {}", s)))
    }
}
