//! The guard tools

mod ai_guard;
mod domain_intel;
mod ip_intel;
mod prompt_guard;
mod redact;
mod reputation;
mod url_intel;

#[cfg(test)]
pub(crate) mod testing;

pub use ai_guard::AiGuardTool;
pub use domain_intel::DomainIntelGuard;
pub use ip_intel::IpIntelGuard;
pub use prompt_guard::PromptGuardTool;
pub use redact::RedactGuard;
pub use url_intel::UrlIntelGuard;

use crate::config::GuardsConfig;
use crate::error::{GuardKind, Result};
use crate::tool::Tool;

/// Build one guard from a loaded config file
///
/// Tokens come from each guard's environment variable (or the override
/// named in its section).
pub fn build_tool(kind: GuardKind, config: &GuardsConfig) -> Result<Box<dyn Tool>> {
    Ok(match kind {
        GuardKind::DomainIntel => Box::new(DomainIntelGuard::new(config.intel_config(kind))?),
        GuardKind::IpIntel => Box::new(IpIntelGuard::new(config.intel_config(kind))?),
        GuardKind::UrlIntel => Box::new(UrlIntelGuard::new(config.intel_config(kind))?),
        GuardKind::Redact => Box::new(RedactGuard::new(config.service_config(kind))?),
        GuardKind::PromptGuard => Box::new(PromptGuardTool::new(config.service_config(kind))?),
        GuardKind::AiGuard => Box::new(AiGuardTool::new(config.ai_guard_config())?),
    })
}

/// Tool name for a guard kind
pub fn tool_name(kind: GuardKind) -> &'static str {
    match kind {
        GuardKind::DomainIntel => DomainIntelGuard::NAME,
        GuardKind::IpIntel => IpIntelGuard::NAME,
        GuardKind::UrlIntel => UrlIntelGuard::NAME,
        GuardKind::Redact => RedactGuard::NAME,
        GuardKind::PromptGuard => PromptGuardTool::NAME,
        GuardKind::AiGuard => AiGuardTool::NAME,
    }
}
