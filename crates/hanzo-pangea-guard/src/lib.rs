//! # Hanzo Pangea Guard
//!
//! Agent tools that screen LLM input and output with Pangea security
//! services. Every tool takes one piece of text and returns one piece of
//! text:
//!
//! - **Domain / IP Intel**: extract indicators, score them in one bulk call,
//!   replace the input with a fixed warning if any score reaches the
//!   threshold (default 80)
//! - **URL Intel**: same extraction and scoring, but a hit is an error
//! - **Redact**: return Pangea's redacted text
//! - **Prompt Guard**: fail on detected prompt injection
//! - **AI Guard**: return the recipe's redacted prompt
//!
//! Text with no extractable indicators is returned unchanged without a
//! network call.
//!
//! ## Quick Start
//!
//! ```no_run
//! use hanzo_pangea_guard::{DomainIntelGuard, IntelGuardConfig, Tool};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Token from PANGEA_DOMAIN_INTEL_TOKEN
//!     let guard = DomainIntelGuard::new(IntelGuardConfig::default().with_threshold(70))?;
//!
//!     let output = guard
//!         .run("Leave us a feedback here: http://malware123.com/feedback")
//!         .await?;
//!     println!("{}", output);
//!
//!     Ok(())
//! }
//! ```

pub mod audit;
pub mod config;
pub mod credential;
pub mod error;
pub mod extract;
pub mod guards;
pub mod tool;
pub mod types;

pub use config::{
    AiGuardConfig, AuditConfig, GuardsConfig, IntelGuardConfig, Overrides, ServiceGuardConfig,
    DEFAULT_THRESHOLD,
};
pub use error::{GuardError, GuardKind, Result};
pub use guards::{
    build_tool, AiGuardTool, DomainIntelGuard, IpIntelGuard, PromptGuardTool, RedactGuard,
    UrlIntelGuard,
};
pub use tool::Tool;
pub use types::GuardOutcome;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{AiGuardConfig, IntelGuardConfig, ServiceGuardConfig};
    pub use crate::error::{GuardError, GuardKind, Result};
    pub use crate::guards::*;
    pub use crate::tool::Tool;
    pub use crate::types::GuardOutcome;
}
