//! # Hanzo Pangea
//!
//! Minimal async client for the [Pangea](https://pangea.cloud) security APIs
//! used by `hanzo-pangea-guard`:
//!
//! - **Domain / IP / URL Intel**: bulk reputation scores
//! - **Redact**: sensitive data redaction
//! - **Prompt Guard**: prompt injection detection
//! - **AI Guard**: recipe-driven text sanitization
//!
//! Each service has a trait ([`ReputationService`], [`RedactService`],
//! [`PromptGuardService`], [`AiGuardService`]) so callers can swap in their
//! own implementation, and a concrete client that talks HTTP.
//!
//! ```no_run
//! use hanzo_pangea::{DomainIntel, PangeaConfig, ReputationService};
//! use secrecy::SecretString;
//!
//! # async fn run() -> hanzo_pangea::Result<()> {
//! let intel = DomainIntel::new(
//!     SecretString::new("pts_...".into()),
//!     &PangeaConfig::new("aws.us.pangea.cloud"),
//!     None,
//! )?;
//! let response = intel
//!     .reputation_bulk(&["737updatesboeing.com".to_string()])
//!     .await?;
//! println!("{:?}", response.result);
//! # Ok(())
//! # }
//! ```
//!
//! Retries and asynchronous (HTTP 202) result polling are not implemented;
//! a 202 surfaces as [`PangeaError::Accepted`].

pub mod ai_guard;
pub mod client;
pub mod config;
pub mod error;
pub mod intel;
pub mod prompt_guard;
pub mod redact;
pub mod response;

pub use ai_guard::{AiGuard, AiGuardService, TextGuardResult, DEFAULT_RECIPE};
pub use client::PangeaClient;
pub use config::{Environment, PangeaConfig, DEFAULT_DOMAIN};
pub use error::{PangeaError, Result};
pub use intel::{DomainIntel, IpIntel, ReputationData, ReputationResult, ReputationService, UrlIntel};
pub use prompt_guard::{Message, PromptGuard, PromptGuardResult, PromptGuardService};
pub use redact::{Redact, RedactResult, RedactService};
pub use response::{PangeaResponse, STATUS_SUCCESS};
