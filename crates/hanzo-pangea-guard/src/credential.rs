//! Token resolution shared by every guard

use crate::error::{GuardError, Result};
use secrecy::{ExposeSecret, SecretString};

/// Resolve a Pangea token from an explicit value or the environment
///
/// An explicit, non-empty token wins. Otherwise `env_var` is read. An empty
/// or absent result is a [`GuardError::MissingToken`] naming `env_var`.
pub fn resolve_token(explicit: Option<SecretString>, env_var: &str) -> Result<SecretString> {
    resolve_token_with(explicit, env_var, |key| std::env::var(key).ok())
}

/// [`resolve_token`] with a custom environment lookup
pub fn resolve_token_with<F>(
    explicit: Option<SecretString>,
    env_var: &str,
    lookup: F,
) -> Result<SecretString>
where
    F: FnOnce(&str) -> Option<String>,
{
    if let Some(token) = explicit.filter(|t| !t.expose_secret().is_empty()) {
        return Ok(token);
    }

    match lookup(env_var) {
        Some(value) if !value.is_empty() => Ok(SecretString::new(value.into_boxed_str())),
        _ => Err(GuardError::MissingToken {
            env_var: env_var.to_string(),
        }),
    }
}
