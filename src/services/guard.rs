use std::sync::Arc;

use crate::error::{AppError, AppResult};

/// Message shown when no credential is configured
pub const MISSING_API_KEY_MESSAGE: &str =
    "API Key is missing. Please configure it in your environment variables.";

/// Where the Gemini credential comes from
///
/// Implementations must re-read their backing store on every call; the guard
/// never caches a credential between loads.
pub trait CredentialSource: Send + Sync {
    fn api_key(&self) -> Option<String>;
}

/// Reads the credential from a named environment variable
#[derive(Debug, Clone)]
pub struct EnvCredentialSource {
    var_name: String,
}

impl EnvCredentialSource {
    pub fn new(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
        }
    }
}

impl CredentialSource for EnvCredentialSource {
    fn api_key(&self) -> Option<String> {
        std::env::var(&self.var_name).ok()
    }
}

/// Fixed credential, mostly useful for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialSource(pub Option<String>);

impl CredentialSource for StaticCredentialSource {
    fn api_key(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Pre-flight check that a usable credential is present
#[derive(Clone)]
pub struct ConfigurationGuard {
    source: Arc<dyn CredentialSource>,
}

impl ConfigurationGuard {
    pub fn new(source: Arc<dyn CredentialSource>) -> Self {
        Self { source }
    }

    /// Returns the trimmed credential, or `MissingApiKey` if it is unset or blank
    pub fn check(&self) -> AppResult<String> {
        match self.source.api_key() {
            Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(AppError::MissingApiKey),
        }
    }
}
