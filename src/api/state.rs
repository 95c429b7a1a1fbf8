use std::sync::Arc;

use crate::config::Config;
use crate::services::{
    ConfigurationGuard, CredentialSource, EnvCredentialSource, GeminiProvider,
    RecommendationController, RecommendationProvider,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub controller: RecommendationController,
}

impl AppState {
    /// Wires a controller from explicit collaborators
    pub fn new(
        credentials: Arc<dyn CredentialSource>,
        provider: Arc<dyn RecommendationProvider>,
    ) -> Self {
        let guard = ConfigurationGuard::new(credentials);
        Self {
            controller: RecommendationController::new(guard, provider),
        }
    }

    /// Production wiring: env-backed credential and the Gemini provider
    pub fn from_config(config: &Config) -> Self {
        let credentials = Arc::new(EnvCredentialSource::new(config.api_key_var.clone()));
        let provider = Arc::new(GeminiProvider::new(
            config.gemini_api_url.clone(),
            config.gemini_model.clone(),
            config.recommendation_count,
        ));
        Self::new(credentials, provider)
    }
}
