/// Recommendation provider abstraction
///
/// The view only needs "give me restaurants"; the provider hides which
/// generative model answers and how its output is shaped into records.
use crate::{error::AppResult, models::Restaurant};

pub mod gemini;

pub use gemini::GeminiProvider;

/// Trait for restaurant recommendation sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Fetch a fresh list of recommendations, in the order the source ranks them
    ///
    /// `api_key` is the credential validated for this load only.
    async fn fetch_recommendations(&self, api_key: &str) -> AppResult<Vec<Restaurant>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
