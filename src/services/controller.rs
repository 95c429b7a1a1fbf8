use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    error::AppError,
    models::{Restaurant, ViewState},
    services::{
        guard::{ConfigurationGuard, MISSING_API_KEY_MESSAGE},
        providers::RecommendationProvider,
    },
};

/// Shown when a fetch fault carries no description
pub const UNKNOWN_FETCH_ERROR_MESSAGE: &str =
    "An unknown error occurred while fetching recommendations.";

/// Builds the user-facing message for a failed fetch
pub fn fetch_error_message(error: &AppError) -> String {
    match error.description() {
        Some(description) => format!(
            "Failed to fetch recommendations: {}. Ensure your Gemini API key is valid and has permissions.",
            description
        ),
        None => UNKNOWN_FETCH_ERROR_MESSAGE.to_string(),
    }
}

/// Internal state of a load cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success(Vec<Restaurant>),
    Failure(String),
    MissingConfig(String),
}

struct Inner {
    phase: Phase,
    /// Bumped on every trigger; a completion only lands if it still matches
    generation: u64,
    updated_at: Option<DateTime<Utc>>,
}

impl Inner {
    fn project(&self) -> ViewState {
        let (loading, error, api_key_missing, recommendations) = match &self.phase {
            Phase::Idle | Phase::Loading => (true, None, false, Vec::new()),
            Phase::Success(list) => (false, None, false, list.clone()),
            Phase::Failure(message) => (false, Some(message.clone()), false, Vec::new()),
            Phase::MissingConfig(message) => (false, Some(message.clone()), true, Vec::new()),
        };

        ViewState {
            loading,
            error,
            api_key_missing,
            recommendations,
            updated_at: self.updated_at,
        }
    }

    fn settle(&mut self, phase: Phase) {
        self.phase = phase;
        self.updated_at = Some(Utc::now());
    }
}

/// Drives the recommendation fetch and owns the resulting view state
///
/// Every trigger (start-up or retry) goes through [`load`](Self::load) or
/// [`trigger`](Self::trigger).
/// Overlapping triggers are not serialized: the most recent trigger wins and
/// completions of older in-flight fetches are dropped.
#[derive(Clone)]
pub struct RecommendationController {
    guard: ConfigurationGuard,
    provider: Arc<dyn RecommendationProvider>,
    inner: Arc<RwLock<Inner>>,
}

impl RecommendationController {
    pub fn new(guard: ConfigurationGuard, provider: Arc<dyn RecommendationProvider>) -> Self {
        Self {
            guard,
            provider,
            inner: Arc::new(RwLock::new(Inner {
                phase: Phase::Idle,
                generation: 0,
                updated_at: None,
            })),
        }
    }

    /// Current view state
    pub async fn snapshot(&self) -> ViewState {
        self.inner.read().await.project()
    }

    /// Current phase of the state machine
    pub async fn phase(&self) -> Phase {
        self.inner.read().await.phase.clone()
    }

    /// Starts a load and returns once the view has left its previous state
    ///
    /// The configuration check and the move to loading happen before this
    /// returns; only the provider call runs in the spawned task.
    pub async fn trigger(&self) -> tokio::task::JoinHandle<ViewState> {
        match self.begin().await {
            Start::Fetch {
                generation,
                api_key,
            } => {
                let controller = self.clone();
                tokio::spawn(async move { controller.finish(generation, api_key).await })
            }
            Start::Settled(state) => tokio::spawn(async move { state }),
        }
    }

    /// Runs one full load cycle: configuration check, fetch, state update
    ///
    /// Returns the view state as it stands once this cycle finishes, which may
    /// reflect a newer trigger if one started meanwhile.
    pub async fn load(&self) -> ViewState {
        match self.begin().await {
            Start::Fetch {
                generation,
                api_key,
            } => self.finish(generation, api_key).await,
            Start::Settled(state) => state,
        }
    }

    /// Takes a new generation and runs the configuration check
    async fn begin(&self) -> Start {
        let mut inner = self.inner.write().await;
        inner.generation += 1;
        let generation = inner.generation;

        match self.guard.check() {
            Ok(api_key) => {
                inner.phase = Phase::Loading;
                tracing::info!(
                    provider = self.provider.name(),
                    generation,
                    "Loading recommendations"
                );
                Start::Fetch {
                    generation,
                    api_key,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, generation, "Recommendation load skipped");
                inner.settle(Phase::MissingConfig(MISSING_API_KEY_MESSAGE.to_string()));
                Start::Settled(inner.project())
            }
        }
    }

    /// Calls the provider and applies the outcome if `generation` is still current
    async fn finish(&self, generation: u64, api_key: String) -> ViewState {
        let provider = self.provider.clone();
        let outcome = tokio::spawn(async move { provider.fetch_recommendations(&api_key).await })
            .await
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "Recommendation task failed");
                Err(AppError::Unknown)
            });

        let mut inner = self.inner.write().await;
        if inner.generation != generation {
            tracing::debug!(
                generation,
                current = inner.generation,
                "Discarding stale recommendation result"
            );
            return inner.project();
        }

        match outcome {
            Ok(restaurants) => {
                tracing::info!(
                    generation,
                    restaurant_count = restaurants.len(),
                    "Recommendations loaded"
                );
                inner.settle(Phase::Success(restaurants));
            }
            Err(e) => {
                tracing::error!(error = %e, generation, "Failed to fetch recommendations");
                inner.settle(Phase::Failure(fetch_error_message(&e)));
            }
        }

        inner.project()
    }
}

/// Outcome of the synchronous half of a load
enum Start {
    Fetch { generation: u64, api_key: String },
    Settled(ViewState),
}
