pub mod controller;
pub mod guard;
pub mod providers;

pub use controller::{Phase, RecommendationController};
pub use guard::{ConfigurationGuard, CredentialSource, EnvCredentialSource, StaticCredentialSource};
pub use providers::{GeminiProvider, RecommendationProvider};
