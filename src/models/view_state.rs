use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Restaurant;

/// Read-only projection of the recommendation controller's state
///
/// `recommendations` is non-empty only when `loading` is false, `error` is
/// absent and `api_key_missing` is false.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewState {
    pub loading: bool,
    pub error: Option<String>,
    pub api_key_missing: bool,
    pub recommendations: Vec<Restaurant>,
    /// When the last terminal transition was applied
    pub updated_at: Option<DateTime<Utc>>,
}
