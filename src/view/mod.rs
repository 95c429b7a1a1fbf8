//! Render selection: which of the five page branches a view state shows.

pub mod html;

use serde::Serialize;

use crate::models::{Restaurant, ViewState};

/// Exactly one of these is rendered for any view state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum RenderBranch {
    /// Blocking overlay for a missing credential; no retry affordance
    ConfigOverlay { message: String },
    Loading,
    Error { message: String, show_retry: bool },
    Empty,
    List { restaurants: Vec<Restaurant> },
}

impl RenderBranch {
    pub fn name(&self) -> &'static str {
        match self {
            RenderBranch::ConfigOverlay { .. } => "config_overlay",
            RenderBranch::Loading => "loading",
            RenderBranch::Error { .. } => "error",
            RenderBranch::Empty => "empty",
            RenderBranch::List { .. } => "list",
        }
    }
}

/// Picks the branch for `state`, first match wins:
/// missing key, loading, error, empty, list.
pub fn select_view(state: &ViewState) -> RenderBranch {
    if state.api_key_missing {
        return RenderBranch::ConfigOverlay {
            message: state
                .error
                .clone()
                .unwrap_or_else(|| "API Key is missing.".to_string()),
        };
    }

    if state.loading {
        return RenderBranch::Loading;
    }

    if let Some(message) = &state.error {
        return RenderBranch::Error {
            message: message.clone(),
            show_retry: true,
        };
    }

    if state.recommendations.is_empty() {
        RenderBranch::Empty
    } else {
        RenderBranch::List {
            restaurants: state.recommendations.clone(),
        }
    }
}
