use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Redirect},
    Extension, Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::middleware::RequestId;
use crate::models::ViewState;
use crate::view::{html, select_view};

use super::AppState;

// Response types

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    /// Name of the render branch the state selects
    pub view: &'static str,
    pub state: ViewState,
}

impl From<ViewState> for RecommendationsResponse {
    fn from(state: ViewState) -> Self {
        Self {
            view: select_view(&state).name(),
            state,
        }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Renders the recommendation page for the current state
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.controller.snapshot().await;
    let branch = select_view(&snapshot);
    Html(html::render_page(&branch, snapshot.updated_at))
}

/// Retry button target: moves the view to loading, then sends the browser back to the page
pub async fn retry_page(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Redirect {
    tracing::info!(request_id = %request_id, "Retry requested from page");
    let _ = state.controller.trigger().await;
    Redirect::to("/")
}

/// Current view state as JSON
pub async fn get_recommendations(
    State(state): State<AppState>,
) -> Json<RecommendationsResponse> {
    Json(state.controller.snapshot().await.into())
}

/// Runs a reload to completion and returns the resulting state
pub async fn retry_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Json<RecommendationsResponse> {
    tracing::info!(request_id = %request_id, "Retry requested via API");
    let snapshot = state.controller.load().await;

    tracing::info!(
        request_id = %request_id,
        view = select_view(&snapshot).name(),
        "Retry completed"
    );

    Json(snapshot.into())
}
