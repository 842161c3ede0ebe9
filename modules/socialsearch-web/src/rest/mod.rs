use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::warn;

use crate::AppState;

/// Current leaderboard and per-network totals, read straight from the store.
pub async fn api_ranking(State(state): State<Arc<AppState>>) -> Response {
    match state.store.fetch_ranking().await {
        Ok(payload) => Json(payload).into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to fetch ranking");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "error": "ranking unavailable" })),
            )
                .into_response()
        }
    }
}

pub async fn health() -> &'static str {
    "ok"
}
