//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    models_loaded: usize,
    recommendations_enabled: bool,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        models_loaded: state.registry.model_count(),
        recommendations_enabled: state.config.gemini_api_key.is_some(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
