//! Recommendation handler

use axum::{extract::State, Json};
use validator::Validate;

use crate::logic::{advice, clinical};
use crate::models::{RecommendationRequest, RecommendationResponse};
use crate::{AppResult, AppState};

/// POST /recommendations
///
/// Classifies the vital panel, then asks the text-generation service for
/// lifestyle advice. Requires the service credential; scoring endpoints
/// keep working without it.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    req.validate()?;

    let statuses = clinical::classify(&req);
    let recommendations = advice::generate(&state.http, &state.config, &req, &statuses).await?;

    Ok(Json(RecommendationResponse { recommendations }))
}
