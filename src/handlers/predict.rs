//! Risk prediction handlers
//!
//! One endpoint per disease; each validates the panel, assembles the
//! feature vector in the classifier's frozen order, and scores it through
//! the shared model registry.

use axum::{extract::State, Json};
use validator::Validate;

use crate::models::{DiabetesMetrics, Disease, HeartMetrics, KidneyMetrics, RiskAssessment};
use crate::{AppResult, AppState};

/// POST /predict_diabetes
pub async fn diabetes(
    State(state): State<AppState>,
    Json(req): Json<DiabetesMetrics>,
) -> AppResult<Json<RiskAssessment>> {
    req.validate()?;
    let risk = state.registry.score(Disease::Diabetes, &req.features())?;
    Ok(Json(RiskAssessment::new(risk)))
}

/// POST /predict_kidney
pub async fn kidney(
    State(state): State<AppState>,
    Json(req): Json<KidneyMetrics>,
) -> AppResult<Json<RiskAssessment>> {
    req.validate()?;
    let risk = state.registry.score(Disease::Kidney, &req.features())?;
    Ok(Json(RiskAssessment::new(risk)))
}

/// POST /predict_heart
pub async fn heart(
    State(state): State<AppState>,
    Json(req): Json<HeartMetrics>,
) -> AppResult<Json<RiskAssessment>> {
    req.validate()?;
    let risk = state.registry.score(Disease::Heart, &req.features())?;
    Ok(Json(RiskAssessment::new(risk)))
}
