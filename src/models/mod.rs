//! Data models

pub mod disease;
pub mod metrics;
pub mod recommendation;

pub use disease::{Disease, RiskAssessment};
pub use metrics::{DiabetesMetrics, HeartMetrics, KidneyMetrics};
pub use recommendation::{RecommendationRequest, RecommendationResponse};
