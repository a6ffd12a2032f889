//! Recommendation request/response payloads

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Disease;

/// Vital panel plus scoring context for the recommendation path.
///
/// `albumin_creatinine` and `encounter_count` only matter for the kidney
/// checks and may be absent; `None` is preserved downstream and is not the
/// same as `0.0`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecommendationRequest {
    pub disease: Disease,
    #[validate(range(min = 0.0, max = 100.0, message = "risk_score must be within [0, 100]"))]
    pub risk_score: f64,
    #[validate(range(exclusive_min = 0.0, max = 100.0, message = "age must be within (0, 100]"))]
    pub age: f64,
    #[validate(range(exclusive_min = 0.0, max = 15.0, message = "hba1c must be within (0, 15]"))]
    pub hba1c: f64,
    #[validate(range(exclusive_min = 0.0, max = 500.0, message = "glucose must be within (0, 500]"))]
    pub glucose: f64,
    #[validate(range(exclusive_min = 0.0, max = 100.0, message = "bmi must be within (0, 100]"))]
    pub bmi: f64,
    #[validate(range(exclusive_min = 0.0, max = 250.0, message = "systolic_bp must be within (0, 250]"))]
    pub systolic_bp: f64,
    #[validate(range(exclusive_min = 0.0, max = 150.0, message = "diastolic_bp must be within (0, 150]"))]
    pub diastolic_bp: f64,
    #[validate(range(exclusive_min = 0.0, max = 200.0, message = "egfr must be within (0, 200]"))]
    pub egfr: f64,
    #[validate(range(min = 0.0, max = 3000.0, message = "albumin_creatinine must be within [0, 3000]"))]
    pub albumin_creatinine: Option<f64>,
    #[validate(range(min = 0.0, max = 365.0, message = "encounter_count must be within [0, 365]"))]
    pub encounter_count: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_may_be_absent() {
        let req: RecommendationRequest = serde_json::from_value(serde_json::json!({
            "disease": "diabetes",
            "risk_score": 41.5,
            "age": 50.0,
            "hba1c": 5.9,
            "glucose": 104.0,
            "bmi": 26.0,
            "systolic_bp": 122.0,
            "diastolic_bp": 79.0,
            "egfr": 88.0
        }))
        .unwrap();
        assert!(req.albumin_creatinine.is_none());
        assert!(req.encounter_count.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn absent_is_distinct_from_zero() {
        let req: RecommendationRequest = serde_json::from_value(serde_json::json!({
            "disease": "kidneyDisease",
            "risk_score": 10.0,
            "age": 60.0,
            "hba1c": 5.2,
            "glucose": 90.0,
            "bmi": 22.0,
            "systolic_bp": 110.0,
            "diastolic_bp": 70.0,
            "egfr": 75.0,
            "albumin_creatinine": 0.0
        }))
        .unwrap();
        assert_eq!(req.albumin_creatinine, Some(0.0));
        assert!(req.encounter_count.is_none());
    }

    #[test]
    fn extra_panel_fields_are_tolerated() {
        // The frontend spreads the whole predict payload into this request.
        let req: RecommendationRequest = serde_json::from_value(serde_json::json!({
            "disease": "diabetes",
            "risk_score": 41.5,
            "age": 50.0,
            "hba1c": 5.9,
            "glucose": 104.0,
            "bmi": 26.0,
            "systolic_bp": 122.0,
            "diastolic_bp": 79.0,
            "egfr": 88.0,
            "weight": 81.0,
            "height": 178.0,
            "cholesterol": 190.0,
            "ldl": 120.0
        }))
        .unwrap();
        assert_eq!(req.disease, Disease::Diabetes);
    }

    #[test]
    fn out_of_range_optional_is_rejected() {
        let req: RecommendationRequest = serde_json::from_value(serde_json::json!({
            "disease": "kidneyDisease",
            "risk_score": 10.0,
            "age": 60.0,
            "hba1c": 5.2,
            "glucose": 90.0,
            "bmi": 22.0,
            "systolic_bp": 110.0,
            "diastolic_bp": 70.0,
            "egfr": 75.0,
            "albumin_creatinine": 3200.0
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }
}
