//! Patient metrics - the per-disease request payloads
//!
//! Each struct is immutable once deserialized and lives for one request.
//! Field ranges are enforced with `validator`; every violation names the
//! field and its declared range, and acceptance is all-or-nothing.
//!
//! The `features()` methods assemble the ordered vector the corresponding
//! classifier was trained with. The ordering is a frozen contract with the
//! training collaborator (see `logic::layout`); reordering fields here
//! silently breaks predictions, so tests pin the exact order.

use serde::Deserialize;
use validator::Validate;

/// Input panel for the diabetes classifier
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DiabetesMetrics {
    #[validate(range(exclusive_min = 0.0, max = 15.0, message = "hba1c must be within (0, 15]"))]
    pub hba1c: f64,
    #[validate(range(exclusive_min = 0.0, max = 500.0, message = "glucose must be within (0, 500]"))]
    pub glucose: f64,
    #[validate(range(exclusive_min = 0.0, max = 100.0, message = "bmi must be within (0, 100]"))]
    pub bmi: f64,
    #[validate(range(exclusive_min = 0.0, max = 400.0, message = "weight must be within (0, 400]"))]
    pub weight: f64,
    #[validate(range(exclusive_min = 0.0, max = 250.0, message = "height must be within (0, 250]"))]
    pub height: f64,
    #[validate(range(exclusive_min = 0.0, max = 250.0, message = "systolic_bp must be within (0, 250]"))]
    pub systolic_bp: f64,
    #[validate(range(exclusive_min = 0.0, max = 150.0, message = "diastolic_bp must be within (0, 150]"))]
    pub diastolic_bp: f64,
    #[validate(range(exclusive_min = 0.0, max = 500.0, message = "cholesterol must be within (0, 500]"))]
    pub cholesterol: f64,
    #[validate(range(exclusive_min = 0.0, max = 400.0, message = "ldl must be within (0, 400]"))]
    pub ldl: f64,
    #[validate(range(exclusive_min = 0.0, max = 200.0, message = "egfr must be within (0, 200]"))]
    pub egfr: f64,
    #[validate(range(exclusive_min = 0.0, max = 100.0, message = "age must be within (0, 100]"))]
    pub age: f64,
}

impl DiabetesMetrics {
    /// Feature vector in the order `layout::DIABETES_LAYOUT` declares
    pub fn features(&self) -> Vec<f32> {
        vec![
            self.hba1c as f32,
            self.glucose as f32,
            self.bmi as f32,
            self.weight as f32,
            self.height as f32,
            self.systolic_bp as f32,
            self.diastolic_bp as f32,
            self.cholesterol as f32,
            self.ldl as f32,
            self.egfr as f32,
            self.age as f32,
        ]
    }
}

/// Input panel for the chronic kidney disease classifier
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct KidneyMetrics {
    #[validate(range(exclusive_min = 0.0, max = 100.0, message = "age must be within (0, 100]"))]
    pub age: f64,
    #[validate(range(exclusive_min = 0.0, max = 200.0, message = "egfr must be within (0, 200]"))]
    pub egfr: f64,
    #[validate(range(min = 0.0, max = 3000.0, message = "albumin_creatinine must be within [0, 3000]"))]
    pub albumin_creatinine: f64,
    #[validate(range(exclusive_min = 0.0, max = 500.0, message = "glucose must be within (0, 500]"))]
    pub glucose: f64,
    #[validate(range(exclusive_min = 0.0, max = 15.0, message = "hba1c must be within (0, 15]"))]
    pub hba1c: f64,
    #[validate(range(exclusive_min = 0.0, max = 100.0, message = "bmi must be within (0, 100]"))]
    pub bmi: f64,
    #[validate(range(exclusive_min = 0.0, max = 250.0, message = "systolic_bp must be within (0, 250]"))]
    pub systolic_bp: f64,
    #[validate(range(exclusive_min = 0.0, max = 150.0, message = "diastolic_bp must be within (0, 150]"))]
    pub diastolic_bp: f64,
    #[validate(range(min = 0.0, max = 365.0, message = "encounter_count must be within [0, 365]"))]
    pub encounter_count: f64,
}

impl KidneyMetrics {
    /// Feature vector in the order `layout::KIDNEY_LAYOUT` declares
    pub fn features(&self) -> Vec<f32> {
        vec![
            self.age as f32,
            self.egfr as f32,
            self.albumin_creatinine as f32,
            self.glucose as f32,
            self.hba1c as f32,
            self.bmi as f32,
            self.systolic_bp as f32,
            self.diastolic_bp as f32,
            self.encounter_count as f32,
        ]
    }
}

/// Input panel for the heart disease classifier
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HeartMetrics {
    #[validate(range(exclusive_min = 0.0, max = 100.0, message = "age must be within (0, 100]"))]
    pub age: f64,
    #[validate(range(exclusive_min = 0.0, max = 250.0, message = "systolic_bp must be within (0, 250]"))]
    pub systolic_bp: f64,
    #[validate(range(exclusive_min = 0.0, max = 150.0, message = "diastolic_bp must be within (0, 150]"))]
    pub diastolic_bp: f64,
    #[validate(range(exclusive_min = 0.0, max = 500.0, message = "cholesterol must be within (0, 500]"))]
    pub cholesterol: f64,
    #[validate(range(exclusive_min = 0.0, max = 400.0, message = "ldl must be within (0, 400]"))]
    pub ldl: f64,
    #[validate(range(exclusive_min = 0.0, max = 100.0, message = "bmi must be within (0, 100]"))]
    pub bmi: f64,
    #[validate(range(exclusive_min = 0.0, max = 500.0, message = "glucose must be within (0, 500]"))]
    pub glucose: f64,
    #[validate(range(exclusive_min = 0.0, max = 15.0, message = "hba1c must be within (0, 15]"))]
    pub hba1c: f64,
}

impl HeartMetrics {
    /// Feature vector in the order `layout::HEART_LAYOUT` declares
    pub fn features(&self) -> Vec<f32> {
        vec![
            self.age as f32,
            self.systolic_bp as f32,
            self.diastolic_bp as f32,
            self.cholesterol as f32,
            self.ldl as f32,
            self.bmi as f32,
            self.glucose as f32,
            self.hba1c as f32,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_diabetes() -> DiabetesMetrics {
        DiabetesMetrics {
            hba1c: 5.4,
            glucose: 92.0,
            bmi: 23.5,
            weight: 70.0,
            height: 172.0,
            systolic_bp: 118.0,
            diastolic_bp: 76.0,
            cholesterol: 180.0,
            ldl: 100.0,
            egfr: 95.0,
            age: 42.0,
        }
    }

    fn valid_kidney() -> KidneyMetrics {
        KidneyMetrics {
            age: 55.0,
            egfr: 82.0,
            albumin_creatinine: 12.0,
            glucose: 98.0,
            hba1c: 5.5,
            bmi: 27.0,
            systolic_bp: 124.0,
            diastolic_bp: 78.0,
            encounter_count: 2.0,
        }
    }

    #[test]
    fn diabetes_feature_order_is_frozen() {
        let m = DiabetesMetrics {
            hba1c: 1.0,
            glucose: 2.0,
            bmi: 3.0,
            weight: 4.0,
            height: 5.0,
            systolic_bp: 6.0,
            diastolic_bp: 7.0,
            cholesterol: 8.0,
            ldl: 9.0,
            egfr: 10.0,
            age: 11.0,
        };
        assert_eq!(
            m.features(),
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0]
        );
    }

    #[test]
    fn kidney_feature_order_is_frozen() {
        let m = KidneyMetrics {
            age: 1.0,
            egfr: 2.0,
            albumin_creatinine: 3.0,
            glucose: 4.0,
            hba1c: 5.0,
            bmi: 6.0,
            systolic_bp: 7.0,
            diastolic_bp: 8.0,
            encounter_count: 9.0,
        };
        assert_eq!(m.features(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn heart_feature_order_is_frozen() {
        let m = HeartMetrics {
            age: 1.0,
            systolic_bp: 2.0,
            diastolic_bp: 3.0,
            cholesterol: 4.0,
            ldl: 5.0,
            bmi: 6.0,
            glucose: 7.0,
            hba1c: 8.0,
        };
        assert_eq!(m.features(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn feature_order_does_not_depend_on_values() {
        let a = valid_diabetes();
        let mut b = valid_diabetes();
        b.hba1c = 9.1;
        b.age = 77.0;
        assert_eq!(a.features().len(), b.features().len());
    }

    #[test]
    fn in_range_panel_passes() {
        assert!(valid_diabetes().validate().is_ok());
        assert!(valid_kidney().validate().is_ok());
    }

    #[test]
    fn hba1c_bounds_are_exclusive_low_inclusive_high() {
        let mut m = valid_diabetes();
        m.hba1c = 15.0;
        assert!(m.validate().is_ok());
        m.hba1c = 15.01;
        assert!(m.validate().is_err());
        m.hba1c = 0.0;
        assert!(m.validate().is_err());
    }

    #[test]
    fn age_upper_bound_is_inclusive() {
        let mut m = valid_diabetes();
        m.age = 100.0;
        assert!(m.validate().is_ok());
        m.age = 100.1;
        assert!(m.validate().is_err());
        m.age = 0.0;
        assert!(m.validate().is_err());
    }

    #[test]
    fn albumin_creatinine_accepts_zero() {
        let mut m = valid_kidney();
        m.albumin_creatinine = 0.0;
        assert!(m.validate().is_ok());
        m.albumin_creatinine = 3000.0;
        assert!(m.validate().is_ok());
        m.albumin_creatinine = 3000.5;
        assert!(m.validate().is_err());
    }

    #[test]
    fn validation_error_names_the_field_and_range() {
        use crate::error::AppError;
        let mut m = valid_diabetes();
        m.hba1c = 16.0;
        let err: AppError = m.validate().unwrap_err().into();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("hba1c must be within (0, 15]")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
