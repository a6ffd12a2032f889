//! Clinical rule engine
//!
//! Deterministic threshold classification of vitals into human-readable
//! status strings. Each vital gets an ordered set of mutually exclusive
//! thresholds, evaluated most severe first; the first match wins. Total
//! over validated input - there is no failure path here.

use crate::models::{Disease, RecommendationRequest};

/// Classify the full vital panel into an ordered status list.
///
/// The kidney-only entries (albumin-creatinine ratio, encounter history)
/// are appended only when the target disease is kidney disease. An absent
/// optional value fails every `>` threshold and falls through to the
/// normal/typical branch, matching the trained pipeline's behavior.
pub fn classify(req: &RecommendationRequest) -> Vec<String> {
    let mut statuses = vec![
        format!("HbA1c: {}", hba1c_status(req.hba1c)),
        format!("Fasting glucose: {}", glucose_status(req.glucose)),
        format!("BMI: {}", bmi_status(req.bmi)),
        format!(
            "Blood pressure: {}",
            blood_pressure_status(req.systolic_bp, req.diastolic_bp)
        ),
        format!("eGFR: {}", egfr_status(req.age, req.egfr)),
    ];

    if req.disease == Disease::Kidney {
        statuses.push(format!(
            "Albumin-creatinine ratio: {}",
            acr_status(req.albumin_creatinine)
        ));
        statuses.push(format!(
            "Encounter history: {}",
            encounter_status(req.encounter_count)
        ));
    }

    statuses
}

fn hba1c_status(hba1c: f64) -> &'static str {
    if hba1c >= 6.5 {
        "diabetes range"
    } else if hba1c >= 5.7 {
        "prediabetes range"
    } else {
        "normal"
    }
}

fn glucose_status(glucose: f64) -> &'static str {
    if glucose >= 126.0 {
        "diabetes range"
    } else if glucose >= 100.0 {
        "prediabetes range"
    } else {
        "normal"
    }
}

fn bmi_status(bmi: f64) -> &'static str {
    if bmi >= 30.0 {
        "obesity"
    } else if bmi >= 25.0 {
        "overweight"
    } else {
        "normal"
    }
}

fn blood_pressure_status(systolic: f64, diastolic: f64) -> &'static str {
    if systolic >= 130.0 || diastolic >= 80.0 {
        "high"
    } else if systolic >= 120.0 {
        "elevated"
    } else {
        "normal"
    }
}

/// Age-banded eGFR check. Bands are half-open on the lower bound; the floor
/// of the next band closes the one before it.
fn egfr_status(age: f64, egfr: f64) -> &'static str {
    let below_normal = if age < 40.0 {
        egfr < 90.0
    } else if age < 60.0 {
        egfr < 80.0
    } else {
        egfr < 70.0
    };

    if below_normal {
        "below normal for age"
    } else {
        "normal"
    }
}

fn acr_status(acr: Option<f64>) -> &'static str {
    match acr {
        Some(v) if v > 300.0 => "macroalbuminuria",
        Some(v) if v >= 30.0 => "microalbuminuria",
        _ => "normal",
    }
}

fn encounter_status(count: Option<f64>) -> &'static str {
    match count {
        Some(v) if v > 5.0 => "high",
        _ => "typical",
    }
}
