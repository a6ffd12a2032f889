//! Disease identifiers and the risk assessment payload

use serde::{Deserialize, Serialize};

/// The three conditions the server scores.
///
/// Wire names match what the assessment frontend sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Disease {
    #[serde(rename = "diabetes")]
    Diabetes,
    #[serde(rename = "kidneyDisease")]
    Kidney,
    #[serde(rename = "heartDisease")]
    Heart,
}

impl Disease {
    /// Human-readable name, used in prompts and log lines
    pub fn label(&self) -> &'static str {
        match self {
            Disease::Diabetes => "diabetes",
            Disease::Kidney => "chronic kidney disease",
            Disease::Heart => "heart disease",
        }
    }

    /// Artifact file name under the model directory
    pub fn artifact_name(&self) -> &'static str {
        match self {
            Disease::Diabetes => "diabetes.onnx",
            Disease::Kidney => "kidney.onnx",
            Disease::Heart => "heart.onnx",
        }
    }

    pub const ALL: [Disease; 3] = [Disease::Diabetes, Disease::Kidney, Disease::Heart];
}

/// Scoring response: probability of the positive class, 0-100, 2 decimals
#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub risk_percentage: f64,
    pub risk_level: &'static str,
}

impl RiskAssessment {
    pub fn new(risk_percentage: f64) -> Self {
        Self {
            risk_percentage,
            risk_level: risk_level(risk_percentage),
        }
    }
}

/// Band the percentage the way the assessment UI presents it
pub fn risk_level(percentage: f64) -> &'static str {
    if percentage < 33.0 {
        "low"
    } else if percentage < 66.0 {
        "moderate"
    } else {
        "high"
    }
}
