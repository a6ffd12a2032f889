//! Model registry and risk scorer
//!
//! Holds the three classifier sessions, loaded once at startup and read-only
//! for the life of the process. `load` is fail-fast: a missing or broken
//! artifact aborts startup before the listener binds, so the server never
//! serves traffic with a partial model set.
//!
//! Artifacts are ONNX exports of the trained classifiers (exported with
//! zipmap disabled, so the probability output is a plain float tensor).

use std::collections::HashMap;
use std::path::Path;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use crate::error::{AppError, AppResult};
use crate::logic::layout;
use crate::models::Disease;

pub struct ModelRegistry {
    sessions: HashMap<Disease, Mutex<Session>>,
}

impl ModelRegistry {
    /// Load all three classifier artifacts from `dir`.
    ///
    /// Every artifact must load, and any `<name>.layout.json` sidecar must
    /// match the layout compiled into this build.
    pub fn load(dir: &str) -> Result<Self, AppError> {
        let mut sessions = HashMap::new();

        for disease in Disease::ALL {
            let path = Path::new(dir).join(disease.artifact_name());
            tracing::info!("Loading {} model from {}", disease.label(), path.display());

            if !path.exists() {
                return Err(AppError::Config(format!(
                    "Model artifact not found: {}",
                    path.display()
                )));
            }

            // Reject artifacts exported against a different feature layout.
            let sidecar_path = path.with_extension("layout.json");
            if sidecar_path.exists() {
                let raw = std::fs::read_to_string(&sidecar_path).map_err(|e| {
                    AppError::Config(format!("Failed to read {}: {}", sidecar_path.display(), e))
                })?;
                let sidecar: layout::LayoutSidecar = serde_json::from_str(&raw).map_err(|e| {
                    AppError::Config(format!("Failed to parse {}: {}", sidecar_path.display(), e))
                })?;
                layout::validate_sidecar(disease, &sidecar)
                    .map_err(|e| AppError::Config(e.to_string()))?;
            }

            let session = Session::builder()
                .map_err(|e| AppError::Config(format!("Failed to create session builder: {}", e)))?
                .with_optimization_level(GraphOptimizationLevel::Level3)
                .map_err(|e| AppError::Config(format!("Failed to set optimization: {}", e)))?
                .commit_from_file(&path)
                .map_err(|e| {
                    AppError::Config(format!("Failed to load {}: {}", path.display(), e))
                })?;

            sessions.insert(disease, Mutex::new(session));
        }

        tracing::info!("All {} model artifacts loaded", sessions.len());
        Ok(Self { sessions })
    }

    /// Number of loaded classifier sessions
    pub fn model_count(&self) -> usize {
        self.sessions.len()
    }

    /// Run a disease's classifier over an assembled feature vector and
    /// return the positive-class probability as a percentage, 2 decimals.
    ///
    /// A dimensionality mismatch is a client-visible `Inference` error, not
    /// a crash: in practice it means the vector builder has drifted out of
    /// sync with a retrained artifact.
    pub fn score(&self, disease: Disease, features: &[f32]) -> AppResult<f64> {
        let expected = layout::feature_count(disease);
        if features.len() != expected {
            return Err(AppError::Inference(format!(
                "{} model expects {} features, got {}",
                disease.label(),
                expected,
                features.len()
            )));
        }

        let session_mutex = self
            .sessions
            .get(&disease)
            .ok_or_else(|| AppError::Internal(format!("No model loaded for {}", disease.label())))?;
        let mut session = session_mutex.lock();

        let output_names: Vec<String> = session.outputs().iter().map(|o| o.name().to_string()).collect();

        let input_array = Array2::<f32>::from_shape_vec((1, expected), features.to_vec())
            .map_err(|e| AppError::Inference(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| AppError::Inference(format!("Tensor error: {}", e)))?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| AppError::Inference(format!("Inference failed: {}", e)))?;

        // Classifier exports carry a label output plus a probability output;
        // prefer the latter by name, fall back to the last declared output.
        let prob_name = output_names
            .iter()
            .find(|n| n.contains("probab"))
            .or_else(|| output_names.last())
            .ok_or_else(|| AppError::Inference("Model declares no outputs".to_string()))?;

        let output = outputs
            .get(prob_name)
            .ok_or_else(|| AppError::Inference(format!("Missing model output {}", prob_name)))?;

        let output_tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| AppError::Inference(format!("Extract error: {}", e)))?;

        let positive = positive_probability(output_tensor.1)
            .ok_or_else(|| AppError::Inference("Empty probability output".to_string()))?;

        Ok(round2(f64::from(positive.clamp(0.0, 1.0)) * 100.0))
    }
}

/// Probability mass assigned to the positive class.
///
/// Two-class exports give `[p0, p1]` per row; single-output sigmoid models
/// give one scalar. Either way the positive class is the last element.
fn positive_probability(data: &[f32]) -> Option<f32> {
    data.last().copied()
}

/// Round to 2 decimal places, matching the wire contract
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
