//! Feature layouts - the serving-time half of the training contract
//!
//! Each classifier was trained against a fixed column order; the vectors we
//! assemble at request time must match it exactly, or predictions are
//! silently wrong. The layouts below are the single source of truth for
//! that order on the serving side.
//!
//! Rules:
//! 1. Add a feature -> increment LAYOUT_VERSION
//! 2. Change order -> increment LAYOUT_VERSION
//! 3. Remove a feature -> increment LAYOUT_VERSION
//!
//! A retrained artifact can ship a `<name>.layout.json` sidecar carrying the
//! version/hash it was exported with; `validate_sidecar` rejects the load
//! when it disagrees with this file, turning silent drift into a startup
//! failure.

use crc32fast::Hasher;
use serde::Deserialize;

use crate::models::Disease;

/// Current feature layout version, shared by all three diseases
pub const LAYOUT_VERSION: u8 = 1;

/// Diabetes classifier column order
pub const DIABETES_LAYOUT: &[&str] = &[
    "hba1c",
    "glucose",
    "bmi",
    "weight",
    "height",
    "systolic_bp",
    "diastolic_bp",
    "cholesterol",
    "ldl",
    "egfr",
    "age",
];

/// Chronic kidney disease classifier column order
pub const KIDNEY_LAYOUT: &[&str] = &[
    "age",
    "egfr",
    "albumin_creatinine",
    "glucose",
    "hba1c",
    "bmi",
    "systolic_bp",
    "diastolic_bp",
    "encounter_count",
];

/// Heart disease classifier column order
pub const HEART_LAYOUT: &[&str] = &[
    "age",
    "systolic_bp",
    "diastolic_bp",
    "cholesterol",
    "ldl",
    "bmi",
    "glucose",
    "hba1c",
];

/// Column order for a disease's classifier
pub fn layout(disease: Disease) -> &'static [&'static str] {
    match disease {
        Disease::Diabetes => DIABETES_LAYOUT,
        Disease::Kidney => KIDNEY_LAYOUT,
        Disease::Heart => HEART_LAYOUT,
    }
}

/// Expected feature count for a disease's classifier
pub fn feature_count(disease: Disease) -> usize {
    layout(disease).len()
}

/// CRC32 over version + ordered column names, for sidecar comparison
pub fn layout_hash(disease: Disease) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[LAYOUT_VERSION]);
    for name in layout(disease) {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }
    hasher.finalize()
}

/// Layout metadata exported next to a model artifact
#[derive(Debug, Deserialize)]
pub struct LayoutSidecar {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
}

/// Error when an artifact's layout metadata disagrees with this build
#[derive(Debug, Clone)]
pub struct LayoutMismatchError {
    pub disease: Disease,
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} feature layout mismatch: expected v{} (hash {:08x}), artifact has v{} (hash {:08x})",
            self.disease.label(),
            self.expected_version,
            self.expected_hash,
            self.actual_version,
            self.actual_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

/// Validate a sidecar against the layout compiled into this build
pub fn validate_sidecar(disease: Disease, sidecar: &LayoutSidecar) -> Result<(), LayoutMismatchError> {
    let expected_hash = layout_hash(disease);
    if sidecar.version != LAYOUT_VERSION
        || sidecar.hash != expected_hash
        || sidecar.feature_count != feature_count(disease)
    {
        return Err(LayoutMismatchError {
            disease,
            expected_version: LAYOUT_VERSION,
            expected_hash,
            actual_version: sidecar.version,
            actual_hash: sidecar.hash,
        });
    }
    Ok(())
}
