//! Feature Layout - Feature Schema Registry
//!
//! **CRITICAL: This file controls the feature schema of every disease model**
//!
//! ## Rules (NEVER break these):
//! 1. The order of a schema is the column order of its model.
//! 2. Add, remove or reorder a feature → increment FEATURE_VERSION.
//! 3. Unknown disease ids resolve to an empty schema, never a panic.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when any schema changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// SCHEMAS (Authoritative source)
// ============================================================================

pub const DIABETES_FEATURES: &[&str] = &[
    "age",
    "blood_pressure",
    "glucose",
    "bmi",
    "pregnancies",
    "skin_thickness",
    "insulin",
    "diabetes_pedigree",
];

pub const COVID_FEATURES: &[&str] = &[
    "fever",
    "cough",
    "fatigue",
    "breathing_difficulty",
    "chest_pain",
    "sore_throat",
    "loss_of_taste",
];

pub const PNEUMONIA_FEATURES: &[&str] = &[
    "fever",
    "cough",
    "chest_pain",
    "breathing_difficulty",
    "fatigue",
    "sweating",
    "chills",
];

pub const KIDNEY_DISEASE_FEATURES: &[&str] = &[
    "age",
    "blood_pressure",
    "albumin",
    "sugar",
    "red_blood_cells",
    "pus_cells",
    "blood_glucose",
];

pub const BREAST_CANCER_FEATURES: &[&str] = &[
    "radius_mean",
    "texture_mean",
    "perimeter_mean",
    "area_mean",
    "smoothness_mean",
    "compactness_mean",
];

pub const ALZHEIMER_FEATURES: &[&str] = &[
    "age",
    "memory_loss",
    "cognitive_decline",
    "behavior_changes",
    "mri_findings",
    "genetic_risk",
];

pub const BRAIN_TUMOR_FEATURES: &[&str] = &[
    "headaches",
    "seizures",
    "vision_problems",
    "nausea",
    "mri_abnormalities",
    "speech_difficulty",
];

pub const HEPATITIS_C_FEATURES: &[&str] = &[
    "fatigue",
    "jaundice",
    "abdominal_pain",
    "nausea",
    "liver_enzymes",
    "bilirubin",
];

// ============================================================================
// DISEASE VARIANTS
// ============================================================================

/// The closed set of prediction targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disease {
    Diabetes,
    Covid,
    Pneumonia,
    KidneyDisease,
    BreastCancer,
    Alzheimer,
    BrainTumor,
    HepatitisC,
}

impl Disease {
    /// Every supported disease, in registry order
    pub const ALL: [Disease; 8] = [
        Disease::Diabetes,
        Disease::Covid,
        Disease::Pneumonia,
        Disease::KidneyDisease,
        Disease::BreastCancer,
        Disease::Alzheimer,
        Disease::BrainTumor,
        Disease::HepatitisC,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Disease::Diabetes => "diabetes",
            Disease::Covid => "covid",
            Disease::Pneumonia => "pneumonia",
            Disease::KidneyDisease => "kidney_disease",
            Disease::BreastCancer => "breast_cancer",
            Disease::Alzheimer => "alzheimer",
            Disease::BrainTumor => "brain_tumor",
            Disease::HepatitisC => "hepatitis_c",
        }
    }

    /// Resolve a disease identifier (exact match)
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.id() == id)
    }

    /// Ordered feature names; this order is the model column order
    pub fn features(&self) -> &'static [&'static str] {
        match self {
            Disease::Diabetes => DIABETES_FEATURES,
            Disease::Covid => COVID_FEATURES,
            Disease::Pneumonia => PNEUMONIA_FEATURES,
            Disease::KidneyDisease => KIDNEY_DISEASE_FEATURES,
            Disease::BreastCancer => BREAST_CANCER_FEATURES,
            Disease::Alzheimer => ALZHEIMER_FEATURES,
            Disease::BrainTumor => BRAIN_TUMOR_FEATURES,
            Disease::HepatitisC => HEPATITIS_C_FEATURES,
        }
    }

    pub fn feature_count(&self) -> usize {
        self.features().len()
    }

    /// Human readable outcome per class: `[negative, positive]`
    pub fn outcome_labels(&self) -> [&'static str; 2] {
        match self {
            Disease::Diabetes => ["No Diabetes", "Diabetes Detected"],
            Disease::Covid => ["COVID Negative", "COVID Positive"],
            Disease::Pneumonia => ["No Pneumonia", "Pneumonia Detected"],
            Disease::KidneyDisease => ["Healthy Kidneys", "Kidney Disease Detected"],
            Disease::BreastCancer => ["Benign", "Malignant Tumor"],
            Disease::Alzheimer => ["No Alzheimer", "Alzheimer Detected"],
            Disease::BrainTumor => ["No Tumor", "Brain Tumor Detected"],
            Disease::HepatitisC => ["No Hepatitis C", "Hepatitis C Detected"],
        }
    }

    /// Label for a predicted class index (0 or 1)
    pub fn outcome_label(&self, class: usize) -> Option<&'static str> {
        self.outcome_labels().get(class).copied()
    }

    /// Position of a feature inside this disease's schema
    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.features().iter().position(|&n| n == name)
    }

    /// CRC32 of version, disease id and ordered feature names
    pub fn layout_hash(&self) -> u32 {
        let mut hasher = Hasher::new();

        hasher.update(&[FEATURE_VERSION]);
        hasher.update(self.id().as_bytes());
        hasher.update(&[0]);

        for name in self.features() {
            hasher.update(name.as_bytes());
            hasher.update(&[0]); // Separator
        }

        hasher.finalize()
    }
}

impl std::fmt::Display for Disease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for Disease {
    type Err = crate::error::DiagnosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Disease::from_id(s).ok_or_else(|| crate::error::DiagnosError::UnknownDisease(s.to_string()))
    }
}

// ============================================================================
// REGISTRY LOOKUPS (string keyed, for the request layer)
// ============================================================================

/// Ordered feature names for a disease id.
///
/// Returns an empty slice for unknown ids; callers treat that as
/// "no such disease" and reject the request.
pub fn features_for(disease_id: &str) -> &'static [&'static str] {
    Disease::from_id(disease_id).map(|d| d.features()).unwrap_or(&[])
}

/// All disease ids, in registry order
pub fn disease_ids() -> Vec<&'static str> {
    Disease::ALL.iter().map(|d| d.id()).collect()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub disease: Disease,
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn for_disease(disease: Disease) -> Self {
        Self {
            disease,
            version: FEATURE_VERSION,
            hash: disease.layout_hash(),
            feature_count: disease.feature_count(),
            feature_names: disease.features().iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eight_diseases() {
        assert_eq!(Disease::ALL.len(), 8);
        assert_eq!(disease_ids().len(), 8);
    }

    #[test]
    fn test_feature_counts() {
        for disease in Disease::ALL {
            let n = disease.feature_count();
            assert!((6..=8).contains(&n), "{} has {} features", disease, n);
        }
        assert_eq!(Disease::Diabetes.feature_count(), 8);
        assert_eq!(Disease::Covid.feature_count(), 7);
        assert_eq!(Disease::HepatitisC.feature_count(), 6);
    }

    #[test]
    fn test_id_round_trip() {
        for disease in Disease::ALL {
            assert_eq!(Disease::from_id(disease.id()), Some(disease));
            assert_eq!(disease.id().parse::<Disease>().unwrap(), disease);
        }
        assert_eq!(Disease::from_id("Diabetes"), None);
    }

    #[test]
    fn test_features_for_unknown_is_empty() {
        assert!(features_for("not_a_real_disease").is_empty());
        assert!(features_for("").is_empty());
    }

    #[test]
    fn test_features_for_preserves_order() {
        let features = features_for("kidney_disease");
        assert_eq!(features[0], "age");
        assert_eq!(features[2], "albumin");
        assert_eq!(features[6], "blood_glucose");
    }

    #[test]
    fn test_labels() {
        assert_eq!(Disease::Diabetes.outcome_labels(), ["No Diabetes", "Diabetes Detected"]);
        assert_eq!(Disease::BreastCancer.outcome_label(1), Some("Malignant Tumor"));
        assert_eq!(Disease::BreastCancer.outcome_label(2), None);
    }

    #[test]
    fn test_feature_index() {
        assert_eq!(Disease::Pneumonia.feature_index("fever"), Some(0));
        assert_eq!(Disease::Pneumonia.feature_index("chills"), Some(6));
        assert_eq!(Disease::Pneumonia.feature_index("glucose"), None);
    }

    #[test]
    fn test_layout_hashes_distinct() {
        // covid and pneumonia share names but not order
        assert_ne!(Disease::Covid.layout_hash(), Disease::Pneumonia.layout_hash());

        let mut hashes: Vec<u32> = Disease::ALL.iter().map(|d| d.layout_hash()).collect();
        hashes.sort_unstable();
        hashes.dedup();
        assert_eq!(hashes.len(), 8);
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::for_disease(Disease::Alzheimer);
        assert_eq!(info.version, FEATURE_VERSION);
        assert_eq!(info.feature_count, 6);
        assert_eq!(info.feature_names[1], "memory_loss");
        assert_eq!(info.hash, Disease::Alzheimer.layout_hash());
    }
}
