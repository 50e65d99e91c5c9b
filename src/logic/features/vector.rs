//! Feature Vector - Core data structure for model input
//!
//! **Versioned feature vector with layout validation**
//!
//! Built from a symptom map by reading each schema feature by name,
//! so the order of keys in the map never matters.

use std::collections::HashMap;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::layout::{Disease, FEATURE_VERSION};
use crate::error::{DiagnosError, Result};

/// Symptom values keyed by feature name, as supplied per request
pub type SymptomMap = HashMap<String, f64>;

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned Feature Vector with layout metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Disease whose schema defines the column order
    pub disease: Disease,
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the disease layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature values in schema order
    pub values: Vec<f64>,
}

impl FeatureVector {
    /// Create a new zeroed feature vector for a disease
    pub fn new(disease: Disease) -> Self {
        Self {
            disease,
            version: FEATURE_VERSION,
            layout_hash: disease.layout_hash(),
            values: vec![0.0; disease.feature_count()],
        }
    }

    /// Read every schema feature from the map; missing keys stay 0.0
    pub fn from_symptoms(disease: Disease, symptoms: &SymptomMap) -> Self {
        let values = disease
            .features()
            .iter()
            .map(|name| symptoms.get(*name).copied().unwrap_or(0.0))
            .collect();

        Self {
            disease,
            version: FEATURE_VERSION,
            layout_hash: disease.layout_hash(),
            values,
        }
    }

    /// Get values as slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check that the vector still matches its disease layout
    pub fn validate(&self) -> Result<()> {
        let expected = self.disease.layout_hash();
        if self.version != FEATURE_VERSION || self.layout_hash != expected {
            return Err(DiagnosError::LayoutMismatch {
                disease: self.disease.id().to_string(),
                expected,
                actual: self.layout_hash,
            });
        }
        if self.values.len() != self.disease.feature_count() {
            return Err(DiagnosError::FeatureLength {
                expected: self.disease.feature_count(),
                actual: self.values.len(),
            });
        }
        Ok(())
    }

    /// Single-row matrix for the scaler and classifier
    pub fn to_row(&self) -> Result<Array2<f64>> {
        Ok(Array2::from_shape_vec((1, self.values.len()), self.values.clone())?)
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "disease": self.disease.id(),
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "values": self.values,
            "named_values": self.disease.features().iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<HashMap<_, _>>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symptoms(pairs: &[(&str, f64)]) -> SymptomMap {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_missing_features_default_to_zero() {
        let vector = FeatureVector::from_symptoms(Disease::Covid, &SymptomMap::new());
        assert_eq!(vector.len(), 7);
        assert!(vector.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_values_follow_schema_order() {
        let map = symptoms(&[("glucose", 180.0), ("age", 65.0), ("bmi", 32.0)]);
        let vector = FeatureVector::from_symptoms(Disease::Diabetes, &map);
        assert_eq!(vector.values[0], 65.0);
        assert_eq!(vector.values[2], 180.0);
        assert_eq!(vector.values[3], 32.0);
        assert_eq!(vector.values[1], 0.0);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let map = symptoms(&[("fever", 2.5), ("glucose", 300.0)]);
        let vector = FeatureVector::from_symptoms(Disease::Pneumonia, &map);
        assert_eq!(vector.values[0], 2.5);
        assert_eq!(vector.as_slice().iter().sum::<f64>(), 2.5);
    }

    #[test]
    fn test_log_entry_names_values() {
        let map = symptoms(&[("bilirubin", 1.2)]);
        let entry = FeatureVector::from_symptoms(Disease::HepatitisC, &map).to_log_entry();
        assert_eq!(entry["disease"], "hepatitis_c");
        assert_eq!(entry["named_values"]["bilirubin"], 1.2);
        assert_eq!(entry["values"].as_array().unwrap().len(), 6);
        assert_eq!(entry["layout_hash"], Disease::HepatitisC.layout_hash());
    }

    #[test]
    fn test_validate() {
        let mut vector = FeatureVector::new(Disease::BrainTumor);
        assert!(vector.validate().is_ok());

        vector.layout_hash = Disease::Covid.layout_hash();
        assert!(vector.validate().is_err());

        let mut short = FeatureVector::new(Disease::BrainTumor);
        short.values.pop();
        assert!(matches!(short.validate(), Err(DiagnosError::FeatureLength { .. })));
    }

    #[test]
    fn test_to_row_shape() {
        let row = FeatureVector::new(Disease::Alzheimer).to_row().unwrap();
        assert_eq!(row.dim(), (1, 6));
    }
}
