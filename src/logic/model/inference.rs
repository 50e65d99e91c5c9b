//! Inference - Disease Predictor
//!
//! Front door for predictions. Resolves the disease, builds the feature
//! vector from the symptom map, scales it and reads the winning class.
//!
//! `predict` never fails: unknown diseases and inference errors come back as
//! an error-shaped `PredictionResult`.

use super::classifier::argmax;
use super::registry::{ModelRegistry, TrainedModel};
use super::threshold::{to_confidence, RiskThresholds};
use super::types::PredictionResult;
use crate::config::TrainingConfig;
use crate::error::{DiagnosError, Result};
use crate::logic::features::{self, Disease, FeatureVector, SymptomMap};

/// Read-only predictor over a trained registry
#[derive(Debug, Clone)]
pub struct DiseasePredictor {
    registry: ModelRegistry,
    thresholds: RiskThresholds,
}

impl DiseasePredictor {
    pub fn new(registry: ModelRegistry) -> Self {
        Self {
            registry,
            thresholds: RiskThresholds::default(),
        }
    }

    /// Train a fresh registry and wrap it
    pub fn from_config(config: &TrainingConfig) -> Result<Self> {
        Ok(Self::new(ModelRegistry::train(config)?))
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Ordered feature names, empty for unknown diseases
    pub fn features_for(&self, disease_id: &str) -> &'static [&'static str] {
        features::features_for(disease_id)
    }

    /// Predict; every failure is folded into the result
    pub fn predict(&self, disease_id: &str, symptoms: &SymptomMap) -> PredictionResult {
        match self.try_predict(disease_id, symptoms) {
            Ok(result) => result,
            Err(e) => {
                log::warn!("Prediction for {} failed: {}", disease_id, e);
                PredictionResult::error(e.to_string())
            }
        }
    }

    /// Predict, surfacing failures as errors
    pub fn try_predict(&self, disease_id: &str, symptoms: &SymptomMap) -> Result<PredictionResult> {
        let model = self.model_for(disease_id)?;
        let vector = FeatureVector::from_symptoms(model.disease, symptoms);
        log::debug!("{} input {}", model.disease, vector.to_log_entry());
        let proba = model.predict_proba(&vector)?;

        let class = argmax(&proba);
        let prediction = model
            .disease
            .outcome_label(class)
            .ok_or_else(|| DiagnosError::Training(format!("no label for class {}", class)))?;

        // Tier is read from the rounded percentage
        let confidence = to_confidence(proba[class]);
        let risk_level = self.thresholds.classify(confidence);

        log::debug!(
            "{} → {} ({:.2}%, {})",
            model.disease,
            prediction,
            confidence,
            risk_level
        );

        Ok(PredictionResult {
            prediction: prediction.to_string(),
            confidence,
            risk_level,
            error: None,
        })
    }

    fn model_for(&self, disease_id: &str) -> Result<&TrainedModel> {
        Disease::from_id(disease_id)
            .and_then(|d| self.registry.get(d))
            .ok_or_else(|| DiagnosError::UnknownDisease(disease_id.to_string()))
    }
}
