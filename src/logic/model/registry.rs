//! Model Registry
//!
//! Trains one scaler + classifier per disease at startup and holds them
//! immutably afterwards. Built once, then shared read-only (wrap in `Arc`
//! to hand it to several threads).

use std::collections::BTreeMap;
use std::time::Instant;

use ndarray::Array2;

use super::classifier::{Classifier, ClassifierKind, ProbabilisticClassifier};
use super::scaler::StandardScaler;
use crate::config::TrainingConfig;
use crate::error::{DiagnosError, Result};
use crate::logic::dataset::SyntheticDataset;
use crate::logic::features::{Disease, FeatureVector};

// ============================================================================
// TRAINED MODEL
// ============================================================================

/// Scaler and classifier fitted for one disease
#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub disease: Disease,
    pub scaler: StandardScaler,
    pub classifier: Classifier,
    /// Layout the model was trained against
    pub layout_hash: u32,
    /// `[negatives, positives]` in the training labels
    pub class_counts: [usize; 2],
    /// Risk score value the labels were cut at
    pub label_threshold: f64,
}

impl TrainedModel {
    /// Generate the synthetic dataset, fit the scaler, then the classifier
    pub fn train(disease: Disease, config: &TrainingConfig) -> Result<Self> {
        let dataset = SyntheticDataset::generate(disease, config)?;
        let class_counts = dataset.class_counts();
        log::info!(
            "Training {} - classes [0, 1], counts [{}, {}]",
            disease,
            class_counts[0],
            class_counts[1]
        );

        let (scaler, scaled) = StandardScaler::fit_transform(&dataset.features)?;
        let kind = ClassifierKind::for_disease(disease);
        let classifier = Classifier::fit(kind, &scaled, &dataset.labels, config)?;
        log::info!(
            "Trained {} model ({}) - {} positive, {} negative cases",
            disease,
            kind,
            class_counts[1],
            class_counts[0]
        );

        Ok(Self {
            disease,
            scaler,
            classifier,
            layout_hash: disease.layout_hash(),
            class_counts,
            label_threshold: dataset.threshold,
        })
    }

    pub fn kind(&self) -> ClassifierKind {
        self.classifier.kind()
    }

    /// Class probabilities for one feature vector
    pub fn predict_proba(&self, vector: &FeatureVector) -> Result<[f64; 2]> {
        if vector.disease != self.disease {
            return Err(DiagnosError::LayoutMismatch {
                disease: self.disease.id().to_string(),
                expected: self.layout_hash,
                actual: vector.layout_hash,
            });
        }
        vector.validate()?;
        if vector.values.iter().any(|v| !v.is_finite()) {
            return Err(DiagnosError::NonFinite {
                disease: self.disease.id().to_string(),
                what: "symptom values".to_string(),
            });
        }

        let row: Array2<f64> = vector.to_row()?;
        let scaled = self.scaler.transform(&row)?;
        let scaled_row = scaled.row(0);
        Ok(self.classifier.predict_proba_row(scaled_row))
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Every disease's trained model, keyed by disease
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    config: TrainingConfig,
    models: BTreeMap<Disease, TrainedModel>,
}

impl ModelRegistry {
    /// Train all diseases. Any failure aborts the whole run.
    pub fn train(config: &TrainingConfig) -> Result<Self> {
        config.validate()?;

        let started = Instant::now();
        let mut models = BTreeMap::new();
        let mut totals = [0usize; 2];

        for disease in Disease::ALL {
            let model = TrainedModel::train(disease, config)?;
            log::debug!("{} trained with {}", disease, model.kind());
            totals[0] += model.class_counts[0];
            totals[1] += model.class_counts[1];
            models.insert(disease, model);
        }

        log::info!(
            "All {} disease models trained in {:.2}s ({} negative / {} positive samples)",
            models.len(),
            started.elapsed().as_secs_f64(),
            totals[0],
            totals[1]
        );

        Ok(Self {
            config: config.clone(),
            models,
        })
    }

    pub fn get(&self, disease: Disease) -> Option<&TrainedModel> {
        self.models.get(&disease)
    }

    /// Lookup by disease id
    pub fn get_by_id(&self, disease_id: &str) -> Option<&TrainedModel> {
        Disease::from_id(disease_id).and_then(|d| self.get(d))
    }

    pub fn diseases(&self) -> impl Iterator<Item = Disease> + '_ {
        self.models.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> TrainingConfig {
        TrainingConfig {
            seed: 42,
            n_samples: 200,
            n_estimators: 10,
        }
    }

    #[test]
    fn test_registry_covers_every_disease() {
        let registry = ModelRegistry::train(&small_config()).unwrap();
        assert_eq!(registry.len(), Disease::ALL.len());
        for disease in Disease::ALL {
            let model = registry.get(disease).unwrap();
            assert_eq!(model.scaler.n_features(), disease.feature_count());
            assert_eq!(model.kind(), ClassifierKind::for_disease(disease));
            assert!(model.class_counts[0] > 0 && model.class_counts[1] > 0);
        }
        assert!(registry.get_by_id("flu").is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = TrainingConfig { n_estimators: 0, ..small_config() };
        assert!(ModelRegistry::train(&config).is_err());
    }

    #[test]
    fn test_predict_proba_rejects_other_disease() {
        let model = TrainedModel::train(Disease::Covid, &small_config()).unwrap();
        let vector = FeatureVector::new(Disease::Diabetes);
        assert!(model.predict_proba(&vector).is_err());

        let mut vector = FeatureVector::new(Disease::Covid);
        vector.values[0] = f64::NAN;
        assert!(matches!(model.predict_proba(&vector), Err(DiagnosError::NonFinite { .. })));
    }
}
