//! Classifier selection
//!
//! Each disease gets one of two ensemble families. The set is closed, so
//! dispatch goes through an enum; the `ProbabilisticClassifier` trait is the
//! seam both families implement.

use std::fmt;

use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use super::boosting::{BoostingParams, GradientBoostingClassifier};
use super::forest::{ForestParams, RandomForestClassifier};
use crate::config::TrainingConfig;
use crate::error::{DiagnosError, Result};
use crate::logic::dataset::labels;
use crate::logic::features::Disease;

/// Binary classifier producing class probabilities per row
pub trait ProbabilisticClassifier {
    /// `[P(class 0), P(class 1)]`
    fn predict_proba_row(&self, row: ArrayView1<f64>) -> [f64; 2];

    fn n_features(&self) -> usize;

    /// Winning class index, ties go to class 0
    fn predict_row(&self, row: ArrayView1<f64>) -> usize {
        argmax(&self.predict_proba_row(row))
    }
}

impl ProbabilisticClassifier for GradientBoostingClassifier {
    fn predict_proba_row(&self, row: ArrayView1<f64>) -> [f64; 2] {
        GradientBoostingClassifier::predict_proba_row(self, row)
    }

    fn n_features(&self) -> usize {
        GradientBoostingClassifier::n_features(self)
    }
}

impl ProbabilisticClassifier for RandomForestClassifier {
    fn predict_proba_row(&self, row: ArrayView1<f64>) -> [f64; 2] {
        RandomForestClassifier::predict_proba_row(self, row)
    }

    fn n_features(&self) -> usize {
        RandomForestClassifier::n_features(self)
    }
}

pub fn argmax(proba: &[f64; 2]) -> usize {
    usize::from(proba[1] > proba[0])
}

/// Ensemble family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    GradientBoosting,
    RandomForest,
}

impl ClassifierKind {
    pub fn for_disease(disease: Disease) -> Self {
        match disease {
            Disease::Diabetes
            | Disease::Covid
            | Disease::Pneumonia
            | Disease::KidneyDisease => ClassifierKind::GradientBoosting,
            Disease::BreastCancer
            | Disease::Alzheimer
            | Disease::BrainTumor
            | Disease::HepatitisC => ClassifierKind::RandomForest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierKind::GradientBoosting => "gradient_boosting",
            ClassifierKind::RandomForest => "random_forest",
        }
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fitted classifier of either family
#[derive(Debug, Clone, PartialEq)]
pub enum Classifier {
    GradientBoosting(GradientBoostingClassifier),
    RandomForest(RandomForestClassifier),
}

impl Classifier {
    /// Fit on standardized features. Both classes must be present.
    pub fn fit(
        kind: ClassifierKind,
        x: &Array2<f64>,
        y: &[u8],
        config: &TrainingConfig,
    ) -> Result<Self> {
        if !labels::has_both_classes(y) {
            return Err(DiagnosError::Training(format!(
                "{} needs both classes, got counts {:?}",
                kind,
                labels::class_counts(y)
            )));
        }

        let classifier = match kind {
            ClassifierKind::GradientBoosting => {
                let params = BoostingParams {
                    n_estimators: config.n_estimators,
                    ..Default::default()
                };
                let model = GradientBoostingClassifier::fit(x, y, params, config.seed)?;
                Classifier::GradientBoosting(model)
            }
            ClassifierKind::RandomForest => {
                let params = ForestParams {
                    n_estimators: config.n_estimators,
                    ..Default::default()
                };
                let model = RandomForestClassifier::fit(x, y, params, config.seed)?;
                Classifier::RandomForest(model)
            }
        };

        Ok(classifier)
    }

    pub fn kind(&self) -> ClassifierKind {
        match self {
            Classifier::GradientBoosting(_) => ClassifierKind::GradientBoosting,
            Classifier::RandomForest(_) => ClassifierKind::RandomForest,
        }
    }

    fn inner(&self) -> &dyn ProbabilisticClassifier {
        match self {
            Classifier::GradientBoosting(model) => model,
            Classifier::RandomForest(model) => model,
        }
    }
}

impl ProbabilisticClassifier for Classifier {
    fn predict_proba_row(&self, row: ArrayView1<f64>) -> [f64; 2] {
        self.inner().predict_proba_row(row)
    }

    fn n_features(&self) -> usize {
        self.inner().n_features()
    }
}
