//! Dataset Module - Synthetic Training Data
//!
//! Bootstraps one labelled training set per disease at startup.
//! Non-clinical data, generated from a fixed seed so every run trains the
//! same models.
//!
//! ## Structure
//! - `generators`: per-disease column distributions and risk recipes
//! - `labels`: percentile thresholding and the degenerate-label guard

pub mod generators;
pub mod labels;

#[cfg(test)]
mod tests;

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::TrainingConfig;
use crate::error::{DiagnosError, Result};
use crate::logic::features::Disease;

pub use generators::{ColumnDist, GeneratorSpec, RawSamples};

/// Labelled synthetic training set for one disease
#[derive(Debug, Clone)]
pub struct SyntheticDataset {
    pub disease: Disease,
    /// `n_samples x n_features`, schema column order
    pub features: Array2<f64>,
    /// 0 = negative/healthy, 1 = disease detected
    pub labels: Vec<u8>,
    /// Risk score value the labels were cut at
    pub threshold: f64,
    /// Whether the degenerate-label guard had to rewrite the labels
    pub repaired: bool,
}

impl SyntheticDataset {
    /// Generate and label a dataset from a fresh RNG seeded with `config.seed`
    pub fn generate(disease: Disease, config: &TrainingConfig) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        Self::generate_with_rng(disease, config.n_samples, &mut rng)
    }

    pub fn generate_with_rng(
        disease: Disease,
        n_samples: usize,
        rng: &mut StdRng,
    ) -> Result<Self> {
        let raw = generators::generate(disease, n_samples, rng)?;
        check_finite(disease, &raw)?;

        let threshold = labels::percentile(&raw.risk_scores, raw.percentile);
        let mut y = labels::threshold_labels(&raw.risk_scores, threshold);

        let repaired = labels::ensure_both_classes(&mut y, rng);
        if repaired {
            log::warn!("{} labels collapsed to one class, forced a 50/50 split", disease);
        }

        Ok(Self {
            disease,
            features: raw.features,
            labels: y,
            threshold,
            repaired,
        })
    }

    pub fn n_samples(&self) -> usize {
        self.labels.len()
    }

    /// `[negatives, positives]`
    pub fn class_counts(&self) -> [usize; 2] {
        labels::class_counts(&self.labels)
    }

    pub fn has_both_classes(&self) -> bool {
        labels::has_both_classes(&self.labels)
    }
}

/// Reject generated samples carrying NaN or infinite values
pub fn check_finite(disease: Disease, raw: &RawSamples) -> Result<()> {
    let non_finite = |what: &str| DiagnosError::NonFinite {
        disease: disease.id().to_string(),
        what: what.to_string(),
    };

    if raw.features.iter().any(|v| !v.is_finite()) {
        return Err(non_finite("synthetic features"));
    }
    if raw.risk_scores.iter().any(|v| !v.is_finite()) {
        return Err(non_finite("risk scores"));
    }
    Ok(())
}
