//! Synthetic Feature Generators
//!
//! Each feature column is drawn from a distribution that loosely resembles
//! the clinical quantity it stands for. Diseases without a bespoke recipe
//! use the generic standard-normal generator.

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand_distr::{Bernoulli, Distribution, Exp, Normal, Poisson};

use crate::error::{DiagnosError, Result};
use crate::logic::features::Disease;

// ============================================================================
// COLUMN DISTRIBUTIONS
// ============================================================================

/// Distribution of one synthetic feature column
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnDist {
    /// Continuous measurements (age, blood pressure, lab values)
    Normal { mean: f64, sd: f64 },
    /// Present/absent symptom flags
    Bernoulli { p: f64 },
    /// Small counts (pregnancies)
    Poisson { lambda: f64 },
    /// Skewed severities (fever)
    Exponential { scale: f64 },
}

impl ColumnDist {
    /// Draw `n` values
    pub fn sample(&self, rng: &mut StdRng, n: usize) -> Result<Vec<f64>> {
        let column = match *self {
            ColumnDist::Normal { mean, sd } => {
                let dist = Normal::new(mean, sd).map_err(|e| dist_error(self, e))?;
                (0..n).map(|_| dist.sample(rng)).collect()
            }
            ColumnDist::Bernoulli { p } => {
                let dist = Bernoulli::new(p).map_err(|e| dist_error(self, e))?;
                (0..n).map(|_| if dist.sample(rng) { 1.0 } else { 0.0 }).collect()
            }
            ColumnDist::Poisson { lambda } => {
                let dist = Poisson::new(lambda).map_err(|e| dist_error(self, e))?;
                (0..n).map(|_| dist.sample(rng)).collect()
            }
            ColumnDist::Exponential { scale } => {
                let dist = Exp::new(1.0 / scale).map_err(|e| dist_error(self, e))?;
                (0..n).map(|_| dist.sample(rng)).collect()
            }
        };
        Ok(column)
    }
}

fn dist_error(dist: &ColumnDist, err: impl std::fmt::Display) -> DiagnosError {
    DiagnosError::Distribution(format!("{:?}: {}", dist, err))
}

// ============================================================================
// BESPOKE RECIPES
// ============================================================================

/// How a disease's synthetic data is produced
#[derive(Debug, Clone, Copy)]
pub struct GeneratorSpec {
    /// One distribution per schema feature, in schema order
    pub columns: &'static [ColumnDist],
    /// `(column, weight)` terms of the linear risk score
    pub weights: &'static [(usize, f64)],
    /// Standard deviation of the Gaussian noise added to the risk score
    pub noise_sd: f64,
    /// Empirical percentile of the risk score used as label threshold
    pub percentile: f64,
}

const DIABETES: GeneratorSpec = GeneratorSpec {
    columns: &[
        ColumnDist::Normal { mean: 50.0, sd: 15.0 },  // age
        ColumnDist::Normal { mean: 120.0, sd: 20.0 }, // blood_pressure
        ColumnDist::Normal { mean: 100.0, sd: 30.0 }, // glucose
        ColumnDist::Normal { mean: 25.0, sd: 5.0 },   // bmi
        ColumnDist::Poisson { lambda: 1.0 },          // pregnancies
        ColumnDist::Normal { mean: 20.0, sd: 10.0 },  // skin_thickness
        ColumnDist::Normal { mean: 80.0, sd: 40.0 },  // insulin
        ColumnDist::Normal { mean: 0.5, sd: 0.2 },    // diabetes_pedigree
    ],
    weights: &[(1, 0.05), (2, 0.1)],
    noise_sd: 0.5,
    percentile: 50.0,
};

const COVID: GeneratorSpec = GeneratorSpec {
    columns: &[
        ColumnDist::Exponential { scale: 2.0 }, // fever
        ColumnDist::Bernoulli { p: 0.5 },       // cough
        ColumnDist::Bernoulli { p: 0.5 },       // fatigue
        ColumnDist::Bernoulli { p: 0.4 },       // breathing_difficulty
        ColumnDist::Bernoulli { p: 0.3 },       // chest_pain
        ColumnDist::Bernoulli { p: 0.4 },       // sore_throat
        ColumnDist::Bernoulli { p: 0.3 },       // loss_of_taste
    ],
    weights: &[(0, 0.2), (1, 0.3), (2, 0.2)],
    noise_sd: 0.3,
    percentile: 60.0,
};

const PNEUMONIA: GeneratorSpec = GeneratorSpec {
    columns: &[
        ColumnDist::Exponential { scale: 1.5 }, // fever
        ColumnDist::Bernoulli { p: 0.6 },       // cough
        ColumnDist::Bernoulli { p: 0.4 },       // chest_pain
        ColumnDist::Bernoulli { p: 0.5 },       // breathing_difficulty
        ColumnDist::Bernoulli { p: 0.5 },       // fatigue
        ColumnDist::Bernoulli { p: 0.3 },       // sweating
        ColumnDist::Bernoulli { p: 0.4 },       // chills
    ],
    weights: &[(0, 0.3), (1, 0.2), (2, 0.2)],
    noise_sd: 0.3,
    percentile: 55.0,
};

const KIDNEY_DISEASE: GeneratorSpec = GeneratorSpec {
    columns: &[
        ColumnDist::Normal { mean: 50.0, sd: 15.0 },  // age
        ColumnDist::Normal { mean: 120.0, sd: 20.0 }, // blood_pressure
        ColumnDist::Normal { mean: 1.5, sd: 0.5 },    // albumin
        ColumnDist::Normal { mean: 100.0, sd: 30.0 }, // sugar
        ColumnDist::Bernoulli { p: 0.3 },             // red_blood_cells
        ColumnDist::Bernoulli { p: 0.4 },             // pus_cells
        ColumnDist::Normal { mean: 90.0, sd: 25.0 },  // blood_glucose
    ],
    weights: &[(0, 0.05), (1, 0.05), (2, 0.3)],
    noise_sd: 0.4,
    percentile: 50.0,
};

/// Generic generator parameters
pub const GENERIC_COEFFICIENT_SD: f64 = 0.5;
pub const GENERIC_NOISE_SD: f64 = 0.5;
pub const GENERIC_PERCENTILE: f64 = 50.0;

/// Bespoke recipe for a disease, `None` means the generic generator
pub fn bespoke_spec(disease: Disease) -> Option<&'static GeneratorSpec> {
    match disease {
        Disease::Diabetes => Some(&DIABETES),
        Disease::Covid => Some(&COVID),
        Disease::Pneumonia => Some(&PNEUMONIA),
        Disease::KidneyDisease => Some(&KIDNEY_DISEASE),
        Disease::BreastCancer
        | Disease::Alzheimer
        | Disease::BrainTumor
        | Disease::HepatitisC => None,
    }
}

// ============================================================================
// GENERATION
// ============================================================================

/// Unlabelled synthetic samples plus the risk score they will be labelled by
#[derive(Debug, Clone)]
pub struct RawSamples {
    /// `n_samples x n_features`, schema column order
    pub features: Array2<f64>,
    /// Per-sample latent risk score
    pub risk_scores: Vec<f64>,
    /// Percentile of `risk_scores` used as label threshold
    pub percentile: f64,
}

/// Draw the feature matrix and risk scores for one disease
pub fn generate(disease: Disease, n_samples: usize, rng: &mut StdRng) -> Result<RawSamples> {
    match bespoke_spec(disease) {
        Some(spec) => generate_bespoke(spec, n_samples, rng),
        None => generate_generic(disease.feature_count(), n_samples, rng),
    }
}

/// Columns drawn one after another, then the noisy weighted risk score
fn generate_bespoke(
    spec: &GeneratorSpec,
    n_samples: usize,
    rng: &mut StdRng,
) -> Result<RawSamples> {
    let n_features = spec.columns.len();
    let mut features = Array2::<f64>::zeros((n_samples, n_features));

    for (j, dist) in spec.columns.iter().enumerate() {
        let column = dist.sample(rng, n_samples)?;
        features.column_mut(j).assign(&Array1::from(column));
    }

    let noise = ColumnDist::Normal { mean: 0.0, sd: spec.noise_sd }.sample(rng, n_samples)?;

    let risk_scores = noise
        .iter()
        .enumerate()
        .map(|(i, eps)| {
            spec.weights
                .iter()
                .map(|&(j, w)| features[[i, j]] * w)
                .sum::<f64>()
                + eps
        })
        .collect();

    Ok(RawSamples {
        features,
        risk_scores,
        percentile: spec.percentile,
    })
}

/// Every feature i.i.d. standard normal, risk = X · coefficients + noise
fn generate_generic(n_features: usize, n_samples: usize, rng: &mut StdRng) -> Result<RawSamples> {
    let values = ColumnDist::Normal { mean: 0.0, sd: 1.0 }.sample(rng, n_samples * n_features)?;
    let features = Array2::from_shape_vec((n_samples, n_features), values)?;

    let coefficients = Array1::from(
        ColumnDist::Normal { mean: 0.0, sd: GENERIC_COEFFICIENT_SD }.sample(rng, n_features)?,
    );
    let noise = Array1::from(
        ColumnDist::Normal { mean: 0.0, sd: GENERIC_NOISE_SD }.sample(rng, n_samples)?,
    );

    let risk_scores = (features.dot(&coefficients) + noise).to_vec();

    Ok(RawSamples {
        features,
        risk_scores,
        percentile: GENERIC_PERCENTILE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_bespoke_columns_match_schema() {
        for disease in Disease::ALL {
            if let Some(spec) = bespoke_spec(disease) {
                assert_eq!(spec.columns.len(), disease.feature_count(), "{}", disease);
                assert!(spec.weights.iter().all(|&(j, _)| j < spec.columns.len()));
            }
        }
    }

    #[test]
    fn test_generated_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        for disease in Disease::ALL {
            let raw = generate(disease, 200, &mut rng).unwrap();
            assert_eq!(raw.features.dim(), (200, disease.feature_count()));
            assert_eq!(raw.risk_scores.len(), 200);
        }
    }

    #[test]
    fn test_bernoulli_columns_are_binary() {
        let mut rng = StdRng::seed_from_u64(7);
        let raw = generate(Disease::Covid, 500, &mut rng).unwrap();
        for j in 1..7 {
            assert!(raw.features.column(j).iter().all(|&v| v == 0.0 || v == 1.0));
        }
        // fever is exponential: non-negative
        assert!(raw.features.column(0).iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_normal_column_roughly_centered() {
        let mut rng = StdRng::seed_from_u64(42);
        let raw = generate(Disease::Diabetes, 1000, &mut rng).unwrap();
        let age_mean = raw.features.column(0).mean().unwrap();
        assert!((age_mean - 50.0).abs() < 3.0, "age mean {}", age_mean);
    }

    #[test]
    fn test_same_seed_same_samples() {
        let a = generate(Disease::Alzheimer, 100, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate(Disease::Alzheimer, 100, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a.features, b.features);
        assert_eq!(a.risk_scores, b.risk_scores);
    }

    #[test]
    fn test_invalid_distribution_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(ColumnDist::Bernoulli { p: 1.5 }.sample(&mut rng, 10).is_err());
        assert!(ColumnDist::Normal { mean: 0.0, sd: -1.0 }.sample(&mut rng, 10).is_err());
    }
}
