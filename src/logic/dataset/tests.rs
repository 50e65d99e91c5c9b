use ndarray::array;

use super::{check_finite, RawSamples, SyntheticDataset};
use crate::config::TrainingConfig;
use crate::error::DiagnosError;
use crate::logic::features::Disease;

fn raw(features: ndarray::Array2<f64>, risk_scores: Vec<f64>) -> RawSamples {
    RawSamples {
        features,
        risk_scores,
        percentile: 50.0,
    }
}

#[test]
fn test_every_disease_has_both_classes() {
    let config = TrainingConfig::default();
    for disease in Disease::ALL {
        let dataset = SyntheticDataset::generate(disease, &config).unwrap();
        let [neg, pos] = dataset.class_counts();
        assert!(neg >= 1 && pos >= 1, "{}: {} / {}", disease, neg, pos);
        assert_eq!(dataset.n_samples(), 1000);
        assert_eq!(dataset.features.ncols(), disease.feature_count());
    }
}

#[test]
fn test_percentile_split_ratio() {
    let config = TrainingConfig::default();

    // 60th percentile → ~40% positives
    let covid = SyntheticDataset::generate(Disease::Covid, &config).unwrap();
    let [_, pos] = covid.class_counts();
    assert!((350..=450).contains(&pos), "covid positives {}", pos);

    // 50th percentile → ~50% positives
    let diabetes = SyntheticDataset::generate(Disease::Diabetes, &config).unwrap();
    let [_, pos] = diabetes.class_counts();
    assert!((450..=550).contains(&pos), "diabetes positives {}", pos);
}

#[test]
fn test_generation_is_deterministic() {
    let config = TrainingConfig::default();
    let a = SyntheticDataset::generate(Disease::BrainTumor, &config).unwrap();
    let b = SyntheticDataset::generate(Disease::BrainTumor, &config).unwrap();
    assert_eq!(a.features, b.features);
    assert_eq!(a.labels, b.labels);
    assert_eq!(a.threshold, b.threshold);
}

#[test]
fn test_seed_changes_data() {
    let a = SyntheticDataset::generate(Disease::Diabetes, &TrainingConfig::default()).unwrap();
    let b = SyntheticDataset::generate(
        Disease::Diabetes,
        &TrainingConfig { seed: 7, ..Default::default() },
    )
    .unwrap();
    assert_ne!(a.features, b.features);
}

#[test]
fn test_tiny_dataset_still_two_classes() {
    let config = TrainingConfig { n_samples: 2, ..Default::default() };
    for disease in Disease::ALL {
        let dataset = SyntheticDataset::generate(disease, &config).unwrap();
        assert!(dataset.has_both_classes(), "{}", disease);
    }
}

#[test]
fn test_nan_feature_rejected() {
    let samples = raw(array![[1.0, f64::NAN], [0.5, 2.0]], vec![0.1, 0.9]);
    let err = check_finite(Disease::Diabetes, &samples).unwrap_err();
    match err {
        DiagnosError::NonFinite { disease, what } => {
            assert_eq!(disease, "diabetes");
            assert_eq!(what, "synthetic features");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_infinite_risk_score_rejected() {
    let samples = raw(array![[1.0], [2.0]], vec![0.3, f64::INFINITY]);
    assert!(matches!(
        check_finite(Disease::Covid, &samples),
        Err(DiagnosError::NonFinite { what, .. }) if what == "risk scores"
    ));
}

#[test]
fn test_finite_samples_pass() {
    let samples = raw(array![[1.0, -3.5], [0.0, 2.0]], vec![-0.2, 0.7]);
    assert!(check_finite(Disease::Alzheimer, &samples).is_ok());
}
