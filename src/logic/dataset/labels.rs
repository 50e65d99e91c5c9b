//! Label Assignment
//!
//! Labels come from thresholding the risk score at its own empirical
//! percentile, so the split stays near the requested ratio whatever the
//! scale of the score. A single-class outcome is repaired before fitting.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Empirical percentile with linear interpolation between order statistics
pub fn percentile(values: &[f64], pct: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = (pct.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

/// `1` where the score is strictly above the threshold, else `0`
pub fn threshold_labels(scores: &[f64], threshold: f64) -> Vec<u8> {
    scores.iter().map(|&s| u8::from(s > threshold)).collect()
}

/// `[negatives, positives]`
pub fn class_counts(labels: &[u8]) -> [usize; 2] {
    let positives = labels.iter().filter(|&&y| y == 1).count();
    [labels.len() - positives, positives]
}

pub fn has_both_classes(labels: &[u8]) -> bool {
    let [negatives, positives] = class_counts(labels);
    negatives > 0 && positives > 0
}

/// Degenerate-label guard.
///
/// When every label is the same, overwrite with 0s then 1s (two halves)
/// and shuffle. Returns whether a repair happened.
pub fn ensure_both_classes(labels: &mut [u8], rng: &mut StdRng) -> bool {
    if labels.len() < 2 || has_both_classes(labels) {
        return false;
    }

    let half = labels.len() / 2;
    for (i, y) in labels.iter_mut().enumerate() {
        *y = u8::from(i >= half);
    }
    labels.shuffle(rng);

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_percentile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&values, 0.0), 1.0);
        assert_eq!(percentile(&values, 100.0), 4.0);
        assert!((percentile(&values, 50.0) - 2.5).abs() < 1e-12);
        // rank 0.6 * 3 = 1.8 → 2.0 + 0.8
        assert!((percentile(&values, 60.0) - 2.8).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_unsorted_input() {
        let values = [5.0, 1.0, 3.0];
        assert_eq!(percentile(&values, 50.0), 3.0);
    }

    #[test]
    fn test_threshold_is_strict() {
        let labels = threshold_labels(&[1.0, 2.0, 3.0], 2.0);
        assert_eq!(labels, vec![0, 0, 1]);
    }

    #[test]
    fn test_self_referential_split_is_balanced() {
        let scores: Vec<f64> = (0..1000).map(|i| (i as f64) * 1e6).collect();
        let labels = threshold_labels(&scores, percentile(&scores, 60.0));
        let [neg, pos] = class_counts(&labels);
        assert_eq!(neg, 600);
        assert_eq!(pos, 400);
    }

    #[test]
    fn test_constant_scores_need_repair() {
        let scores = vec![0.7; 100];
        let mut labels = threshold_labels(&scores, percentile(&scores, 50.0));
        assert!(!has_both_classes(&labels));

        let mut rng = StdRng::seed_from_u64(42);
        assert!(ensure_both_classes(&mut labels, &mut rng));
        assert_eq!(class_counts(&labels), [50, 50]);
    }

    #[test]
    fn test_repair_odd_length() {
        let mut labels = vec![1u8; 7];
        let mut rng = StdRng::seed_from_u64(1);
        assert!(ensure_both_classes(&mut labels, &mut rng));
        assert_eq!(class_counts(&labels), [3, 4]);
    }

    #[test]
    fn test_no_repair_when_balanced() {
        let mut labels = vec![0, 1, 0, 1];
        let mut rng = StdRng::seed_from_u64(42);
        assert!(!ensure_both_classes(&mut labels, &mut rng));
        assert_eq!(labels, vec![0, 1, 0, 1]);
    }
}
