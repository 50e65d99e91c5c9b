//! Random Forest Classifier
//!
//! Bagged, fully grown trees with `sqrt(n_features)` candidates per split.
//! Trees are fitted on the 0/1 target so each leaf holds the positive-class
//! fraction of its bootstrap rows; the forest averages those fractions.

use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::tree::{RegressionTree, TreeParams};
use crate::error::{DiagnosError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_estimators: usize,
    /// `None` grows each tree until its leaves are pure
    pub max_depth: Option<usize>,
    pub bootstrap: bool,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            bootstrap: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RandomForestClassifier {
    params: ForestParams,
    n_features: usize,
    trees: Vec<RegressionTree>,
}

/// Split candidates per node: `max(1, floor(sqrt(n_features)))`
pub fn sqrt_features(n_features: usize) -> usize {
    ((n_features as f64).sqrt().floor() as usize).max(1)
}

impl RandomForestClassifier {
    pub fn fit(x: &Array2<f64>, y: &[u8], params: ForestParams, seed: u64) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(DiagnosError::Training(format!(
                "{} rows but {} labels",
                x.nrows(),
                y.len()
            )));
        }
        if x.nrows() == 0 {
            return Err(DiagnosError::Training("no training rows".to_string()));
        }

        let n = x.nrows();
        let tree_params = TreeParams {
            max_depth: params.max_depth,
            min_child_weight: 1.0,
            lambda: 0.0,
            max_features: Some(sqrt_features(x.ncols())),
        };

        // g = -y, h = 1 → leaf = mean(y)
        let grad: Vec<f64> = y.iter().map(|&v| -f64::from(v)).collect();
        let hess = vec![1.0; n];
        let mut rng = StdRng::seed_from_u64(seed);
        let mut trees = Vec::with_capacity(params.n_estimators);

        for _ in 0..params.n_estimators {
            let rows: Vec<usize> = if params.bootstrap {
                (0..n).map(|_| rng.gen_range(0..n)).collect()
            } else {
                (0..n).collect()
            };
            trees.push(RegressionTree::fit(x.view(), &grad, &hess, &rows, &tree_params, &mut rng));
        }

        Ok(Self {
            params,
            n_features: x.ncols(),
            trees,
        })
    }

    /// `[P(class 0), P(class 1)]`, mean of the per-tree leaf fractions
    pub fn predict_proba_row(&self, row: ArrayView1<f64>) -> [f64; 2] {
        if self.trees.is_empty() {
            return [0.5, 0.5];
        }
        let total: f64 = self.trees.iter().map(|tree| tree.predict_row(row)).sum();
        let p = (total / self.trees.len() as f64).clamp(0.0, 1.0);
        [1.0 - p, p]
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn params(&self) -> &ForestParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_sqrt_features() {
        assert_eq!(sqrt_features(1), 1);
        assert_eq!(sqrt_features(3), 1);
        assert_eq!(sqrt_features(4), 2);
        assert_eq!(sqrt_features(8), 2);
        assert_eq!(sqrt_features(9), 3);
    }

    #[test]
    fn test_learns_threshold() {
        let x = array![[0.0], [1.0], [2.0], [3.0], [10.0], [11.0], [12.0], [13.0]];
        let y = [0, 0, 0, 0, 1, 1, 1, 1];
        let params = ForestParams { n_estimators: 25, ..Default::default() };
        let forest = RandomForestClassifier::fit(&x, &y, params, 42).unwrap();

        assert_eq!(forest.n_trees(), 25);
        assert!(forest.predict_proba_row(array![0.5].view())[0] > 0.5);
        assert!(forest.predict_proba_row(array![12.5].view())[1] > 0.5);
    }

    #[test]
    fn test_same_seed_same_forest() {
        let x = array![[0.0, 1.0], [1.0, 0.0], [2.0, 2.0], [3.0, 1.0]];
        let y = [0, 1, 0, 1];
        let a = RandomForestClassifier::fit(&x, &y, ForestParams::default(), 7).unwrap();
        let b = RandomForestClassifier::fit(&x, &y, ForestParams::default(), 7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_probabilities_in_range() {
        let x = array![[0.0], [1.0], [2.0], [3.0]];
        let y = [0, 1, 1, 0];
        let forest = RandomForestClassifier::fit(&x, &y, ForestParams::default(), 1).unwrap();
        let [p0, p1] = forest.predict_proba_row(array![1.5].view());
        assert!((p0 + p1 - 1.0).abs() < 1e-12);
        assert!((0.0..=1.0).contains(&p0));
    }
}
