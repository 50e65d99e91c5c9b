//! Gradient Boosting Classifier
//!
//! Binary logistic boosting over second-order regression trees.
//! Each round fits a tree to the gradient/hessian of the log loss at the
//! current margin and adds `learning_rate * tree(x)`.

use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::tree::{RegressionTree, TreeParams};
use crate::error::{DiagnosError, Result};

/// Smallest hessian kept per row, avoids zero-weight rows once `p` saturates
const MIN_HESSIAN: f64 = 1e-16;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoostingParams {
    pub n_estimators: usize,
    pub learning_rate: f64,
    pub max_depth: usize,
    pub lambda: f64,
    pub min_child_weight: f64,
}

impl Default for BoostingParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            learning_rate: 0.3,
            max_depth: 6,
            lambda: 1.0,
            min_child_weight: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradientBoostingClassifier {
    params: BoostingParams,
    n_features: usize,
    trees: Vec<RegressionTree>,
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl GradientBoostingClassifier {
    pub fn fit(x: &Array2<f64>, y: &[u8], params: BoostingParams, seed: u64) -> Result<Self> {
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

        let tree_params = TreeParams {
            max_depth: Some(params.max_depth),
            min_child_weight: params.min_child_weight,
            lambda: params.lambda,
            max_features: None,
        };

        let n = x.nrows();
        let rows: Vec<usize> = (0..n).collect();
        let targets: Vec<f64> = y.iter().map(|&v| f64::from(v)).collect();
        let mut margin = vec![0.0; n];
        let mut grad = vec![0.0; n];
        let mut hess = vec![0.0; n];
        let mut rng = StdRng::seed_from_u64(seed);
        let mut trees = Vec::with_capacity(params.n_estimators);

        for _ in 0..params.n_estimators {
            for i in 0..n {
                let p = sigmoid(margin[i]);
                grad[i] = p - targets[i];
                hess[i] = (p * (1.0 - p)).max(MIN_HESSIAN);
            }

            let tree = RegressionTree::fit(x.view(), &grad, &hess, &rows, &tree_params, &mut rng);
            for (i, row) in x.rows().into_iter().enumerate() {
                margin[i] += params.learning_rate * tree.predict_row(row);
            }
            trees.push(tree);
        }

        Ok(Self {
            params,
            n_features: x.ncols(),
            trees,
        })
    }

    /// Raw log-odds for one row
    pub fn margin(&self, row: ArrayView1<f64>) -> f64 {
        self.trees
            .iter()
            .map(|tree| self.params.learning_rate * tree.predict_row(row))
            .sum()
    }

    /// `[P(class 0), P(class 1)]`
    pub fn predict_proba_row(&self, row: ArrayView1<f64>) -> [f64; 2] {
        let p = sigmoid(self.margin(row));
        [1.0 - p, p]
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn params(&self) -> &BoostingParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // Hessians start at 0.25, so each side needs 4+ rows to pass min_child_weight
    fn separable() -> (Array2<f64>, Vec<u8>) {
        let n = 24;
        let x = Array2::from_shape_fn((n, 2), |(i, j)| {
            let offset = if i < n / 2 { -2.0 } else { 1.0 };
            if j == 0 { offset + (i % 6) as f64 * 0.15 } else { (i % 5) as f64 * 0.1 }
        });
        let y = (0..n).map(|i| u8::from(i >= n / 2)).collect();
        (x, y)
    }

    #[test]
    fn test_learns_separable_data() {
        let (x, y) = separable();
        let params = BoostingParams { n_estimators: 20, ..Default::default() };
        let model = GradientBoostingClassifier::fit(&x, &y, params, 42).unwrap();

        assert_eq!(model.n_trees(), 20);
        let low = model.predict_proba_row(array![-1.8, 0.0].view());
        let high = model.predict_proba_row(array![1.8, 0.0].view());
        assert!(low[0] > 0.5);
        assert!(high[1] > 0.5);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let (x, y) = separable();
        let model = GradientBoostingClassifier::fit(&x, &y, BoostingParams::default(), 42).unwrap();
        let [p0, p1] = model.predict_proba_row(array![0.3, 0.3].view());
        assert!((p0 + p1 - 1.0).abs() < 1e-12);
        assert!((0.0..=1.0).contains(&p1));
    }

    #[test]
    fn test_rejects_label_mismatch() {
        let (x, _) = separable();
        let fitted = GradientBoostingClassifier::fit(&x, &[0, 1], BoostingParams::default(), 42);
        assert!(fitted.is_err());
    }
}
