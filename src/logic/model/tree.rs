//! Regression Tree
//!
//! Second-order regression tree shared by both ensembles. Splits maximise
//!
//! ```text
//! gain = G_L² / (H_L + λ) + G_R² / (H_R + λ) − G² / (H + λ)
//! ```
//!
//! and leaves hold `−G / (H + λ)`. With `g = −y`, `h = 1`, `λ = 0` this is a
//! plain variance-reduction tree whose leaves are the mean target.

use ndarray::{ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::seq::index;

/// Smallest gain that still justifies a split
const MIN_GAIN: f64 = 1e-12;

/// Growth limits for one tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeParams {
    /// `None` grows until leaves are pure or cannot be split
    pub max_depth: Option<usize>,
    /// Minimum hessian sum on each side of a split
    pub min_child_weight: f64,
    /// L2 regularisation on leaf values
    pub lambda: f64,
    /// Features considered per split, `None` means all
    pub max_features: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    gain: f64,
}

/// Fitted tree, nodes stored flat with the root at index 0
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

/// Borrowed training inputs, threaded through the recursion
struct GrowContext<'a> {
    x: ArrayView2<'a, f64>,
    grad: &'a [f64],
    hess: &'a [f64],
    params: &'a TreeParams,
}

impl RegressionTree {
    /// Fit on the given row indices (duplicates allowed, e.g. bootstrap)
    pub fn fit<'a>(
        x: ArrayView2<'a, f64>,
        grad: &'a [f64],
        hess: &'a [f64],
        rows: &[usize],
        params: &'a TreeParams,
        rng: &mut StdRng,
    ) -> Self {
        let ctx = GrowContext { x, grad, hess, params };
        let mut tree = Self { nodes: Vec::new() };
        let mut rows = rows.to_vec();
        tree.grow(&ctx, &mut rows, 0, rng);
        tree
    }

    fn grow(
        &mut self,
        ctx: &GrowContext<'_>,
        rows: &mut [usize],
        depth: usize,
        rng: &mut StdRng,
    ) -> usize {
        let (g, h) = gradient_sums(ctx, rows);
        let id = self.nodes.len();
        self.nodes.push(Node::Leaf {
            value: leaf_value(g, h, ctx.params.lambda),
        });

        let depth_reached = ctx.params.max_depth.map_or(false, |max| depth >= max);
        if depth_reached || rows.len() < 2 {
            return id;
        }

        let split = match best_split(ctx, rows, g, h, rng) {
            Some(split) => split,
            None => return id,
        };

        let mid = partition(ctx, rows, &split);
        if mid == 0 || mid == rows.len() {
            return id;
        }

        let (left_rows, right_rows) = rows.split_at_mut(mid);
        let left = self.grow(ctx, left_rows, depth + 1, rng);
        let right = self.grow(ctx, right_rows, depth + 1, rng);

        self.nodes[id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        id
    }

    /// Leaf value reached by one row
    pub fn predict_row(&self, row: ArrayView1<f64>) -> f64 {
        let mut id = 0;
        loop {
            match self.nodes[id] {
                Node::Leaf { value } => return value,
                Node::Split { feature, threshold, left, right } => {
                    id = if row[feature] <= threshold { left } else { right };
                }
            }
        }
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| matches!(n, Node::Leaf { .. })).count()
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }
}

/// Reorder rows so `x <= threshold` comes first; returns the left count
fn partition(ctx: &GrowContext<'_>, rows: &mut [usize], split: &SplitCandidate) -> usize {
    let mut mid = 0;
    for i in 0..rows.len() {
        if ctx.x[[rows[i], split.feature]] <= split.threshold {
            rows.swap(i, mid);
            mid += 1;
        }
    }
    mid
}

fn gradient_sums(ctx: &GrowContext<'_>, rows: &[usize]) -> (f64, f64) {
    rows.iter()
        .fold((0.0, 0.0), |(g, h), &r| (g + ctx.grad[r], h + ctx.hess[r]))
}

fn leaf_value(g: f64, h: f64, lambda: f64) -> f64 {
    let denom = h + lambda;
    if denom > 0.0 { -g / denom } else { 0.0 }
}

fn split_score(g: f64, h: f64, lambda: f64) -> f64 {
    let denom = h + lambda;
    if denom > 0.0 { g * g / denom } else { 0.0 }
}

/// Exhaustive threshold search over the candidate features
fn best_split(
    ctx: &GrowContext<'_>,
    rows: &[usize],
    g_total: f64,
    h_total: f64,
    rng: &mut StdRng,
) -> Option<SplitCandidate> {
    let params = ctx.params;
    let n_features = ctx.x.ncols();

    let candidates: Vec<usize> = match params.max_features {
        Some(k) if k < n_features => index::sample(rng, n_features, k.max(1)).into_vec(),
        _ => (0..n_features).collect(),
    };

    let parent = split_score(g_total, h_total, params.lambda);
    let mut best: Option<SplitCandidate> = None;
    let mut column: Vec<(f64, f64, f64)> = Vec::with_capacity(rows.len());

    for feature in candidates {
        column.clear();
        column.extend(
            rows.iter()
                .map(|&r| (ctx.x[[r, feature]], ctx.grad[r], ctx.hess[r])),
        );
        column.sort_by(|a, b| a.0.total_cmp(&b.0));

        let (mut g_left, mut h_left) = (0.0, 0.0);
        for i in 0..column.len() - 1 {
            g_left += column[i].1;
            h_left += column[i].2;

            let (value, next) = (column[i].0, column[i + 1].0);
            if value == next {
                continue;
            }

            let (g_right, h_right) = (g_total - g_left, h_total - h_left);
            if h_left < params.min_child_weight || h_right < params.min_child_weight {
                continue;
            }

            let gain = split_score(g_left, h_left, params.lambda)
                + split_score(g_right, h_right, params.lambda)
                - parent;

            if gain > best.map_or(MIN_GAIN, |b| b.gain) {
                let mid = value + (next - value) * 0.5;
                best = Some(SplitCandidate {
                    feature,
                    threshold: if mid < next { mid } else { value },
                    gain,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;

    fn mean_tree_params() -> TreeParams {
        TreeParams {
            max_depth: None,
            min_child_weight: 1.0,
            lambda: 0.0,
            max_features: None,
        }
    }

    #[test]
    fn test_single_split_separates_targets() {
        let x = array![[1.0], [2.0], [3.0], [4.0]];
        let y = [0.0, 0.0, 1.0, 1.0];
        let grad: Vec<f64> = y.iter().map(|v| -v).collect();
        let hess = vec![1.0; 4];
        let mut rng = StdRng::seed_from_u64(0);

        let params = mean_tree_params();
        let tree = RegressionTree::fit(x.view(), &grad, &hess, &[0, 1, 2, 3], &params, &mut rng);

        assert_eq!(tree.n_leaves(), 2);
        assert_eq!(tree.predict_row(array![1.5].view()), 0.0);
        assert_eq!(tree.predict_row(array![3.5].view()), 1.0);
        // threshold sits between 2 and 3
        assert_eq!(tree.predict_row(array![2.4].view()), 0.0);
        assert_eq!(tree.predict_row(array![2.6].view()), 1.0);
    }

    #[test]
    fn test_pure_node_stays_leaf() {
        let x = array![[1.0], [2.0], [3.0]];
        let grad = vec![-1.0; 3];
        let hess = vec![1.0; 3];
        let mut rng = StdRng::seed_from_u64(0);

        let params = mean_tree_params();
        let tree = RegressionTree::fit(x.view(), &grad, &hess, &[0, 1, 2], &params, &mut rng);
        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(tree.predict_row(array![10.0].view()), 1.0);
    }

    #[test]
    fn test_max_depth_limits_growth() {
        let x = array![[1.0], [2.0], [3.0], [4.0], [5.0], [6.0]];
        let grad = vec![-0.0, -1.0, -0.0, -1.0, -0.0, -1.0];
        let hess = vec![1.0; 6];
        let params = TreeParams { max_depth: Some(1), ..mean_tree_params() };
        let mut rng = StdRng::seed_from_u64(0);

        let rows = [0, 1, 2, 3, 4, 5];
        let tree = RegressionTree::fit(x.view(), &grad, &hess, &rows, &params, &mut rng);
        assert!(tree.n_leaves() <= 2);
    }

    #[test]
    fn test_duplicate_rows_weight_the_leaf() {
        let x = array![[1.0], [1.0]];
        let grad = vec![0.0, -1.0];
        let hess = vec![1.0, 1.0];
        let mut rng = StdRng::seed_from_u64(0);

        // row 1 sampled three times: mean = 3/4
        let params = mean_tree_params();
        let tree = RegressionTree::fit(x.view(), &grad, &hess, &[0, 1, 1, 1], &params, &mut rng);
        assert!((tree.predict_row(array![1.0].view()) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_lambda_shrinks_leaf() {
        let x = array![[1.0], [2.0]];
        let grad = vec![-1.0, -1.0];
        let hess = vec![1.0, 1.0];
        let params = TreeParams { lambda: 2.0, ..mean_tree_params() };
        let mut rng = StdRng::seed_from_u64(0);

        let tree = RegressionTree::fit(x.view(), &grad, &hess, &[0, 1], &params, &mut rng);
        // −G / (H + λ) = 2 / 4
        assert!((tree.predict_row(array![1.0].view()) - 0.5).abs() < 1e-12);
    }
}
