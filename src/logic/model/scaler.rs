//! Standard Scaler
//!
//! Per-column mean / population standard deviation learned from the
//! training matrix. Zero-variance columns keep a unit scale.

use ndarray::{Array1, Array2, Axis};

use crate::error::{DiagnosError, Result};

/// Fitted normalization parameters
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    pub mean: Array1<f64>,
    pub scale: Array1<f64>,
}

impl StandardScaler {
    /// Learn column means and standard deviations
    pub fn fit(x: &Array2<f64>) -> Result<Self> {
        if x.nrows() == 0 {
            return Err(DiagnosError::Training("cannot fit scaler on zero rows".to_string()));
        }

        let mean = x
            .mean_axis(Axis(0))
            .ok_or_else(|| DiagnosError::Training("empty matrix".to_string()))?;
        let scale = x
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s.is_finite() && s > 0.0 { s } else { 1.0 });

        Ok(Self { mean, scale })
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// `(x - mean) / scale`, column-wise
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if x.ncols() != self.n_features() {
            return Err(DiagnosError::FeatureLength {
                expected: self.n_features(),
                actual: x.ncols(),
            });
        }
        Ok((x - &self.mean) / &self.scale)
    }

    pub fn fit_transform(x: &Array2<f64>) -> Result<(Self, Array2<f64>)> {
        let scaler = Self::fit(x)?;
        let scaled = scaler.transform(x)?;
        Ok((scaler, scaled))
    }
}
