use crate::error::RiskError;
use core_types::{AssetReturns, validate_panel};
use linalg::{Matrix, stats};
use serde::ser::{Serialize, SerializeStruct, Serializer};

const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// A symmetric covariance matrix whose rows and columns follow `assets`.
///
/// Construction validates that the matrix is square, matches the asset list,
/// is symmetric within tolerance and has a non-negative diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct CovarianceMatrix {
    assets: Vec<String>,
    matrix: Matrix,
}

impl CovarianceMatrix {
    pub fn new(assets: Vec<String>, matrix: Matrix) -> Result<Self, RiskError> {
        let n = assets.len();
        if matrix.shape() != (n, n) {
            return Err(RiskError::InvalidCovariance(format!(
                "expected {n}x{n} for {n} assets, got {}x{}",
                matrix.nrows(),
                matrix.ncols()
            )));
        }
        if matrix.iter().any(|v| !v.is_finite()) {
            return Err(RiskError::InvalidCovariance("non-finite entry".to_string()));
        }
        let scale = matrix.amax().max(1.0);
        for i in 0..n {
            if matrix[(i, i)] < 0.0 {
                return Err(RiskError::InvalidCovariance(format!(
                    "negative variance for {}",
                    assets[i]
                )));
            }
            for j in (i + 1)..n {
                if (matrix[(i, j)] - matrix[(j, i)]).abs() > SYMMETRY_TOLERANCE * scale {
                    return Err(RiskError::InvalidCovariance(format!(
                        "not symmetric at ({i}, {j})"
                    )));
                }
            }
        }
        Ok(Self { assets, matrix })
    }

    /// Sample covariance (`n - 1` denominator) of an equal-length panel.
    pub fn from_returns(returns: &AssetReturns) -> Result<Self, RiskError> {
        validate_panel("covariance estimation", returns, 1, 2)?;
        let series: Vec<&Vec<f64>> = returns.values().collect();
        let n = series.len();
        // Each pair is estimated once so the matrix is exactly symmetric.
        let matrix = Matrix::from_fn(n, n, |i, j| {
            let (a, b) = (i.min(j), i.max(j));
            stats::covariance(series[a], series[b])
        });
        Self::new(returns.keys().cloned().collect(), matrix)
    }

    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn index_of(&self, asset: &str) -> Option<usize> {
        self.assets.iter().position(|a| a == asset)
    }

    pub fn volatilities(&self) -> Vec<f64> {
        self.matrix.diagonal().iter().map(|v| v.sqrt()).collect()
    }

    /// Correlation matrix; pairs involving a zero-variance asset are zero.
    pub fn correlation(&self) -> Matrix {
        let vol = self.volatilities();
        Matrix::from_fn(self.len(), self.len(), |i, j| {
            if i == j {
                1.0
            } else if vol[i] > 0.0 && vol[j] > 0.0 {
                self.matrix[(i, j)] / (vol[i] * vol[j])
            } else {
                0.0
            }
        })
    }

    /// The covariance restricted to the assets at `indices`, in that order.
    pub fn submatrix(&self, indices: &[usize]) -> Self {
        Self {
            assets: indices.iter().map(|&i| self.assets[i].clone()).collect(),
            matrix: self.matrix.select_rows(indices).select_columns(indices),
        }
    }

    /// `w^T * Sigma * w`.
    pub fn portfolio_variance(&self, weights: &[f64]) -> f64 {
        let w = linalg::Vector::from_column_slice(weights);
        (w.transpose() * &self.matrix * &w)[(0, 0)]
    }

    fn rows(&self) -> Vec<Vec<f64>> {
        self.matrix
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }
}

impl Serialize for CovarianceMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CovarianceMatrix", 2)?;
        state.serialize_field("assets", &self.assets)?;
        state.serialize_field("matrix", &self.rows())?;
        state.end()
    }
}

/// Per-asset arithmetic mean of the panel, in asset order.
pub fn mean_returns(returns: &AssetReturns) -> Vec<f64> {
    returns.values().map(|series| stats::mean(series)).collect()
}
