use crate::error::LinalgError;
use crate::matrix::{Matrix, Vector, ensure_finite, inverse};
use serde::Serialize;
use std::collections::BTreeMap;

/// The outcome of an ordinary least squares fit.
///
/// Produced by every regression-based test in the workspace and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionFit {
    /// Zero when the design has no intercept column.
    pub intercept: f64,
    pub coefficients: BTreeMap<String, f64>,
    pub standard_errors: BTreeMap<String, f64>,
    pub intercept_std_error: Option<f64>,
    pub residuals: Vec<f64>,
    pub r_squared: f64,
    /// Sum of squared residuals.
    pub sse: f64,
    pub observations: usize,
    pub parameters: usize,
}

impl RegressionFit {
    pub fn coefficient(&self, name: &str) -> Option<f64> {
        self.coefficients.get(name).copied()
    }

    /// Coefficient divided by its standard error.
    pub fn t_stat(&self, name: &str) -> Option<f64> {
        Some(self.coefficient(name)? / self.standard_errors.get(name)?)
    }

    /// `sse / (n - p)`, the unbiased residual variance.
    pub fn residual_variance(&self) -> f64 {
        self.sse / (self.observations - self.parameters) as f64
    }
}

/// Builder for a regression design matrix.
///
/// ```
/// use linalg::Design;
///
/// let x = vec![1.0, 2.0, 3.0, 4.0];
/// let y = vec![3.0, 5.0, 7.1, 8.9];
/// let fit = Design::new(4).with_intercept().column("x", x).fit(&y).unwrap();
/// assert!((fit.coefficient("x").unwrap() - 1.98).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Design {
    rows: usize,
    intercept: bool,
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl Design {
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn with_intercept(mut self) -> Self {
        self.intercept = true;
        self
    }

    pub fn column(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.names.push(name.into());
        self.columns.push(values);
        self
    }

    pub fn parameters(&self) -> usize {
        self.columns.len() + usize::from(self.intercept)
    }

    /// Builds the `rows x parameters` matrix, intercept first.
    pub fn matrix(&self) -> Result<Matrix, LinalgError> {
        for (name, column) in self.names.iter().zip(&self.columns) {
            if column.len() != self.rows {
                tracing::trace!(column = %name, len = column.len(), rows = self.rows, "bad column");
                return Err(LinalgError::DimensionMismatch {
                    operation: "design column",
                    left: (self.rows, 1),
                    right: (column.len(), 1),
                });
            }
        }
        let offset = usize::from(self.intercept);
        Ok(Matrix::from_fn(self.rows, self.parameters(), |i, j| {
            if j < offset { 1.0 } else { self.columns[j - offset][i] }
        }))
    }

    /// Fits `y` by OLS through the normal equations `(X^T X)^-1 X^T y`.
    pub fn fit(&self, y: &[f64]) -> Result<RegressionFit, LinalgError> {
        if y.len() != self.rows {
            return Err(LinalgError::DimensionMismatch {
                operation: "regression response",
                left: (self.rows, 1),
                right: (y.len(), 1),
            });
        }
        let p = self.parameters();
        if self.rows <= p {
            return Err(LinalgError::DegreesOfFreedom {
                observations: self.rows,
                parameters: p,
            });
        }

        let x = self.matrix()?;
        let y_vec = Vector::from_column_slice(y);
        let xt = x.transpose();
        let xtx_inv = inverse(&(&xt * &x))?;
        let beta = &xtx_inv * (&xt * &y_vec);
        ensure_finite("regression coefficients", beta.iter())?;

        let fitted = &x * &beta;
        let residuals: Vec<f64> = y_vec.iter().zip(fitted.iter()).map(|(a, b)| a - b).collect();
        let sse: f64 = residuals.iter().map(|r| r * r).sum();
        let sigma2 = sse / (self.rows - p) as f64;

        let y_mean = y.iter().sum::<f64>() / y.len() as f64;
        let sst: f64 = y.iter().map(|v| (v - y_mean) * (v - y_mean)).sum();
        let r_squared = if sst > 0.0 { 1.0 - sse / sst } else { 0.0 };

        let offset = usize::from(self.intercept);
        let se = |j: usize| (sigma2 * xtx_inv[(j, j)]).sqrt();
        let mut coefficients = BTreeMap::new();
        let mut standard_errors = BTreeMap::new();
        for (k, name) in self.names.iter().enumerate() {
            coefficients.insert(name.clone(), beta[k + offset]);
            standard_errors.insert(name.clone(), se(k + offset));
        }

        Ok(RegressionFit {
            intercept: if self.intercept { beta[0] } else { 0.0 },
            intercept_std_error: self.intercept.then(|| se(0)),
            coefficients,
            standard_errors,
            residuals,
            r_squared,
            sse,
            observations: self.rows,
            parameters: p,
        })
    }
}
