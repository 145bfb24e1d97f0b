use crate::error::OptimizerError;
use crate::weights::PortfolioWeights;
use core_types::CoreError;
use linalg::{Matrix, Vector, inverse};
use risk::CovarianceMatrix;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An absolute view on one asset's expected return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub asset: String,
    pub expected_return: f64,
    /// In `(0, 1)`; the view variance is `(1 - confidence) / confidence`.
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlackLittermanParams {
    pub risk_aversion: f64,
    pub tau: f64,
}

impl Default for BlackLittermanParams {
    fn default() -> Self {
        Self {
            risk_aversion: 2.5,
            tau: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlackLittermanOutput {
    pub equilibrium_returns: BTreeMap<String, f64>,
    pub posterior_returns: BTreeMap<String, f64>,
    pub posterior_covariance: CovarianceMatrix,
    /// Unconstrained mean-variance weights; they need not sum to one.
    pub weights: PortfolioWeights,
    pub views: Vec<View>,
}

/// Blends market equilibrium returns with investor views.
///
/// With no views the view terms drop out, so the posterior returns equal the
/// equilibrium returns and the posterior covariance equals `tau * Sigma`.
pub fn black_litterman(
    covariance: &CovarianceMatrix,
    market_weights: &PortfolioWeights,
    views: &[View],
    params: BlackLittermanParams,
) -> Result<BlackLittermanOutput, OptimizerError> {
    let BlackLittermanParams { risk_aversion, tau } = params;
    if !(risk_aversion > 0.0 && tau > 0.0) {
        return Err(OptimizerError::InvalidParameters(format!(
            "risk aversion and tau must be positive, got {risk_aversion} and {tau}"
        )));
    }
    let assets = covariance.assets();
    let w = market_weights.aligned(assets).ok_or_else(|| {
        CoreError::InvalidInput(
            "Black-Litterman".to_string(),
            "market weights must cover every asset in the covariance".to_string(),
        )
    })?;
    let w = Vector::from_vec(w);

    let tau_sigma = covariance.matrix() * tau;
    let equilibrium = &tau_sigma * &w * risk_aversion;

    let (posterior_cov, posterior) = if views.is_empty() {
        (tau_sigma, equilibrium.clone())
    } else {
        let (p, q, omega_inv) = view_matrices(covariance, views)?;
        let tau_sigma_inv = inverse(&tau_sigma)?;
        let pt_omega_inv = p.transpose() * &omega_inv;
        let m = inverse(&(&pt_omega_inv * &p + &tau_sigma_inv))?;
        let mu = &m * (&pt_omega_inv * q + &tau_sigma_inv * &equilibrium);
        (m, mu)
    };
    linalg::ensure_finite("Black-Litterman posterior", posterior.iter())?;

    let weights = &posterior_cov * &posterior / risk_aversion;
    tracing::debug!(views = views.len(), "Black-Litterman posterior computed");

    let keyed = |v: &Vector| -> BTreeMap<String, f64> {
        assets.iter().cloned().zip(v.iter().copied()).collect()
    };
    Ok(BlackLittermanOutput {
        equilibrium_returns: keyed(&equilibrium),
        posterior_returns: keyed(&posterior),
        posterior_covariance: CovarianceMatrix::new(assets.to_vec(), posterior_cov)?,
        weights: PortfolioWeights::from_assets(assets, weights.as_slice()),
        views: views.to_vec(),
    })
}

/// Pick matrix `P`, view returns `Q` and the diagonal `Omega^-1`.
fn view_matrices(
    covariance: &CovarianceMatrix,
    views: &[View],
) -> Result<(Matrix, Vector, Matrix), OptimizerError> {
    let mut p = Matrix::zeros(views.len(), covariance.len());
    let mut q = Vector::zeros(views.len());
    let mut omega_inv = Matrix::zeros(views.len(), views.len());
    for (row, view) in views.iter().enumerate() {
        let col = covariance.index_of(&view.asset).ok_or_else(|| {
            CoreError::InvalidInput(
                "Black-Litterman".to_string(),
                format!("view on unknown asset {}", view.asset),
            )
        })?;
        let c = view.confidence;
        if !(c > 0.0 && c < 1.0) {
            return Err(CoreError::InvalidInput(
                "Black-Litterman".to_string(),
                format!("view confidence must lie in (0, 1), got {c} for {}", view.asset),
            )
            .into());
        }
        p[(row, col)] = 1.0;
        q[row] = view.expected_return;
        omega_inv[(row, row)] = c / (1.0 - c);
    }
    Ok((p, q, omega_inv))
}
