use crate::error::OptimizerError;
use crate::weights::PortfolioWeights;
use linalg::Vector;
use risk::CovarianceMatrix;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskParityResult {
    pub weights: PortfolioWeights,
    /// `w_i * (Sigma w)_i / sigma_p` per asset, in covariance order.
    pub risk_contributions: Vec<f64>,
    pub portfolio_volatility: f64,
    pub iterations: usize,
    pub converged: bool,
}

struct Evaluation {
    volatility: f64,
    contributions: Vec<f64>,
    spread: f64,
}

fn evaluate(sigma: &linalg::Matrix, w: &Vector) -> Evaluation {
    let marginal = sigma * w;
    let volatility = w.dot(&marginal).sqrt();
    let contributions: Vec<f64> = w
        .iter()
        .zip(marginal.iter())
        .map(|(wi, mi)| wi * mi / volatility)
        .collect();
    let max = contributions.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = contributions.iter().copied().fold(f64::INFINITY, f64::min);
    Evaluation {
        volatility,
        contributions,
        spread: max - min,
    }
}

/// Equal-risk-contribution weights by damped fixed-point iteration.
///
/// Starting from equal weights, each step rescales `w_i` by
/// `sqrt(target / contribution_i)` and renormalizes. Convergence means the
/// spread of risk contributions falls below `tolerance`. Running out of
/// iterations is not an error: the best weights seen are returned with
/// `converged = false`.
pub fn risk_parity(
    covariance: &CovarianceMatrix,
    tolerance: f64,
    max_iterations: usize,
) -> Result<RiskParityResult, OptimizerError> {
    if covariance.is_empty() {
        return Err(OptimizerError::InvalidParameters(
            "risk parity needs at least one asset".to_string(),
        ));
    }
    if !(tolerance > 0.0) || max_iterations == 0 {
        return Err(OptimizerError::InvalidParameters(format!(
            "tolerance must be positive and max_iterations at least 1, got {tolerance} and {max_iterations}"
        )));
    }
    if let Some(i) = covariance.matrix().diagonal().iter().position(|v| *v <= 0.0) {
        return Err(OptimizerError::InvalidParameters(format!(
            "asset {} has zero variance",
            covariance.assets()[i]
        )));
    }

    let sigma = covariance.matrix();
    let n = covariance.len();
    let mut w = Vector::from_element(n, 1.0 / n as f64);
    let mut best: Option<(Vector, Evaluation)> = None;
    let mut converged = false;
    let mut iterations = 0;

    while iterations < max_iterations {
        iterations += 1;
        let eval = evaluate(sigma, &w);
        if !(eval.volatility > 0.0) {
            break;
        }
        converged = eval.spread < tolerance;
        let target = eval.contributions.iter().sum::<f64>() / n as f64;
        let next = Vector::from_fn(n, |i, _| {
            let rc = eval.contributions[i];
            // A non-positive contribution gives no usable ratio; keep the weight.
            if rc > 0.0 { w[i] * (target / rc).sqrt() } else { w[i] }
        });
        tracing::trace!(iterations, spread = eval.spread, "risk parity step");

        if best.as_ref().is_none_or(|(_, b)| eval.spread < b.spread) {
            best = Some((w.clone(), eval));
        }
        if converged {
            break;
        }
        w = &next / next.sum();
    }

    let (w, eval) = best.ok_or_else(|| {
        OptimizerError::InvalidParameters("portfolio volatility is zero".to_string())
    })?;
    tracing::debug!(iterations, converged, spread = eval.spread, "risk parity finished");

    Ok(RiskParityResult {
        weights: PortfolioWeights::from_assets(covariance.assets(), w.as_slice()),
        risk_contributions: eval.contributions,
        portfolio_volatility: eval.volatility,
        iterations,
        converged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use linalg::Matrix;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("A{i}")).collect()
    }

    fn correlated() -> CovarianceMatrix {
        let vols = [0.10, 0.20, 0.35];
        let rho = [[1.0, 0.6, 0.2], [0.6, 1.0, -0.1], [0.2, -0.1, 1.0]];
        let m = Matrix::from_fn(3, 3, |i, j| rho[i][j] * vols[i] * vols[j]);
        CovarianceMatrix::new(names(3), m).unwrap()
    }

    #[test]
    fn diagonal_covariance_gives_inverse_volatility_weights() {
        let m = Matrix::from_diagonal(&Vector::from_vec(vec![0.04, 0.09, 0.16]));
        let cov = CovarianceMatrix::new(names(3), m).unwrap();
        let result = risk_parity(&cov, 1e-10, 100).unwrap();
        assert!(result.converged);
        let inv: Vec<f64> = [0.2, 0.3, 0.4].iter().map(|v| 1.0 / v).collect();
        let total: f64 = inv.iter().sum();
        for (i, expected) in inv.iter().enumerate() {
            let got = result.weights.get(&format!("A{i}")).unwrap();
            assert!((got - expected / total).abs() < 1e-9);
        }
    }

    #[test]
    fn correlated_assets_reach_equal_contributions() {
        let result = risk_parity(&correlated(), 1e-8, 500).unwrap();
        assert!(result.converged, "stopped after {} iterations", result.iterations);
        assert!((result.weights.total() - 1.0).abs() < 1e-6);
        let rc = &result.risk_contributions;
        let spread = rc.iter().copied().fold(f64::MIN, f64::max)
            - rc.iter().copied().fold(f64::MAX, f64::min);
        assert!(spread < 1e-8);
        // Contributions add up to portfolio volatility.
        assert!((rc.iter().sum::<f64>() - result.portfolio_volatility).abs() < 1e-12);
    }

    #[test]
    fn exhausting_iterations_is_not_an_error() {
        let result = risk_parity(&correlated(), 1e-14, 1).unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 1);
        assert!((result.weights.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn single_asset_takes_everything() {
        let cov = CovarianceMatrix::new(names(1), Matrix::from_element(1, 1, 0.04)).unwrap();
        let result = risk_parity(&cov, 1e-6, 10).unwrap();
        assert!(result.converged);
        assert_eq!(result.weights.get("A0"), Some(1.0));
    }

    #[test]
    fn rejects_zero_variance_and_bad_parameters() {
        let m = Matrix::from_diagonal(&Vector::from_vec(vec![0.04, 0.0]));
        let cov = CovarianceMatrix::new(names(2), m).unwrap();
        assert!(matches!(
            risk_parity(&cov, 1e-6, 10),
            Err(OptimizerError::InvalidParameters(_))
        ));
        assert!(risk_parity(&correlated(), 0.0, 10).is_err());
        assert!(risk_parity(&correlated(), 1e-6, 0).is_err());
    }
}
