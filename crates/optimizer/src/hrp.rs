use crate::error::OptimizerError;
use crate::risk_parity::risk_parity;
use crate::weights::PortfolioWeights;
use itertools::Itertools;
use linalg::Matrix;
use risk::CovarianceMatrix;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HrpResult {
    pub weights: PortfolioWeights,
    /// The surviving clusters, each listed in covariance order.
    pub clusters: Vec<Vec<String>>,
    /// False if risk parity inside any cluster ran out of iterations.
    pub converged: bool,
}

/// Hierarchical Risk Parity.
///
/// Assets are clustered on the distance `1 - correlation` by average linkage
/// until `max(2, n / 3)` clusters remain. Each cluster receives an equal share,
/// split inside the cluster by risk parity.
pub fn hierarchical_risk_parity(
    covariance: &CovarianceMatrix,
    tolerance: f64,
    max_iterations: usize,
) -> Result<HrpResult, OptimizerError> {
    let n = covariance.len();
    if n < 2 {
        return Err(OptimizerError::InvalidParameters(format!(
            "hierarchical risk parity needs at least 2 assets, got {n}"
        )));
    }

    let distance = covariance.correlation().map(|rho| 1.0 - rho);
    let clusters = cluster(&distance, (n / 3).max(2));
    let share = 1.0 / clusters.len() as f64;

    let mut weights = PortfolioWeights::default();
    let mut converged = true;
    for members in &clusters {
        if let [single] = members.as_slice() {
            weights.insert(covariance.assets()[*single].clone(), share);
            continue;
        }
        let inner = risk_parity(&covariance.submatrix(members), tolerance, max_iterations)?;
        converged &= inner.converged;
        for (asset, w) in inner.weights.iter() {
            weights.insert(asset.clone(), w * share);
        }
    }

    let clusters = clusters
        .iter()
        .map(|members| members.iter().map(|&i| covariance.assets()[i].clone()).collect())
        .collect();
    Ok(HrpResult {
        weights,
        clusters,
        converged,
    })
}

/// Agglomerative average-linkage clustering down to `target` clusters.
///
/// Ties go to the first pair in index order.
fn cluster(distance: &Matrix, target: usize) -> Vec<Vec<usize>> {
    let mut clusters: Vec<Vec<usize>> = (0..distance.nrows()).map(|i| vec![i]).collect();
    let linkage = |a: &[usize], b: &[usize]| -> f64 {
        let total: f64 = a.iter().cartesian_product(b).map(|(&i, &j)| distance[(i, j)]).sum();
        total / (a.len() * b.len()) as f64
    };

    while clusters.len() > target {
        let mut best: Option<(usize, usize, f64)> = None;
        for (a, b) in (0..clusters.len()).tuple_combinations() {
            let d = linkage(&clusters[a], &clusters[b]);
            if best.is_none_or(|(_, _, bd)| d < bd) {
                best = Some((a, b, d));
            }
        }
        let Some((a, b, d)) = best else { break };
        let absorbed = clusters.remove(b);
        clusters[a].extend(absorbed);
        clusters[a].sort_unstable();
        tracing::debug!(distance = d, remaining = clusters.len(), "merged clusters");
    }
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two blocks of three assets, correlated 0.9 inside and 0.1 across.
    fn block_covariance() -> CovarianceMatrix {
        let vols = [0.1, 0.2, 0.3, 0.15, 0.25, 0.35];
        // Interleave the blocks so clustering has to find them.
        let block = [0, 1, 0, 1, 0, 1];
        let m = Matrix::from_fn(6, 6, |i, j| {
            let rho = if i == j {
                1.0
            } else if block[i] == block[j] {
                0.9
            } else {
                0.1
            };
            rho * vols[i] * vols[j]
        });
        let names = (0..6).map(|i| format!("A{i}")).collect();
        CovarianceMatrix::new(names, m).unwrap()
    }

    #[test]
    fn recovers_correlation_blocks() {
        let result = hierarchical_risk_parity(&block_covariance(), 1e-10, 500).unwrap();
        assert_eq!(
            result.clusters,
            vec![vec!["A0", "A2", "A4"], vec!["A1", "A3", "A5"]]
        );
        assert!(result.converged);
    }

    #[test]
    fn each_cluster_receives_an_equal_share() {
        let result = hierarchical_risk_parity(&block_covariance(), 1e-10, 500).unwrap();
        assert!((result.weights.total() - 1.0).abs() < 1e-9);
        for cluster in &result.clusters {
            let share: f64 = cluster.iter().filter_map(|a| result.weights.get(a)).sum();
            assert!((share - 0.5).abs() < 1e-9);
        }
        // Inside a cluster the least volatile asset gets the most weight.
        let w = |a: &str| result.weights.get(a).unwrap();
        assert!(w("A0") > w("A2") && w("A2") > w("A4"));
    }

    #[test]
    fn two_uncorrelated_assets_stay_singletons() {
        let m = Matrix::from_diagonal(&linalg::Vector::from_vec(vec![0.01, 0.04]));
        let cov = CovarianceMatrix::new(vec!["X".into(), "Y".into()], m).unwrap();
        let result = hierarchical_risk_parity(&cov, 1e-8, 100).unwrap();
        assert_eq!(result.clusters.len(), 2);
        assert_eq!(result.weights.get("X"), Some(0.5));
        assert_eq!(result.weights.get("Y"), Some(0.5));
    }

    #[test]
    fn single_asset_is_rejected() {
        let m = Matrix::from_element(1, 1, 0.01);
        let cov = CovarianceMatrix::new(vec!["X".into()], m).unwrap();
        assert!(matches!(
            hierarchical_risk_parity(&cov, 1e-8, 100),
            Err(OptimizerError::InvalidParameters(_))
        ));
    }
}
