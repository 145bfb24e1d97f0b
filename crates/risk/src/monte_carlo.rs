use crate::covariance::{CovarianceMatrix, mean_returns};
use crate::error::RiskError;
use crate::measure::{self, RiskMeasure, RiskMethod};
use core_types::{AssetReturns, validate_panel};
use linalg::{Vector, cholesky};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

const MIN_ASSETS: usize = 2;
const MIN_OBSERVATIONS: usize = 30;

/// Monte Carlo Expected Shortfall of an equally weighted portfolio.
///
/// Scenarios are `mu + L z` with `L` the Cholesky factor of the sample
/// covariance and `z` standard normal, averaged across assets.
pub fn monte_carlo_es(
    returns: &AssetReturns,
    confidence_level: f64,
    simulations: usize,
    seed: u64,
) -> Result<RiskMeasure, RiskError> {
    measure::validate(confidence_level, simulations)?;
    validate_panel("Monte Carlo expected shortfall", returns, MIN_ASSETS, MIN_OBSERVATIONS)?;

    let mu = Vector::from_vec(mean_returns(returns));
    let covariance = CovarianceMatrix::from_returns(returns)?;
    let l = cholesky(covariance.matrix())?;
    let k = mu.len();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let simulated: Vec<f64> = (0..simulations)
        .map(|_| {
            let z = Vector::from_fn(k, |_, _| rng.sample(StandardNormal));
            (&mu + &l * z).mean()
        })
        .collect();

    let (var, cvar) = measure::tail(simulated, confidence_level);
    tracing::debug!(confidence_level, simulations, var, cvar, "Monte Carlo ES computed");

    Ok(RiskMeasure {
        method: RiskMethod::MonteCarlo,
        confidence_level,
        var,
        cvar,
        sample_size: simulations,
        seed,
    })
}
