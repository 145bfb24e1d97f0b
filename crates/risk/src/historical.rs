use crate::error::RiskError;
use crate::measure::{self, RiskMeasure, RiskMethod};
use core_types::{AssetReturns, validate_panel};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Historical-simulation CVaR of an equally weighted portfolio.
///
/// Each of the `scenarios` portfolio returns averages one observation drawn
/// independently, with replacement, from every asset's history.
pub fn historical_cvar(
    returns: &AssetReturns,
    confidence_level: f64,
    scenarios: usize,
    seed: u64,
) -> Result<RiskMeasure, RiskError> {
    measure::validate(confidence_level, scenarios)?;
    let observations = validate_panel("historical CVaR", returns, 1, 1)?;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let assets = returns.len() as f64;
    let simulated: Vec<f64> = (0..scenarios)
        .map(|_| {
            returns
                .values()
                .map(|series| series[rng.random_range(0..observations)])
                .sum::<f64>()
                / assets
        })
        .collect();

    let (var, cvar) = measure::tail(simulated, confidence_level);
    tracing::debug!(confidence_level, scenarios, var, cvar, "historical CVaR computed");

    Ok(RiskMeasure {
        method: RiskMethod::HistoricalSimulation,
        confidence_level,
        var,
        cvar,
        sample_size: scenarios,
        seed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::CoreError;
    use rand_distr::StandardNormal;

    fn panel(seed: u64, assets: usize, n: usize) -> AssetReturns {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..assets)
            .map(|a| {
                let series = (0..n)
                    .map(|_| 0.0005 + 0.02 * rng.sample::<f64, _>(StandardNormal))
                    .collect();
                (format!("ASSET{a}"), series)
            })
            .collect()
    }

    #[test]
    fn cvar_never_exceeds_var() {
        let returns = panel(1, 3, 250);
        for c in [0.5, 0.9, 0.95, 0.99, 0.999] {
            let m = historical_cvar(&returns, c, 5_000, 42).unwrap();
            assert!(m.cvar <= m.var, "c = {c}: cvar {} > var {}", m.cvar, m.var);
        }
    }

    #[test]
    fn higher_confidence_reaches_deeper_into_the_tail() {
        let returns = panel(2, 4, 500);
        let c90 = historical_cvar(&returns, 0.90, 10_000, 7).unwrap();
        let c99 = historical_cvar(&returns, 0.99, 10_000, 7).unwrap();
        assert!(c99.var < c90.var);
        assert!(c99.cvar < c90.cvar);
        assert!(c90.var < 0.0);
    }

    #[test]
    fn same_seed_is_bit_identical_and_seed_matters() {
        let returns = panel(3, 2, 100);
        let a = historical_cvar(&returns, 0.95, 2_000, 11).unwrap();
        let b = historical_cvar(&returns, 0.95, 2_000, 11).unwrap();
        let c = historical_cvar(&returns, 0.95, 2_000, 12).unwrap();
        assert_eq!(a, b);
        assert_ne!(a.cvar, c.cvar);
    }

    #[test]
    fn constant_history_gives_that_return() {
        let returns = AssetReturns::from([("A".to_string(), vec![-0.01; 20])]);
        let m = historical_cvar(&returns, 0.95, 100, 0).unwrap();
        assert_eq!(m.var, -0.01);
        assert!((m.cvar + 0.01).abs() < 1e-15);
    }

    #[test]
    fn validates_arguments() {
        let returns = panel(4, 2, 50);
        assert!(matches!(
            historical_cvar(&returns, 1.2, 100, 0),
            Err(RiskError::InvalidParameters(_))
        ));
        assert!(matches!(
            historical_cvar(&AssetReturns::new(), 0.95, 100, 0),
            Err(RiskError::Input(CoreError::InvalidInput(..)))
        ));
    }
}
