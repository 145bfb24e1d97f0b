use crate::critical;
use crate::error::CointegrationError;
use crate::result::EngleGrangerResult;
use core_types::{SignificanceLevel, require_equal_len, require_min_len};
use linalg::Design;
use stationarity::{AdfRegression, LEVEL_TERM, adf_statistic};

const MIN_OBSERVATIONS: usize = 10;

/// Engle-Granger two-step cointegration test.
///
/// Regresses `a` on `b` with an intercept, then runs the ADF residual path
/// (no deterministic terms, since OLS residuals are already centred) on the
/// spread. The verdict uses the Engle-Granger table, not the plain ADF one.
pub fn engle_granger(
    a: &[f64],
    b: &[f64],
    max_lag: usize,
) -> Result<EngleGrangerResult, CointegrationError> {
    require_equal_len("Engle-Granger test", a, b)?;
    require_min_len("Engle-Granger test", a, MIN_OBSERVATIONS)?;

    let fit = Design::new(a.len())
        .with_intercept()
        .column("slope", b.to_vec())
        .fit(a)?;
    let slope = fit.coefficient("slope").unwrap_or_default();

    let adf = adf_statistic(&fit.residuals, max_lag, AdfRegression::None)?;
    let critical_values = critical::engle_granger();
    let is_cointegrated = adf.statistic < critical_values[&SignificanceLevel::FivePercent];

    let half_life = adf
        .fit
        .coefficient(LEVEL_TERM)
        .filter(|gamma| (-1.0..0.0).contains(gamma))
        .map(|gamma| -std::f64::consts::LN_2 / (1.0 + gamma).ln());

    tracing::debug!(
        intercept = fit.intercept,
        slope,
        statistic = adf.statistic,
        is_cointegrated,
        "Engle-Granger test complete"
    );

    Ok(EngleGrangerResult {
        cointegrating_vector: [fit.intercept, slope],
        residual_variance: fit.residual_variance(),
        adf_statistic: adf.statistic,
        adf_lags: adf.lag,
        critical_values,
        half_life,
        r_squared: fit.r_squared,
        is_cointegrated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::CoreError;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use rand_distr::StandardNormal;

    fn random_walk(rng: &mut ChaCha8Rng, n: usize) -> Vec<f64> {
        let mut level = 0.0;
        (0..n)
            .map(|_| {
                level += rng.sample::<f64, _>(StandardNormal);
                level
            })
            .collect()
    }

    /// `y = 1 + 2x + u` with `x` a random walk and `u` an AR(1) with
    /// coefficient `phi` (`phi = 0` gives i.i.d. noise).
    fn cointegrated_pair(seed: u64, n: usize, phi: f64) -> (Vec<f64>, Vec<f64>) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let x = random_walk(&mut rng, n);
        let mut u = 0.0;
        let y = x
            .iter()
            .map(|v| {
                u = phi * u + rng.sample::<f64, _>(StandardNormal);
                1.0 + 2.0 * v + u
            })
            .collect();
        (y, x)
    }

    #[test]
    fn detects_synthetic_equilibrium() {
        let detected = (0..20)
            .filter(|&seed| {
                let (y, x) = cointegrated_pair(seed, 300, 0.0);
                engle_granger(&y, &x, 5).unwrap().is_cointegrated
            })
            .count();
        assert!(detected >= 18, "only {detected}/20 detected");
    }

    #[test]
    fn recovers_hedge_ratio() {
        let (y, x) = cointegrated_pair(3, 500, 0.8);
        let result = engle_granger(&y, &x, 5).unwrap();
        assert!((result.cointegrating_vector[1] - 2.0).abs() < 0.05);
        // Var(u) = 1 / (1 - 0.64) for the AR(1) spread; half-life ln2 / -ln(0.8) ~ 3.1.
        assert!(result.residual_variance > 1.7 && result.residual_variance < 4.0);
        assert!(result.half_life.is_some_and(|h| h > 1.5 && h < 6.0));
        assert!(result.is_cointegrated);
    }

    #[test]
    fn independent_random_walks_are_rarely_cointegrated() {
        let spurious = (0..20)
            .filter(|&seed| {
                let mut rng = ChaCha8Rng::seed_from_u64(1_000 + seed);
                let a = random_walk(&mut rng, 300);
                let b = random_walk(&mut rng, 300);
                engle_granger(&a, &b, 5).unwrap().is_cointegrated
            })
            .count();
        assert!(spurious <= 6, "{spurious}/20 spurious detections");
    }

    #[test]
    fn uses_stricter_table_than_plain_adf() {
        let (y, x) = cointegrated_pair(8, 100, 0.0);
        let result = engle_granger(&y, &x, 3).unwrap();
        assert_eq!(result.critical_values[&SignificanceLevel::FivePercent], -3.34);
    }

    #[test]
    fn rejects_mismatched_or_short_input() {
        assert!(matches!(
            engle_granger(&[1.0; 12], &[1.0; 11], 2),
            Err(CointegrationError::Input(CoreError::LengthMismatch { .. }))
        ));
        assert!(matches!(
            engle_granger(&[1.0; 9], &[1.0; 9], 2),
            Err(CointegrationError::Input(CoreError::InsufficientData { .. }))
        ));
    }
}
