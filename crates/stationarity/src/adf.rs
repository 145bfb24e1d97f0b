use crate::critical;
use crate::error::StationarityError;
use crate::result::{AdfRegression, StationarityResult, TestKind};
use crate::MIN_OBSERVATIONS;
use core_types::{CoreError, SignificanceLevel, require_min_len};
use linalg::{Design, RegressionFit, ensure_finite};

/// Name of the lagged-level regressor in `AdfStatistic::fit`.
pub const LEVEL_TERM: &str = "level";
const TREND: &str = "trend";

/// The raw ADF statistic together with the regression it came from.
///
/// This is the residual-testing path: callers that tabulate their own
/// critical values (e.g. Engle-Granger) use it directly.
#[derive(Debug, Clone, PartialEq)]
pub struct AdfStatistic {
    pub statistic: f64,
    pub lag: usize,
    pub fit: RegressionFit,
}

/// Augmented Dickey-Fuller test with a constant and a linear trend.
pub fn adf(series: &[f64], max_lag: usize) -> Result<StationarityResult, StationarityError> {
    adf_with(series, max_lag, AdfRegression::ConstantTrend)
}

/// Augmented Dickey-Fuller test with the given deterministic terms.
pub fn adf_with(
    series: &[f64],
    max_lag: usize,
    regression: AdfRegression,
) -> Result<StationarityResult, StationarityError> {
    let adf = adf_statistic(series, max_lag, regression)?;
    let critical_values = critical::adf(regression);
    let is_stationary = adf.statistic < critical_values[&SignificanceLevel::FivePercent];

    Ok(StationarityResult {
        kind: TestKind::Adf { regression },
        statistic: adf.statistic,
        critical_values,
        is_stationary,
        lags: adf.lag,
        observations: series.len(),
    })
}

/// Computes the ADF t-statistic on the lagged level.
///
/// The augmentation lag is chosen from `1..=max_lag` by minimizing
/// `m * ln(SSE / m) + 2k` with every candidate fitted on the same sample, then
/// the chosen model is refitted on all rows it can use.
pub fn adf_statistic(
    series: &[f64],
    max_lag: usize,
    regression: AdfRegression,
) -> Result<AdfStatistic, StationarityError> {
    require_min_len("ADF test", series, MIN_OBSERVATIONS)?;
    if max_lag == 0 {
        return Err(CoreError::InvalidInput(
            "ADF test".to_string(),
            "max_lag must be at least 1".to_string(),
        )
        .into());
    }

    let n = series.len();
    let diffs: Vec<f64> = series.windows(2).map(|w| w[1] - w[0]).collect();

    // Keep at least two residual degrees of freedom for the largest model.
    let feasible = (n - 4 - regression.deterministic_terms()) / 2;
    let max_lag = max_lag.min(feasible);
    if max_lag == 0 {
        return Err(CoreError::InsufficientData {
            context: "ADF test".to_string(),
            required: MIN_OBSERVATIONS,
            actual: n,
        }
        .into());
    }

    let mut best: Option<(usize, f64)> = None;
    for lag in 1..=max_lag {
        let fit = design(series, &diffs, lag, max_lag, regression).fit(&diffs[max_lag..])?;
        let m = fit.observations as f64;
        let aic = m * (fit.sse / m).ln() + 2.0 * fit.parameters as f64;
        tracing::trace!(lag, aic, "ADF candidate");
        if best.is_none_or(|(_, b)| aic < b) {
            best = Some((lag, aic));
        }
    }
    let lag = best.map(|(lag, _)| lag).unwrap_or(1);

    let fit = design(series, &diffs, lag, lag, regression).fit(&diffs[lag..])?;
    let statistic = fit
        .t_stat(LEVEL_TERM)
        .ok_or_else(|| CoreError::Calculation("ADF regression lost its level term".to_string()))?;
    ensure_finite("ADF statistic", [statistic].iter())?;
    tracing::debug!(lag, statistic, ?regression, "ADF statistic computed");

    Ok(AdfStatistic {
        statistic,
        lag,
        fit,
    })
}

/// Regressors for the differences `diffs[start..]`.
///
/// Row `t` explains `diffs[t] = y[t+1] - y[t]` by the level `y[t]`, the time
/// index, and the `lag` preceding differences.
fn design(
    series: &[f64],
    diffs: &[f64],
    lag: usize,
    start: usize,
    regression: AdfRegression,
) -> Design {
    let rows = start..diffs.len();
    let mut design = Design::new(rows.len());
    if regression.has_constant() {
        design = design.with_intercept();
    }
    if regression.has_trend() {
        design = design.column(TREND, rows.clone().map(|t| (t + 1) as f64).collect());
    }
    design = design.column(LEVEL_TERM, rows.clone().map(|t| series[t]).collect());
    for j in 1..=lag {
        design = design.column(
            format!("diff_lag_{j}"),
            rows.clone().map(|t| diffs[t - j]).collect(),
        );
    }
    design
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use rand_distr::StandardNormal;

    fn white_noise(seed: u64, n: usize) -> Vec<f64> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..n).map(|_| rng.sample::<f64, _>(StandardNormal)).collect()
    }

    fn random_walk(seed: u64, n: usize) -> Vec<f64> {
        white_noise(seed, n)
            .into_iter()
            .scan(0.0, |level, step| {
                *level += step;
                Some(*level)
            })
            .collect()
    }

    #[test]
    fn rejects_unit_root_for_white_noise() {
        let rejections = (0..20)
            .filter(|&seed| adf(&white_noise(seed, 250), 10).unwrap().is_stationary)
            .count();
        assert!(rejections >= 18, "only {rejections}/20 rejections");
    }

    #[test]
    fn keeps_unit_root_for_random_walk() {
        let rejections = (100..120)
            .filter(|&seed| adf(&random_walk(seed, 250), 10).unwrap().is_stationary)
            .count();
        assert!(rejections <= 6, "{rejections}/20 spurious rejections");
    }

    #[test]
    fn lag_stays_within_requested_range() {
        let result = adf(&white_noise(7, 120), 4).unwrap();
        assert!((1..=4).contains(&result.lags));
        assert_eq!(result.observations, 120);
        assert_eq!(
            result.kind,
            TestKind::Adf {
                regression: AdfRegression::ConstantTrend
            }
        );
        assert_eq!(result.critical_value(SignificanceLevel::FivePercent), Some(-3.41));
    }

    #[test]
    fn large_max_lag_is_clamped_for_short_series() {
        let result = adf(&white_noise(3, 12), 50).unwrap();
        assert!(result.lags <= 3);
    }

    #[test]
    fn fewer_than_ten_observations_is_an_input_error() {
        let err = adf(&white_noise(1, 9), 2).unwrap_err();
        assert!(matches!(
            err,
            StationarityError::Input(CoreError::InsufficientData { required: 10, actual: 9, .. })
        ));
    }

    #[test]
    fn zero_max_lag_is_rejected() {
        assert!(matches!(
            adf(&white_noise(1, 50), 0),
            Err(StationarityError::Input(CoreError::InvalidInput(..)))
        ));
    }

    #[test]
    fn residual_path_without_deterministic_terms() {
        let adf = adf_statistic(&white_noise(11, 200), 5, AdfRegression::None).unwrap();
        assert_eq!(adf.fit.intercept, 0.0);
        assert!(adf.fit.coefficient(TREND).is_none());
        assert!(adf.statistic < -1.95);
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let series = random_walk(5, 150);
        assert_eq!(adf(&series, 8).unwrap(), adf(&series, 8).unwrap());
    }
}
