use crate::critical;
use crate::error::StationarityError;
use crate::result::{KpssTrend, StationarityResult, TestKind};
use crate::MIN_OBSERVATIONS;
use core_types::{SignificanceLevel, require_min_len};
use linalg::{Design, ensure_finite};

/// KPSS test of the null hypothesis that the series is (trend) stationary.
///
/// The long-run variance uses a Bartlett kernel truncated at
/// `ceil((n / 100)^(1/4))` lags.
pub fn kpss(series: &[f64], trend: KpssTrend) -> Result<StationarityResult, StationarityError> {
    require_min_len("KPSS test", series, MIN_OBSERVATIONS)?;
    let n = series.len();

    let mut design = Design::new(n).with_intercept();
    if trend == KpssTrend::ConstantTrend {
        design = design.column("trend", (1..=n).map(|t| t as f64).collect());
    }
    let residuals = design.fit(series)?.residuals;

    let nf = n as f64;
    let partial_energy: f64 = residuals
        .iter()
        .scan(0.0, |sum, e| {
            *sum += e;
            Some(*sum * *sum)
        })
        .sum();
    let eta = partial_energy / (nf * nf);

    let bandwidth = (nf / 100.0).powf(0.25).ceil() as usize;
    let long_run_variance = bartlett_long_run_variance(&residuals, bandwidth);

    let statistic = eta / long_run_variance;
    ensure_finite("KPSS statistic", [statistic].iter())?;
    tracing::debug!(statistic, bandwidth, ?trend, "KPSS statistic computed");

    let critical_values = critical::kpss(trend);
    let is_stationary = statistic < critical_values[&SignificanceLevel::FivePercent];

    Ok(StationarityResult {
        kind: TestKind::Kpss { trend },
        statistic,
        critical_values,
        is_stationary,
        lags: bandwidth,
        observations: n,
    })
}

/// `gamma_0 + 2 * sum_{l=1..L} (1 - l / (L + 1)) * gamma_l`.
fn bartlett_long_run_variance(residuals: &[f64], bandwidth: usize) -> f64 {
    let n = residuals.len() as f64;
    let autocovariance = |lag: usize| -> f64 {
        residuals[lag..]
            .iter()
            .zip(residuals)
            .map(|(a, b)| a * b)
            .sum::<f64>()
            / n
    };
    let weighted: f64 = (1..=bandwidth.min(residuals.len() - 1))
        .map(|lag| (1.0 - lag as f64 / (bandwidth as f64 + 1.0)) * autocovariance(lag))
        .sum();
    autocovariance(0) + 2.0 * weighted
}
