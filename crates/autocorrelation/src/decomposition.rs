use crate::error::AutocorrelationError;
use core_types::{CoreError, require_min_len};
use linalg::ensure_finite;
use serde::Serialize;

/// Classical additive decomposition `original = trend + seasonal + residual`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalDecomposition {
    pub period: usize,
    pub original: Vec<f64>,
    pub trend: Vec<f64>,
    /// One index per phase, centred to mean zero.
    pub seasonal: Vec<f64>,
    pub residual: Vec<f64>,
}

impl SeasonalDecomposition {
    /// Seasonal component aligned with observation `i`.
    pub fn seasonal_at(&self, i: usize) -> f64 {
        self.seasonal[i % self.period]
    }

    /// Share of detrended variance explained by the seasonal component.
    pub fn seasonal_strength(&self) -> f64 {
        let detrended: Vec<f64> = (0..self.original.len())
            .map(|i| self.original[i] - self.trend[i])
            .collect();
        let var_detrended = linalg::stats::variance(&detrended);
        if var_detrended <= 0.0 {
            return 0.0;
        }
        (1.0 - linalg::stats::variance(&self.residual) / var_detrended).max(0.0)
    }
}

/// Decomposes `series` with a seasonal cycle of `period` observations.
///
/// The trend is a centred moving average over one period; positions whose
/// window would leave the series keep the raw value. Each seasonal index is
/// the mean detrended value over every observation in its phase, centred so
/// the indices sum to zero.
pub fn decompose(
    series: &[f64],
    period: usize,
) -> Result<SeasonalDecomposition, AutocorrelationError> {
    if period < 2 {
        return Err(CoreError::InvalidInput(
            "seasonal decomposition".to_string(),
            format!("period must be at least 2, got {period}"),
        )
        .into());
    }
    require_min_len("seasonal decomposition", series, 2 * period)?;
    ensure_finite("seasonal decomposition input", series.iter())?;

    let n = series.len();
    let trend = centred_moving_average(series, period);

    let mut sums = vec![0.0; period];
    let mut counts = vec![0usize; period];
    for i in 0..n {
        sums[i % period] += series[i] - trend[i];
        counts[i % period] += 1;
    }
    let raw: Vec<f64> = sums
        .iter()
        .zip(&counts)
        .map(|(s, &c)| if c > 0 { s / c as f64 } else { 0.0 })
        .collect();
    let level = raw.iter().sum::<f64>() / period as f64;
    let seasonal: Vec<f64> = raw.iter().map(|s| s - level).collect();

    let residual: Vec<f64> = (0..n)
        .map(|i| series[i] - trend[i] - seasonal[i % period])
        .collect();
    tracing::debug!(period, observations = n, "seasonal decomposition complete");

    Ok(SeasonalDecomposition {
        period,
        original: series.to_vec(),
        trend,
        seasonal,
        residual,
    })
}

/// Odd windows average `period` points; even windows use the `2 x period`
/// average with half weight on both end points.
fn centred_moving_average(series: &[f64], period: usize) -> Vec<f64> {
    let n = series.len();
    let half = period / 2;
    let mut trend = series.to_vec();
    for i in half..n - half {
        let window = &series[i - half..=i + half];
        trend[i] = if period % 2 == 1 {
            window.iter().sum::<f64>() / period as f64
        } else {
            let inner: f64 = window[1..period].iter().sum();
            (0.5 * window[0] + inner + 0.5 * window[period]) / period as f64
        };
    }
    trend
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use rand_distr::StandardNormal;

    const PATTERN: [f64; 4] = [3.0, -1.0, -4.0, 2.0];

    fn seasonal_series(seed: u64, n: usize, noise: f64) -> Vec<f64> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..n)
            .map(|t| {
                let e: f64 = rng.sample(StandardNormal);
                10.0 + 0.1 * t as f64 + PATTERN[t % 4] + noise * e
            })
            .collect()
    }

    #[test]
    fn components_reconstruct_original() {
        for (seed, period) in [(1, 4), (2, 7), (3, 12)] {
            let series = seasonal_series(seed, 60, 1.0);
            let d = decompose(&series, period).unwrap();
            for i in 0..series.len() {
                let rebuilt = d.trend[i] + d.seasonal_at(i) + d.residual[i];
                assert!((rebuilt - series[i]).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn recovers_pattern_on_linear_trend() {
        // A linear trend is reproduced exactly by the centred average. Each
        // phase has one raw edge out of ten observations, which detrends to 0.
        let d = decompose(&seasonal_series(0, 40, 0.0), 4).unwrap();
        for (got, want) in d.seasonal.iter().zip(PATTERN) {
            assert!((got - 0.9 * want).abs() < 1e-9, "{:?}", d.seasonal);
        }
        assert!((d.trend[10] - (10.0 + 0.1 * 10.0)).abs() < 1e-9);
        for i in 2..38 {
            assert!((d.residual[i] - 0.1 * PATTERN[i % 4]).abs() < 1e-9);
        }
        assert!(d.seasonal_strength() > 0.85);
    }

    #[test]
    fn edge_observations_count_towards_their_phase() {
        let d = decompose(&[5.0, 1.0, 7.0, 2.0, 9.0, 4.0, 8.0, 3.0], 4).unwrap();
        assert_eq!(d.trend, vec![5.0, 1.0, 4.25, 5.125, 5.625, 5.875, 8.0, 3.0]);
        let expected = [1.546875, -1.078125, 1.234375, -1.703125];
        for (got, want) in d.seasonal.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "{:?}", d.seasonal);
        }
    }

    #[test]
    fn seasonal_indices_sum_to_zero() {
        let d = decompose(&seasonal_series(5, 35, 0.5), 5).unwrap();
        assert_eq!(d.seasonal.len(), 5);
        assert!(d.seasonal.iter().sum::<f64>().abs() < 1e-12);
    }

    #[test]
    fn edges_copy_raw_values() {
        let series = seasonal_series(6, 21, 1.0);
        let d = decompose(&series, 7).unwrap();
        assert_eq!(&d.trend[..3], &series[..3]);
        assert_eq!(&d.trend[18..], &series[18..]);
    }

    #[test]
    fn requires_two_full_periods() {
        assert!(matches!(
            decompose(&[1.0; 7], 4),
            Err(AutocorrelationError::Input(CoreError::InsufficientData { required: 8, .. }))
        ));
        assert!(matches!(
            decompose(&[1.0; 10], 1),
            Err(AutocorrelationError::Input(CoreError::InvalidInput(..)))
        ));
    }
}
