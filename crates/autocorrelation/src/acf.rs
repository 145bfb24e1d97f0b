use crate::error::AutocorrelationError;
use core_types::CoreError;
use linalg::{ensure_finite, stats::pearson};
use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutocorrelationResult {
    /// Autocorrelations at lags `1..=lags`.
    pub acf: Vec<f64>,
    /// Partial autocorrelations at lags `1..=lags`.
    pub pacf: Vec<f64>,
    pub ljung_box: f64,
    /// Upper tail of a chi-squared with `lags` degrees of freedom.
    pub ljung_box_p_value: f64,
    pub lags: usize,
    pub observations: usize,
}

/// Runs ACF, PACF and Ljung-Box over `min(max_lags, n / 4)` lags.
pub fn analyze(
    series: &[f64],
    max_lags: usize,
) -> Result<AutocorrelationResult, AutocorrelationError> {
    let acf = acf(series, max_lags)?;
    let pacf = durbin_levinson(&acf);
    let n = series.len();
    let ljung_box = ljung_box(&acf, n);

    let ljung_box_p_value = ChiSquared::new(acf.len() as f64)
        .map(|chi2| chi2.sf(ljung_box))
        .map_err(|e| CoreError::Calculation(format!("Ljung-Box reference distribution: {e}")))?;

    tracing::debug!(
        lags = acf.len(),
        ljung_box,
        ljung_box_p_value,
        "autocorrelation analysis complete"
    );

    Ok(AutocorrelationResult {
        lags: acf.len(),
        acf,
        pacf,
        ljung_box,
        ljung_box_p_value,
        observations: n,
    })
}

/// Pearson correlation of `x[0..n-k]` with `x[k..n]` for `k = 1..=m`, where
/// `m = min(max_lags, n / 4)`.
pub fn acf(series: &[f64], max_lags: usize) -> Result<Vec<f64>, AutocorrelationError> {
    if max_lags == 0 {
        return Err(CoreError::InvalidInput(
            "autocorrelation".to_string(),
            "max_lags must be at least 1".to_string(),
        )
        .into());
    }
    let n = series.len();
    let lags = max_lags.min(n / 4);
    if lags == 0 {
        return Err(CoreError::InsufficientData {
            context: "autocorrelation".to_string(),
            required: 4,
            actual: n,
        }
        .into());
    }

    let acf: Vec<f64> = (1..=lags)
        .map(|k| pearson(&series[..n - k], &series[k..]))
        .collect();
    ensure_finite("autocorrelation function", acf.iter())?;
    Ok(acf)
}

/// Partial autocorrelations from autocorrelations `r_1..r_m` by the
/// Durbin-Levinson recursion.
pub fn durbin_levinson(acf: &[f64]) -> Vec<f64> {
    let m = acf.len();
    let mut pacf = Vec::with_capacity(m);
    let mut phi: Vec<f64> = Vec::with_capacity(m);

    for k in 1..=m {
        let r_k = acf[k - 1];
        let phi_kk = if k == 1 {
            r_k
        } else {
            let num: f64 = r_k - (1..k).map(|j| phi[j - 1] * acf[k - j - 1]).sum::<f64>();
            let den: f64 = 1.0 - (1..k).map(|j| phi[j - 1] * acf[j - 1]).sum::<f64>();
            num / den
        };
        let previous = phi.clone();
        for j in 1..k {
            phi[j - 1] = previous[j - 1] - phi_kk * previous[k - j - 1];
        }
        phi.push(phi_kk);
        pacf.push(phi_kk);
    }
    pacf
}

/// `Q = n (n + 2) * sum_k r_k^2 / (n - k)`.
pub fn ljung_box(acf: &[f64], n: usize) -> f64 {
    let nf = n as f64;
    nf * (nf + 2.0)
        * acf
            .iter()
            .enumerate()
            .map(|(i, r)| r * r / (nf - (i + 1) as f64))
            .sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use rand_distr::StandardNormal;

    fn ar1(seed: u64, n: usize, phi: f64) -> Vec<f64> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut x = 0.0;
        (0..n)
            .map(|_| {
                x = phi * x + rng.sample::<f64, _>(StandardNormal);
                x
            })
            .collect()
    }

    #[test]
    fn recursion_on_theoretical_ar1_acf() {
        let acf: Vec<f64> = (1..=6).map(|k| 0.5f64.powi(k)).collect();
        let pacf = durbin_levinson(&acf);
        assert!((pacf[0] - 0.5).abs() < 1e-12);
        assert!(pacf[1..].iter().all(|p| p.abs() < 1e-12), "{pacf:?}");
    }

    #[test]
    fn recursion_on_theoretical_ar2_acf() {
        // x[t] = 0.5 x[t-1] + 0.3 x[t-2] + e: r1 = 0.5 / 0.7, r_k = 0.5 r_{k-1} + 0.3 r_{k-2}.
        let mut acf = vec![0.5 / 0.7];
        acf.push(0.5 * acf[0] + 0.3);
        for k in 2..6 {
            acf.push(0.5 * acf[k - 1] + 0.3 * acf[k - 2]);
        }
        let pacf = durbin_levinson(&acf);
        assert!((pacf[1] - 0.3).abs() < 1e-12);
        assert!(pacf[2..].iter().all(|p| p.abs() < 1e-12), "{pacf:?}");
    }

    #[test]
    fn sample_ar1_structure() {
        let result = analyze(&ar1(1, 4000, 0.7), 10).unwrap();
        assert_eq!(result.lags, 10);
        assert!((result.acf[0] - 0.7).abs() < 0.05);
        assert!((result.acf[1] - 0.49).abs() < 0.06);
        assert!((result.pacf[0] - 0.7).abs() < 0.05);
        assert!(result.pacf[1..].iter().all(|p| p.abs() < 0.1));
        assert!(result.ljung_box_p_value < 1e-6);
    }

    #[test]
    fn white_noise_passes_ljung_box_mostly() {
        let passes = (0..20)
            .filter(|&seed| analyze(&ar1(seed, 400, 0.0), 10).unwrap().ljung_box_p_value > 0.05)
            .count();
        assert!(passes >= 15, "only {passes}/20 passed");
    }

    #[test]
    fn lag_count_is_capped_by_quarter_length() {
        let result = analyze(&ar1(2, 20, 0.3), 10).unwrap();
        assert_eq!(result.lags, 5);
        assert_eq!(result.acf.len(), 5);
        assert_eq!(result.pacf.len(), 5);
    }

    #[test]
    fn ljung_box_matches_formula() {
        let q = ljung_box(&[0.5, 0.25], 10);
        let expected = 10.0 * 12.0 * (0.25 / 9.0 + 0.0625 / 8.0);
        assert!((q - expected).abs() < 1e-12);
    }

    #[test]
    fn rejects_degenerate_input() {
        assert!(matches!(
            analyze(&[1.0, 2.0, 3.0], 5),
            Err(AutocorrelationError::Input(CoreError::InsufficientData { .. }))
        ));
        assert!(matches!(
            analyze(&ar1(3, 50, 0.1), 0),
            Err(AutocorrelationError::Input(CoreError::InvalidInput(..)))
        ));
        assert!(matches!(
            analyze(&[2.0; 40], 5),
            Err(AutocorrelationError::Numerical(_))
        ));
    }
}
