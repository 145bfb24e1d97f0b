use crate::enums::SignificanceLevel;
use crate::error::CoreError;
use std::collections::BTreeMap;

/// Historical observations keyed by asset identifier.
///
/// A `BTreeMap` keeps asset ordering stable, which every multivariate
/// routine relies on to line up matrix rows with asset ids.
pub type AssetReturns = BTreeMap<String, Vec<f64>>;

/// Critical values of a test statistic keyed by significance level.
pub type CriticalValues = BTreeMap<SignificanceLevel, f64>;

/// Converts a price sequence into log-returns, `ln(p[t] / p[t-1])`.
pub fn log_returns(prices: &[f64]) -> Result<Vec<f64>, CoreError> {
    require_min_len("log_returns", prices, 2)?;
    if let Some(bad) = prices.iter().find(|p| !(p.is_finite() && **p > 0.0)) {
        return Err(CoreError::InvalidInput(
            "log_returns".to_string(),
            format!("prices must be finite and positive, found {bad}"),
        ));
    }
    Ok(prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect())
}

/// Fails with `InsufficientData` if `series` holds fewer than `min` points.
pub fn require_min_len(context: &str, series: &[f64], min: usize) -> Result<(), CoreError> {
    if series.len() < min {
        return Err(CoreError::InsufficientData {
            context: context.to_string(),
            required: min,
            actual: series.len(),
        });
    }
    Ok(())
}

/// Fails with `LengthMismatch` unless both series have the same length.
pub fn require_equal_len(context: &str, left: &[f64], right: &[f64]) -> Result<(), CoreError> {
    if left.len() != right.len() {
        return Err(CoreError::LengthMismatch {
            context: context.to_string(),
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(())
}

/// Validates a multi-asset panel and returns its common length.
///
/// Every series must have the same length, there must be at least
/// `min_assets` assets, and each series at least `min_obs` observations.
pub fn validate_panel(
    context: &str,
    returns: &AssetReturns,
    min_assets: usize,
    min_obs: usize,
) -> Result<usize, CoreError> {
    if returns.len() < min_assets {
        return Err(CoreError::InvalidInput(
            context.to_string(),
            format!("requires at least {min_assets} assets, got {}", returns.len()),
        ));
    }
    let mut iter = returns.values();
    let first = match iter.next() {
        Some(series) => series,
        None => return Ok(0),
    };
    for series in iter {
        require_equal_len(context, first, series)?;
    }
    require_min_len(context, first, min_obs)?;
    Ok(first.len())
}

/// Keeps only the trailing `last_n` observations of every series.
pub fn window(returns: &AssetReturns, last_n: usize) -> AssetReturns {
    returns
        .iter()
        .map(|(asset, series)| {
            let start = series.len().saturating_sub(last_n);
            (asset.clone(), series[start..].to_vec())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(lengths: &[usize]) -> AssetReturns {
        lengths
            .iter()
            .enumerate()
            .map(|(i, &n)| (format!("A{i}"), vec![0.01; n]))
            .collect()
    }

    #[test]
    fn log_returns_of_doubling_prices() {
        let r = log_returns(&[1.0, 2.0, 4.0]).unwrap();
        assert_eq!(r.len(), 2);
        assert!((r[0] - std::f64::consts::LN_2).abs() < 1e-12);
        assert!((r[1] - std::f64::consts::LN_2).abs() < 1e-12);
    }

    #[test]
    fn log_returns_rejects_non_positive_prices() {
        assert!(matches!(
            log_returns(&[1.0, 0.0, 2.0]),
            Err(CoreError::InvalidInput(..))
        ));
    }

    #[test]
    fn panel_requires_equal_lengths() {
        let err = validate_panel("test", &panel(&[30, 31]), 2, 10).unwrap_err();
        assert!(matches!(err, CoreError::LengthMismatch { .. }));
    }

    #[test]
    fn panel_requires_enough_assets_and_observations() {
        assert!(validate_panel("test", &panel(&[40]), 2, 10).is_err());
        assert!(matches!(
            validate_panel("test", &panel(&[5, 5]), 2, 10),
            Err(CoreError::InsufficientData { required: 10, actual: 5, .. })
        ));
        assert_eq!(validate_panel("test", &panel(&[12, 12]), 2, 10).unwrap(), 12);
    }

    #[test]
    fn window_keeps_trailing_observations() {
        let mut returns = AssetReturns::new();
        returns.insert("X".to_string(), vec![1.0, 2.0, 3.0, 4.0]);
        returns.insert("Y".to_string(), vec![5.0]);
        let trimmed = window(&returns, 2);
        assert_eq!(trimmed["X"], vec![3.0, 4.0]);
        assert_eq!(trimmed["Y"], vec![5.0]);
    }
}
