//! Descriptive statistics over plain slices.
//!
//! The moments delegate to `statrs`. Zero-variance inputs are not
//! special-cased: `pearson` returns NaN and the calling estimator decides
//! whether that is an error.

use statrs::statistics::Statistics;

pub fn mean(x: &[f64]) -> f64 {
    x.iter().mean()
}

/// Sample variance with `n - 1` in the denominator.
pub fn variance(x: &[f64]) -> f64 {
    x.iter().variance()
}

pub fn std_dev(x: &[f64]) -> f64 {
    x.iter().std_dev()
}

/// Sample covariance of two equal-length slices.
pub fn covariance(x: &[f64], y: &[f64]) -> f64 {
    x.iter().covariance(y.iter())
}

/// Pearson correlation of two equal-length slices.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let (mx, my) = (mean(x), mean(y));
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in x.iter().zip(y) {
        let (dx, dy) = (a - mx, b - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    sxy / (sxx * syy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moments_of_small_sample() {
        let x = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&x) - 5.0).abs() < 1e-12);
        assert!((variance(&x) - 32.0 / 7.0).abs() < 1e-12);
        assert!((covariance(&x, &x) - variance(&x)).abs() < 1e-12);
        assert!((std_dev(&x) - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn pearson_is_scale_invariant() {
        let x = [1.0, 3.0, 2.0, 5.0, 4.0];
        let y: Vec<f64> = x.iter().map(|v| -2.0 * v + 1.0).collect();
        assert!((pearson(&x, &y) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_of_constant_series_is_nan() {
        assert!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_nan());
    }
}
