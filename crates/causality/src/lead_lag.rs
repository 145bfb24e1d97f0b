use crate::error::CausalityError;
use crate::result::{CrossCorrelation, LeadLagResult, Leader};
use core_types::{require_equal_len, require_min_len};
use linalg::{ensure_finite, stats::pearson};

/// Scans Pearson correlations of `first[t]` against `second[t + lag]` for
/// every lag in `-max_lag..=max_lag`.
///
/// A positive optimal lag means `first` leads. Among equal absolute
/// correlations the smallest `|lag|` wins, positive before negative.
pub fn lead_lag(
    first: &[f64],
    second: &[f64],
    max_lag: usize,
) -> Result<LeadLagResult, CausalityError> {
    require_equal_len("lead-lag analysis", first, second)?;
    require_min_len("lead-lag analysis", first, max_lag + 10)?;

    let n = first.len();
    let max = max_lag as i64;
    let cross_correlations: Vec<CrossCorrelation> = (-max..=max)
        .map(|lag| {
            let shift = lag.unsigned_abs() as usize;
            let correlation = if lag >= 0 {
                pearson(&first[..n - shift], &second[shift..])
            } else {
                pearson(&first[shift..], &second[..n - shift])
            };
            CrossCorrelation { lag, correlation }
        })
        .collect();
    ensure_finite(
        "lead-lag cross-correlations",
        cross_correlations.iter().map(|c| &c.correlation),
    )?;

    // Candidates in order 0, 1, -1, 2, -2, ... so a strict comparison keeps
    // the preferred lag on ties.
    let at = |lag: i64| cross_correlations[(lag + max) as usize];
    let best = std::iter::once(0)
        .chain((1..=max).flat_map(|l| [l, -l]))
        .map(at)
        .fold(at(0), |best, candidate| {
            if candidate.correlation.abs() > best.correlation.abs() {
                candidate
            } else {
                best
            }
        });

    let leader = match best.lag {
        l if l > 0 => Leader::First,
        l if l < 0 => Leader::Second,
        _ => Leader::Contemporaneous,
    };
    tracing::debug!(
        optimal_lag = best.lag,
        correlation = best.correlation,
        ?leader,
        "lead-lag scan complete"
    );

    Ok(LeadLagResult {
        cross_correlations,
        optimal_lag: best.lag,
        correlation: best.correlation,
        leader,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::CoreError;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use rand_distr::StandardNormal;

    fn noise(seed: u64, n: usize) -> Vec<f64> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..n).map(|_| rng.sample::<f64, _>(StandardNormal)).collect()
    }

    #[test]
    fn second_series_shifted_by_one_step_follows() {
        let first = noise(1, 60);
        // second[t] = 2 * first[t - 1]
        let second: Vec<f64> = std::iter::once(0.0)
            .chain(first[..59].iter().map(|v| 2.0 * v))
            .collect();

        let result = lead_lag(&first, &second, 5).unwrap();
        assert_eq!(result.optimal_lag, 1);
        assert_eq!(result.leader, Leader::First);
        assert!((result.correlation - 1.0).abs() < 1e-9);
        assert_eq!(result.cross_correlations.len(), 11);
        assert_eq!(result.cross_correlations[0].lag, -5);
    }

    #[test]
    fn swapping_arguments_flips_the_sign() {
        let first = noise(2, 80);
        let second: Vec<f64> = std::iter::repeat_n(0.0, 3)
            .chain(first[..77].iter().copied())
            .collect();
        let result = lead_lag(&second, &first, 4).unwrap();
        assert_eq!(result.optimal_lag, -3);
        assert_eq!(result.leader, Leader::Second);
    }

    #[test]
    fn identical_series_are_contemporaneous() {
        let series = noise(4, 40);
        let result = lead_lag(&series, &series, 3).unwrap();
        assert_eq!(result.optimal_lag, 0);
        assert_eq!(result.leader, Leader::Contemporaneous);
    }

    #[test]
    fn requires_max_lag_plus_ten_observations() {
        let ramp: Vec<f64> = (1..=10).map(f64::from).collect();
        assert!(matches!(
            lead_lag(&ramp, &ramp, 1),
            Err(CausalityError::Input(CoreError::InsufficientData { required: 11, .. }))
        ));
    }

    #[test]
    fn constant_series_is_a_numerical_error() {
        let flat = vec![1.0; 20];
        assert!(matches!(
            lead_lag(&flat, &noise(3, 20), 2),
            Err(CausalityError::Numerical(_))
        ));
    }
}
