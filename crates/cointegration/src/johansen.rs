use crate::critical::{self, MAX_JOHANSEN_ASSETS};
use crate::error::CointegrationError;
use crate::result::JohansenResult;
use core_types::{CoreError, SignificanceLevel, require_equal_len, require_min_len};
use linalg::{Matrix, generalized_symmetric_eigen, inverse, residualize};

const MIN_OBSERVATIONS: usize = 20;

/// Eigenvalues are kept strictly below one so `ln(1 - lambda)` stays finite.
const EIGENVALUE_CEILING: f64 = 1.0 - 1e-12;

/// Johansen cointegration test with an unrestricted constant.
///
/// `series` holds `k >= 2` equal-length level series; `lag_order` is the
/// number of lagged differences in the VECM.
pub fn johansen<S: AsRef<[f64]>>(
    series: &[S],
    lag_order: usize,
) -> Result<JohansenResult, CointegrationError> {
    let k = series.len();
    if k < 2 {
        return Err(CoreError::InvalidInput(
            "Johansen test".to_string(),
            format!("requires at least 2 series, got {k}"),
        )
        .into());
    }
    if k > MAX_JOHANSEN_ASSETS {
        return Err(CointegrationError::UnsupportedDimension {
            assets: k,
            max: MAX_JOHANSEN_ASSETS,
        });
    }
    let first = series[0].as_ref();
    for other in &series[1..] {
        require_equal_len("Johansen test", first, other.as_ref())?;
    }
    require_min_len("Johansen test", first, MIN_OBSERVATIONS)?;

    let t = first.len();
    let level = |row: usize, col: usize| series[col].as_ref()[row];
    let diff = |row: usize, col: usize| level(row + 1, col) - level(row, col);

    // Rows are indexed by the difference they explain: dY[row] = Y[row+1] - Y[row].
    let rows = t - 1 - lag_order.min(t - 1);
    let aux_cols = 1 + k * lag_order;
    if rows <= aux_cols + k {
        return Err(CoreError::InsufficientData {
            context: format!("Johansen test with lag order {lag_order}"),
            required: aux_cols + k + lag_order + 2,
            actual: t,
        }
        .into());
    }

    let z0 = Matrix::from_fn(rows, k, |i, j| diff(i + lag_order, j));
    let z1 = Matrix::from_fn(rows, k, |i, j| level(i + lag_order, j));
    let z2 = Matrix::from_fn(rows, aux_cols, |i, j| {
        if j == 0 {
            1.0
        } else {
            let lag = (j - 1) / k + 1;
            diff(i + lag_order - lag, (j - 1) % k)
        }
    });

    let r0 = residualize(&z0, &z2)?;
    let r1 = residualize(&z1, &z2)?;

    let n = rows as f64;
    let s00 = r0.transpose() * &r0 / n;
    let s01 = r0.transpose() * &r1 / n;
    let s11 = r1.transpose() * &r1 / n;
    let s10 = s01.transpose();

    let product = &s10 * inverse(&s00)? * &s01;
    let eigen = generalized_symmetric_eigen(&product, &s11)?;
    let eigenvalues: Vec<f64> = eigen
        .values
        .iter()
        .map(|l| l.clamp(0.0, EIGENVALUE_CEILING))
        .collect();

    let log_terms: Vec<f64> = eigenvalues.iter().map(|l| -n * (1.0 - l).ln()).collect();
    let trace_statistics: Vec<f64> = (0..k).map(|r| log_terms[r..].iter().sum()).collect();
    let max_eigen_statistics = log_terms;

    let trace_critical_values: Vec<_> = (0..k).map(|r| critical::johansen_trace(k - r)).collect();
    let max_eigen_critical_values: Vec<_> =
        (0..k).map(|r| critical::johansen_max_eigen(k - r)).collect();

    let rank = trace_statistics
        .iter()
        .zip(&trace_critical_values)
        .take_while(|(stat, cv)| **stat > cv[&SignificanceLevel::FivePercent])
        .count();

    let cointegrating_vectors = (0..rank)
        .map(|r| {
            let v: Vec<f64> = eigen.vectors.column(r).iter().copied().collect();
            normalize(v)
        })
        .collect();

    tracing::debug!(k, rank, rows, ?eigenvalues, "Johansen test complete");

    Ok(JohansenResult {
        eigenvalues,
        trace_statistics,
        max_eigen_statistics,
        trace_critical_values,
        max_eigen_critical_values,
        rank,
        cointegrating_vectors,
        lag_order,
        effective_observations: rows,
        is_cointegrated: rank > 0,
    })
}

/// Scales a cointegrating vector so its first component is one.
fn normalize(v: Vec<f64>) -> Vec<f64> {
    match v.first() {
        Some(&pivot) if pivot.abs() > 1e-12 => v.iter().map(|x| x / pivot).collect(),
        _ => v,
    }
}
