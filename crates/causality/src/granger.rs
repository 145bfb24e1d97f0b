use crate::error::CausalityError;
use crate::result::CausalityResult;
use core_types::{CoreError, require_equal_len, require_min_len};
use linalg::{Design, ensure_finite};
use statrs::function::erf::erfc;

/// Granger causality test of whether `cause` helps predict `effect`.
///
/// Both models regress `effect[t]` on a constant and its own `lag_order`
/// lags; the unrestricted one adds `lag_order` lags of `cause`. The F-statistic
/// compares their residual sums of squares.
pub fn granger_causality(
    cause: &[f64],
    effect: &[f64],
    lag_order: usize,
    significance: f64,
) -> Result<CausalityResult, CausalityError> {
    require_equal_len("Granger causality", cause, effect)?;
    if lag_order == 0 {
        return Err(CoreError::InvalidInput(
            "Granger causality".to_string(),
            "lag_order must be at least 1".to_string(),
        )
        .into());
    }
    if !(significance > 0.0 && significance < 1.0) {
        return Err(CoreError::InvalidInput(
            "Granger causality".to_string(),
            format!("significance must lie in (0, 1), got {significance}"),
        )
        .into());
    }
    require_min_len("Granger causality", effect, lag_order + 10)?;

    // The unrestricted model needs at least one residual degree of freedom.
    let n = effect.len();
    let required = 3 * lag_order + 2;
    if n < required {
        return Err(CoreError::InsufficientData {
            context: "Granger causality".to_string(),
            required,
            actual: n,
        }
        .into());
    }
    let rows = n - lag_order;
    let lagged = |series: &[f64], j: usize| -> Vec<f64> {
        (lag_order..n).map(|t| series[t - j]).collect()
    };
    let y = &effect[lag_order..];

    let mut restricted = Design::new(rows).with_intercept();
    for j in 1..=lag_order {
        restricted = restricted.column(format!("effect_lag_{j}"), lagged(effect, j));
    }
    let mut unrestricted = restricted.clone();
    for j in 1..=lag_order {
        unrestricted = unrestricted.column(format!("cause_lag_{j}"), lagged(cause, j));
    }

    let sse_restricted = restricted.fit(y)?.sse;
    let sse_unrestricted = unrestricted.fit(y)?.sse;

    let df_numerator = lag_order;
    let df_denominator = rows - 2 * lag_order - 1;
    let f_statistic = ((sse_restricted - sse_unrestricted) / df_numerator as f64)
        / (sse_unrestricted / df_denominator as f64);
    ensure_finite("Granger F-statistic", [f_statistic].iter())?;

    let p_value = f_upper_tail(f_statistic, df_numerator as f64, df_denominator as f64);
    let is_causal = p_value < significance;
    tracing::debug!(lag_order, f_statistic, p_value, is_causal, "Granger test complete");

    Ok(CausalityResult {
        f_statistic,
        p_value,
        lag_order,
        observations: rows,
        df_numerator,
        df_denominator,
        sse_restricted,
        sse_unrestricted,
        significance,
        is_causal,
    })
}

/// `P(F > f)` for `F ~ F(d1, d2)` by Paulson's normal approximation of the
/// cube-root transformed statistic.
pub fn f_upper_tail(f: f64, d1: f64, d2: f64) -> f64 {
    if f <= 0.0 {
        return 1.0;
    }
    let a = 2.0 / (9.0 * d1);
    let b = 2.0 / (9.0 * d2);
    let cube_root = f.cbrt();
    let z = ((1.0 - b) * cube_root - (1.0 - a)) / (a + cube_root * cube_root * b).sqrt();
    (0.5 * erfc(z / std::f64::consts::SQRT_2)).clamp(0.0, 1.0)
}
