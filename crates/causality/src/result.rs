use serde::Serialize;

/// Outcome of a Granger causality test of `cause -> effect`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CausalityResult {
    pub f_statistic: f64,
    /// Normal approximation to the F upper tail.
    pub p_value: f64,
    pub lag_order: usize,
    /// Rows in both regressions, `n - lag_order`.
    pub observations: usize,
    pub df_numerator: usize,
    pub df_denominator: usize,
    pub sse_restricted: f64,
    pub sse_unrestricted: f64,
    pub significance: f64,
    pub is_causal: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrossCorrelation {
    pub lag: i64,
    pub correlation: f64,
}

/// Which series moves first at the optimal lag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Leader {
    First,
    Second,
    Contemporaneous,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadLagResult {
    /// One entry per lag in `-max_lag..=max_lag`, ascending.
    pub cross_correlations: Vec<CrossCorrelation>,
    /// Positive when the first series leads.
    pub optimal_lag: i64,
    pub correlation: f64,
    pub leader: Leader,
}
