use core_types::CriticalValues;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngleGrangerResult {
    /// `[intercept, slope]` of the regression of the first series on the second.
    pub cointegrating_vector: [f64; 2],
    pub residual_variance: f64,
    pub adf_statistic: f64,
    pub adf_lags: usize,
    pub critical_values: CriticalValues,
    /// Half-life of mean reversion of the residual spread, in observations.
    /// `None` when the spread shows no mean reversion.
    pub half_life: Option<f64>,
    pub r_squared: f64,
    pub is_cointegrated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JohansenResult {
    /// Generalized eigenvalues, descending.
    pub eigenvalues: Vec<f64>,
    /// Trace statistic for each candidate rank `r = 0..k`.
    pub trace_statistics: Vec<f64>,
    /// Max-eigenvalue statistic for each candidate rank.
    pub max_eigen_statistics: Vec<f64>,
    pub trace_critical_values: Vec<CriticalValues>,
    pub max_eigen_critical_values: Vec<CriticalValues>,
    pub rank: usize,
    /// One vector per unit of rank, normalized to a unit first component.
    pub cointegrating_vectors: Vec<Vec<f64>>,
    pub lag_order: usize,
    pub effective_observations: usize,
    pub is_cointegrated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum CointegrationResult {
    EngleGranger(EngleGrangerResult),
    Johansen(JohansenResult),
}

impl CointegrationResult {
    pub fn is_cointegrated(&self) -> bool {
        match self {
            CointegrationResult::EngleGranger(r) => r.is_cointegrated,
            CointegrationResult::Johansen(r) => r.is_cointegrated,
        }
    }
}

impl From<EngleGrangerResult> for CointegrationResult {
    fn from(result: EngleGrangerResult) -> Self {
        CointegrationResult::EngleGranger(result)
    }
}

impl From<JohansenResult> for CointegrationResult {
    fn from(result: JohansenResult) -> Self {
        CointegrationResult::Johansen(result)
    }
}
