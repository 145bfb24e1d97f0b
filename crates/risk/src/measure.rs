use crate::error::RiskError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskMethod {
    HistoricalSimulation,
    MonteCarlo,
}

/// Value-at-Risk and the tail average beyond it, both as portfolio returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskMeasure {
    pub method: RiskMethod,
    pub confidence_level: f64,
    pub var: f64,
    /// CVaR for historical simulation, Expected Shortfall for Monte Carlo.
    pub cvar: f64,
    /// Number of simulated scenarios.
    pub sample_size: usize,
    pub seed: u64,
}

pub(crate) fn validate(confidence_level: f64, scenarios: usize) -> Result<(), RiskError> {
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(RiskError::InvalidParameters(format!(
            "confidence level must lie in (0, 1), got {confidence_level}"
        )));
    }
    if scenarios == 0 {
        return Err(RiskError::InvalidParameters(
            "at least one scenario is required".to_string(),
        ));
    }
    Ok(())
}

/// Sorts `scenarios` ascending and returns `(var, cvar)`.
///
/// The VaR index is `floor((1 - c) * S)` clamped to the sample; CVaR averages
/// every scenario at or below it.
pub(crate) fn tail(mut scenarios: Vec<f64>, confidence_level: f64) -> (f64, f64) {
    scenarios.sort_by(f64::total_cmp);
    let index = (((1.0 - confidence_level) * scenarios.len() as f64).floor() as usize)
        .min(scenarios.len() - 1);
    let var = scenarios[index];
    let cvar = scenarios[..=index].iter().sum::<f64>() / (index + 1) as f64;
    (var, cvar)
}
