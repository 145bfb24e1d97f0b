use autocorrelation::{AutocorrelationResult, SeasonalDecomposition};
use causality::{CausalityResult, LeadLagResult};
use cointegration::{EngleGrangerResult, JohansenResult};
use optimizer::{HrpResult, RiskParityResult};
use risk::{CovarianceMatrix, RiskMeasure};
use serde::Serialize;
use stationarity::StationarityResult;

/// ADF and KPSS on one asset's returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationarityReport {
    pub asset: String,
    pub adf: StationarityResult,
    pub kpss: StationarityResult,
}

impl StationarityReport {
    /// True when ADF rejects a unit root and KPSS does not reject stationarity.
    pub fn tests_agree_stationary(&self) -> bool {
        self.adf.is_stationary && self.kpss.is_stationary
    }
}

/// Every pairwise relationship between two assets.
///
/// Engle-Granger runs on cumulative log-returns (log-price levels); Granger
/// and lead-lag run on the returns themselves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairReport {
    pub first: String,
    pub second: String,
    pub engle_granger: EngleGrangerResult,
    pub granger_first_to_second: CausalityResult,
    pub granger_second_to_first: CausalityResult,
    pub lead_lag: LeadLagResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutocorrelationReport {
    pub asset: String,
    pub autocorrelation: AutocorrelationResult,
    /// Present when a seasonal period was requested and the series is long enough.
    pub decomposition: Option<SeasonalDecomposition>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReport {
    pub historical: RiskMeasure,
    /// Needs at least two assets with thirty observations.
    pub monte_carlo: Option<RiskMeasure>,
    pub covariance: CovarianceMatrix,
}

/// Everything the engine can say about a panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullReport {
    pub assets: Vec<String>,
    pub observations: usize,
    pub stationarity: Vec<StationarityReport>,
    pub pairs: Vec<PairReport>,
    pub johansen: Option<JohansenResult>,
    pub autocorrelation: Vec<AutocorrelationReport>,
    pub risk: RiskReport,
    pub risk_parity: RiskParityResult,
    pub hrp: Option<HrpResult>,
}
