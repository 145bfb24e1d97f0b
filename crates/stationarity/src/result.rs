use core_types::{CriticalValues, SignificanceLevel};
use serde::{Deserialize, Serialize};

/// Deterministic terms included in the ADF regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdfRegression {
    None,
    Constant,
    ConstantTrend,
}

impl AdfRegression {
    pub(crate) fn has_constant(&self) -> bool {
        !matches!(self, AdfRegression::None)
    }

    pub(crate) fn has_trend(&self) -> bool {
        matches!(self, AdfRegression::ConstantTrend)
    }

    pub(crate) fn deterministic_terms(&self) -> usize {
        usize::from(self.has_constant()) + usize::from(self.has_trend())
    }
}

/// How the series is detrended before the KPSS partial sums are formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpssTrend {
    /// Constant only; tests level stationarity.
    Level,
    /// Constant plus linear trend; tests trend stationarity.
    ConstantTrend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "test", rename_all = "snake_case")]
pub enum TestKind {
    Adf { regression: AdfRegression },
    Kpss { trend: KpssTrend },
}

/// The outcome of a single stationarity test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationarityResult {
    pub kind: TestKind,
    pub statistic: f64,
    pub critical_values: CriticalValues,
    /// Verdict at the 5% level.
    pub is_stationary: bool,
    /// Augmentation lags for ADF, Bartlett truncation lag for KPSS.
    pub lags: usize,
    pub observations: usize,
}

impl StationarityResult {
    pub fn critical_value(&self, level: SignificanceLevel) -> Option<f64> {
        self.critical_values.get(&level).copied()
    }
}
