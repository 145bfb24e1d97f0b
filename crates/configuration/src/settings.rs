use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisSettings,
    pub logging: LoggingSettings,
}

/// Numeric parameters shared by every analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Confidence level for VaR and CVaR, e.g. 0.95.
    pub confidence_level: f64,
    /// Only the most recent `lookback_days` observations are analysed.
    pub lookback_days: usize,
    /// Upper bound for ADF augmentation, ACF lags and the lead-lag window.
    pub max_lags: usize,
    /// Lag order for Granger causality and the Johansen VECM.
    pub lag_order: usize,
    /// Risk parity stops once risk contributions differ by less than this.
    pub tolerance: f64,
    pub max_iterations: usize,
    /// Scenarios for historical bootstrap and Monte Carlo simulation.
    pub simulations: usize,
    pub seed: u64,
    /// Threshold on the Granger p-value.
    pub significance: f64,
    pub risk_aversion: f64,
    /// Black-Litterman prior uncertainty scalar.
    pub tau: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
            lookback_days: 252,
            max_lags: 10,
            lag_order: 2,
            tolerance: 1e-6,
            max_iterations: 100,
            simulations: 10_000,
            seed: 42,
            significance: 0.05,
            risk_aversion: 2.5,
            tau: 0.05,
        }
    }
}

impl AnalysisSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let open_unit = |name: &str, v: f64| {
            if v > 0.0 && v < 1.0 {
                Ok(())
            } else {
                Err(ConfigError::ValidationError(format!(
                    "analysis.{name} must lie in (0, 1), got {v}"
                )))
            }
        };
        let positive = |name: &str, v: f64| {
            if v > 0.0 && v.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::ValidationError(format!(
                    "analysis.{name} must be positive, got {v}"
                )))
            }
        };
        let at_least_one = |name: &str, v: usize| {
            if v >= 1 {
                Ok(())
            } else {
                Err(ConfigError::ValidationError(format!(
                    "analysis.{name} must be at least 1"
                )))
            }
        };

        open_unit("confidence_level", self.confidence_level)?;
        open_unit("significance", self.significance)?;
        positive("tolerance", self.tolerance)?;
        positive("risk_aversion", self.risk_aversion)?;
        positive("tau", self.tau)?;
        at_least_one("lookback_days", self.lookback_days)?;
        at_least_one("max_lags", self.max_lags)?;
        at_least_one("lag_order", self.lag_order)?;
        at_least_one("max_iterations", self.max_iterations)?;
        at_least_one("simulations", self.simulations)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive such as `info` or `stationarity=debug`.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
