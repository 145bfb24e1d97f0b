use autocorrelation::AutocorrelationError;
use causality::CausalityError;
use cointegration::CointegrationError;
use core_types::CoreError;
use optimizer::OptimizerError;
use risk::RiskError;
use stationarity::StationarityError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error(transparent)]
    Input(#[from] CoreError),

    #[error("Stationarity test failed: {0}")]
    Stationarity(#[from] StationarityError),

    #[error("Cointegration test failed: {0}")]
    Cointegration(#[from] CointegrationError),

    #[error("Causality analysis failed: {0}")]
    Causality(#[from] CausalityError),

    #[error("Autocorrelation analysis failed: {0}")]
    Autocorrelation(#[from] AutocorrelationError),

    #[error("Risk calculation failed: {0}")]
    Risk(#[from] RiskError),

    #[error("Portfolio optimization failed: {0}")]
    Optimizer(#[from] OptimizerError),

    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<AnalyticsError>,
    },
}

impl AnalyticsError {
    /// Wraps the error with the asset or pair it occurred on.
    pub fn context(self, context: impl Into<String>) -> Self {
        AnalyticsError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }
}
