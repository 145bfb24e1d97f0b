use core_types::CoreError;
use linalg::LinalgError;
use stationarity::StationarityError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CointegrationError {
    #[error(transparent)]
    Input(#[from] CoreError),

    #[error("Numerical error in cointegration test: {0}")]
    Numerical(#[from] LinalgError),

    #[error("Residual stationarity test failed: {0}")]
    Residual(#[from] StationarityError),

    #[error("Johansen critical values are tabulated for at most {max} series, got {assets}")]
    UnsupportedDimension { assets: usize, max: usize },
}
