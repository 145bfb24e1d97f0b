use core_types::CoreError;
use linalg::LinalgError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StationarityError {
    #[error(transparent)]
    Input(#[from] CoreError),

    #[error("Numerical error in stationarity test: {0}")]
    Numerical(#[from] LinalgError),
}
