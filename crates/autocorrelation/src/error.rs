use core_types::CoreError;
use linalg::LinalgError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AutocorrelationError {
    #[error(transparent)]
    Input(#[from] CoreError),

    #[error("Numerical error in autocorrelation analysis: {0}")]
    Numerical(#[from] LinalgError),
}
