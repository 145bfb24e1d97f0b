use core_types::CoreError;
use linalg::LinalgError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    #[error(transparent)]
    Input(#[from] CoreError),

    #[error("Risk parameters are invalid: {0}")]
    InvalidParameters(String),

    #[error("Covariance matrix is invalid: {0}")]
    InvalidCovariance(String),

    #[error("Numerical error in risk calculation: {0}")]
    Numerical(#[from] LinalgError),
}
