use core_types::CoreError;
use linalg::LinalgError;
use risk::RiskError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizerError {
    #[error(transparent)]
    Input(#[from] CoreError),

    #[error("Optimizer parameters are invalid: {0}")]
    InvalidParameters(String),

    #[error("Risk model error: {0}")]
    Risk(#[from] RiskError),

    #[error("Numerical error during optimization: {0}")]
    Numerical(#[from] LinalgError),
}
