use core_types::CoreError;
use linalg::LinalgError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CausalityError {
    #[error(transparent)]
    Input(#[from] CoreError),

    #[error("Numerical error in causality analysis: {0}")]
    Numerical(#[from] LinalgError),
}
