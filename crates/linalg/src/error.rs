use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinalgError {
    #[error("Dimension mismatch in {operation}: {left:?} vs {right:?}")]
    DimensionMismatch {
        operation: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("{operation} requires a square matrix, got {rows}x{cols}")]
    NotSquare {
        operation: &'static str,
        rows: usize,
        cols: usize,
    },

    #[error("Matrix is singular in {0}")]
    Singular(&'static str),

    #[error("Matrix is not positive definite in {0}")]
    NotPositiveDefinite(&'static str),

    #[error("Regression has {observations} observations for {parameters} parameters")]
    DegreesOfFreedom {
        observations: usize,
        parameters: usize,
    },

    #[error("Non-finite value produced in {0}")]
    NonFinite(String),
}
